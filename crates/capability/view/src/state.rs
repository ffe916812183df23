//! 屏幕状态槽位。

use crate::sequencer::RequestSequencer;
use patrimony_client::ClientError;
use patrimony_telemetry::record_stale_response;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// 数据 / 加载中 / 错误。
///
/// 失败时保留上一次的数据。
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ClientError>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始加载：置 loading，清除错误。
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.loading = false;
    }

    pub fn fail(&mut self, error: ClientError) {
        self.error = Some(error);
        self.loading = false;
    }

    /// 只记录错误；loading 由发起加载的一方收尾。
    pub fn record_error(&mut self, error: ClientError) {
        self.error = Some(error);
    }

    /// 错误提示文本。
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ClientError::user_message)
    }
}

/// 单次加载的结果。
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded,
    Failed(ClientError),
    /// 已有更新的请求发出，本次响应被丢弃。
    Discarded,
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded)
    }
}

/// 带请求序号的状态槽位。
///
/// 锁只在修改状态时持有，不跨 await。
#[derive(Debug)]
pub struct ScreenState<T> {
    state: Mutex<ViewState<T>>,
    sequencer: RequestSequencer,
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        Self {
            state: Mutex::new(ViewState::default()),
            sequencer: RequestSequencer::new(),
        }
    }
}

impl<T: Clone> ScreenState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ViewState<T> {
        self.lock().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.lock().data.clone()
    }

    /// 执行一次客户端操作并写回结果。
    pub async fn load<F, Fut>(&self, operation: F) -> LoadOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let ticket = self.sequencer.issue();
        self.lock().begin();
        let result = operation().await;
        if !self.sequencer.is_latest(ticket) {
            record_stale_response();
            debug!(ticket = ticket.value(), "stale response discarded");
            return LoadOutcome::Discarded;
        }
        match result {
            Ok(data) => {
                self.lock().succeed(data);
                LoadOutcome::Loaded
            }
            Err(err) => {
                self.lock().fail(err.clone());
                LoadOutcome::Failed(err)
            }
        }
    }

    pub fn begin(&self) {
        self.lock().begin();
    }

    pub fn succeed(&self, data: T) {
        self.lock().succeed(data);
    }

    /// 结束 `begin` 开启的提交并记录失败；数据保持不变。
    pub fn fail(&self, error: ClientError) {
        self.lock().fail(error);
    }

    /// 记录与加载无关的操作（如删除）的失败，不影响进行中的加载。
    pub fn record_error(&self, error: ClientError) {
        self.lock().record_error(error);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ViewState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failure_keeps_previous_data() {
        let screen: ScreenState<u32> = ScreenState::new();
        assert!(screen.load(|| async { Ok(1) }).await.is_loaded());

        let outcome = screen
            .load(|| async { Err(ClientError::Network("down".to_string())) })
            .await;
        assert!(matches!(outcome, LoadOutcome::Failed(_)));

        let state = screen.snapshot();
        assert_eq!(state.data, Some(1));
        assert!(!state.loading);
        assert!(state.error.is_some());
    }

    #[tokio::test]
    async fn begin_clears_previous_error() {
        let screen: ScreenState<u32> = ScreenState::new();
        screen.fail(ClientError::AuthExpired);
        assert!(screen.load(|| async { Ok(2) }).await.is_loaded());
        assert_eq!(screen.snapshot().error, None);
    }

    #[tokio::test]
    async fn side_error_leaves_pending_load_in_charge() {
        let screen: ScreenState<u32> = ScreenState::new();
        let (release, gate) = tokio::sync::oneshot::channel::<()>();
        let load = screen.load(|| async move {
            let _ = gate.await;
            Ok(3)
        });
        let side = async {
            tokio::task::yield_now().await;
            screen.record_error(ClientError::Network("down".to_string()));
            let state = screen.snapshot();
            assert!(state.loading);
            assert!(state.error.is_some());
            let _ = release.send(());
        };
        let (outcome, ()) = tokio::join!(load, side);

        assert!(outcome.is_loaded());
        let state = screen.snapshot();
        assert_eq!(state.data, Some(3));
        assert!(!state.loading);
    }
}

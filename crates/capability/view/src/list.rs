//! 资产列表屏幕：过滤、列表、确认后删除。

use crate::refresh::{RefreshCounter, RefreshReason};
use crate::state::{LoadOutcome, ScreenState, ViewState};
use async_trait::async_trait;
use domain::{AssetFilter, AssetRecord};
use patrimony_client::{ClientError, PatrimonyClient};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;
use tracing::info;

/// 删除前的确认对话。
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// 用户取消，未发出请求。
    Cancelled,
}

pub struct AssetListScreen {
    client: PatrimonyClient,
    refresh: RefreshCounter,
    filter: Mutex<AssetFilter>,
    state: ScreenState<Vec<AssetRecord>>,
}

impl AssetListScreen {
    pub fn new(client: PatrimonyClient, refresh: RefreshCounter) -> Self {
        Self {
            client,
            refresh,
            filter: Mutex::new(AssetFilter::default()),
            state: ScreenState::new(),
        }
    }

    pub fn filter(&self) -> AssetFilter {
        *self.filter.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> ViewState<Vec<AssetRecord>> {
        self.state.snapshot()
    }

    /// 修改过滤条件并重新加载。
    pub async fn set_filter(&self, filter: AssetFilter) -> LoadOutcome {
        *self.filter.lock().unwrap_or_else(PoisonError::into_inner) = filter;
        self.refresh().await
    }

    pub async fn refresh(&self) -> LoadOutcome {
        let filter = self.filter();
        self.state.load(|| self.client.list(&filter)).await
    }

    /// 确认后删除；成功后递增刷新计数并重新加载。
    pub async fn delete(
        &self,
        id: &str,
        confirmer: &dyn Confirmer,
    ) -> Result<DeleteOutcome, ClientError> {
        let prompt = match self.find(id) {
            Some(record) => format!(
                "Delete patrimony {} ({})? This cannot be undone.",
                record.plate, record.name
            ),
            None => format!("Delete patrimony {id}? This cannot be undone."),
        };
        if !confirmer.confirm(&prompt).await {
            info!(id, "delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }
        if let Err(err) = self.client.delete(id).await {
            self.state.record_error(err.clone());
            return Err(err);
        }
        self.refresh.bump(RefreshReason::RecordDeleted);
        self.refresh().await;
        Ok(DeleteOutcome::Deleted)
    }

    /// 订阅刷新计数，变化时重新加载。
    pub fn bind_refresh(self: &Arc<Self>) -> JoinHandle<()> {
        let screen = Arc::clone(self);
        let mut receiver = self.refresh.subscribe();
        tokio::spawn(async move {
            while receiver.changed().await.is_ok() {
                receiver.borrow_and_update();
                screen.refresh().await;
            }
        })
    }

    fn find(&self, id: &str) -> Option<AssetRecord> {
        self.state
            .data()?
            .into_iter()
            .find(|record| record.id == id)
    }
}

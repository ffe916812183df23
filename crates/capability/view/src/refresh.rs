//! 全局刷新计数。

use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// 触发刷新的事件。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    RecordSaved,
    TransferCompleted,
    RecordDeleted,
}

impl RefreshReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshReason::RecordSaved => "record_saved",
            RefreshReason::TransferCompleted => "transfer_completed",
            RefreshReason::RecordDeleted => "record_deleted",
        }
    }
}

impl fmt::Display for RefreshReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单调递增计数；屏幕订阅后在变化时重新拉取。
#[derive(Clone)]
pub struct RefreshCounter {
    sender: Arc<watch::Sender<u64>>,
}

impl Default for RefreshCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshCounter {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(0);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn current(&self) -> u64 {
        *self.sender.borrow()
    }

    pub fn bump(&self, reason: RefreshReason) -> u64 {
        let mut next = 0;
        self.sender.send_modify(|value| {
            *value += 1;
            next = *value;
        });
        info!(%reason, generation = next, "refresh requested");
        next
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_see_bumps() {
        let counter = RefreshCounter::new();
        let mut receiver = counter.subscribe();
        assert_eq!(counter.bump(RefreshReason::RecordSaved), 1);
        receiver.changed().await.expect("changed");
        assert_eq!(*receiver.borrow_and_update(), 1);
        assert_eq!(counter.clone().bump(RefreshReason::RecordDeleted), 2);
        assert_eq!(counter.current(), 2);
    }
}

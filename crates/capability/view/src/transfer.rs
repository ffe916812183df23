//! 转移屏幕。

use crate::refresh::{RefreshCounter, RefreshReason};
use crate::state::{LoadOutcome, ScreenState, ViewState};
use domain::{AssetRecord, TransferRecord};
use patrimony_client::{ClientError, TransferReceipt, TransferWorkflow};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct TransferScreen {
    workflow: TransferWorkflow,
    refresh: RefreshCounter,
    /// 成功转移后同步为新部门，后续提交以此为来源。
    record: Mutex<AssetRecord>,
    state: ScreenState<TransferReceipt>,
    history: ScreenState<Vec<TransferRecord>>,
}

impl TransferScreen {
    pub fn new(workflow: TransferWorkflow, refresh: RefreshCounter, record: AssetRecord) -> Self {
        Self {
            workflow,
            refresh,
            record: Mutex::new(record),
            state: ScreenState::new(),
            history: ScreenState::new(),
        }
    }

    pub fn record(&self) -> AssetRecord {
        self.lock_record().clone()
    }

    pub fn state(&self) -> ViewState<TransferReceipt> {
        self.state.snapshot()
    }

    pub fn history(&self) -> ViewState<Vec<TransferRecord>> {
        self.history.snapshot()
    }

    /// 提交转移；成功后递增刷新计数。
    pub async fn submit(
        &self,
        destination: &str,
        reason: &str,
    ) -> Result<TransferReceipt, ClientError> {
        let record = self.record();
        self.state.begin();
        match self.workflow.submit(&record, destination, reason).await {
            Ok(receipt) => {
                self.lock_record().department = receipt.to_department;
                self.state.succeed(receipt.clone());
                self.refresh.bump(RefreshReason::TransferCompleted);
                Ok(receipt)
            }
            Err(err) => {
                self.state.fail(err.clone());
                Err(err)
            }
        }
    }

    pub async fn load_history(&self) -> LoadOutcome {
        let asset_id = self.lock_record().id.clone();
        self.history
            .load(|| self.workflow.history(Some(asset_id.as_str())))
            .await
    }

    fn lock_record(&self) -> MutexGuard<'_, AssetRecord> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

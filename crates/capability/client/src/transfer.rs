//! 部门转移流程。

use crate::error::ClientError;
use crate::executor::ApiExecutor;
use crate::patrimony::encode;
use crate::transport::ApiRequest;
use api_contract::{TRANSFER_PATH, TRANSFERS_PATH, TransferPayload, WireTransfer, transfer_item_path};
use domain::{AssetRecord, Department, TransferRecord, TransferRequest};
use patrimony_telemetry::record_validation_rejection;
use std::sync::Arc;
use tracing::info;

/// 转移回执。
///
/// 服务端返回的记录按宽松方式解析；无法解析时 `record` 为 None，
/// 转移本身仍视为成功。
#[derive(Debug, Clone, PartialEq)]
pub struct TransferReceipt {
    pub asset_id: String,
    pub from_department: Department,
    pub to_department: Department,
    pub record: Option<TransferRecord>,
}

#[derive(Clone)]
pub struct TransferWorkflow {
    executor: Arc<ApiExecutor>,
}

impl TransferWorkflow {
    pub fn new(executor: Arc<ApiExecutor>) -> Self {
        Self { executor }
    }

    /// 校验并提交转移；校验失败时不发出请求。
    pub async fn submit(
        &self,
        record: &AssetRecord,
        destination: &str,
        reason: &str,
    ) -> Result<TransferReceipt, ClientError> {
        let request = TransferRequest::new(record, destination, reason).map_err(|err| {
            record_validation_rejection();
            ClientError::Validation(err)
        })?;
        let body = encode(&TransferPayload::from(&request))?;
        let response = self
            .executor
            .execute(ApiRequest::post(TRANSFER_PATH).json(body))
            .await?;
        let record = serde_json::from_str::<WireTransfer>(&response.body)
            .ok()
            .and_then(|wire| wire.into_record().ok());
        info!(
            asset_id = %request.asset_id,
            from = %request.from_department,
            to = %request.to_department,
            "patrimony transferred"
        );
        Ok(TransferReceipt {
            asset_id: request.asset_id,
            from_department: request.from_department,
            to_department: request.to_department,
            record,
        })
    }

    /// 转移历史；指定资产时只返回该资产的记录。
    pub async fn history(&self, asset_id: Option<&str>) -> Result<Vec<TransferRecord>, ClientError> {
        let request = ApiRequest::get(TRANSFERS_PATH).query("patrimony_id", asset_id);
        let response = self.executor.execute(request).await?;
        WireTransfer::decode_list(&response.body)
            .map_err(|err| ClientError::invalid_body(response.status.as_u16(), &err))
    }

    pub async fn get(&self, id: &str) -> Result<TransferRecord, ClientError> {
        let response = self
            .executor
            .execute(ApiRequest::get(transfer_item_path(id)))
            .await?;
        serde_json::from_str::<WireTransfer>(&response.body)
            .map_err(Into::into)
            .and_then(WireTransfer::into_record)
            .map_err(|err| ClientError::invalid_body(response.status.as_u16(), &err))
    }
}

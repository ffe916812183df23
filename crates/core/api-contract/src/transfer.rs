//! 转移请求体与历史记录映射。

use crate::error::ContractError;
use crate::lenient::{self, non_empty};
use chrono::{DateTime, Utc};
use domain::{TransferRecord, TransferRequest};
use serde::{Deserialize, Serialize};

/// 转移请求体。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPayload {
    pub patrimony_id: String,
    pub from_department: String,
    pub to_department: String,
    pub reason: String,
}

impl From<&TransferRequest> for TransferPayload {
    fn from(request: &TransferRequest) -> Self {
        Self {
            patrimony_id: request.asset_id.clone(),
            from_department: request.from_department.as_str().to_string(),
            to_department: request.to_department.as_str().to_string(),
            reason: request.reason.clone(),
        }
    }
}

/// 后端返回的转移记录。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireTransfer {
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub patrimony_id: Option<String>,
    #[serde(default)]
    pub patrimony_name: Option<String>,
    #[serde(default)]
    pub from_department: String,
    #[serde(default)]
    pub to_department: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub transferred_by_name: Option<String>,
    #[serde(default)]
    pub transferred_at: Option<String>,
}

impl WireTransfer {
    pub fn into_record(self) -> Result<TransferRecord, ContractError> {
        Ok(TransferRecord {
            id: self.id.ok_or(ContractError::MissingField("id"))?,
            asset_id: self
                .patrimony_id
                .ok_or(ContractError::MissingField("patrimony_id"))?,
            asset_name: non_empty(self.patrimony_name),
            from_department: self.from_department,
            to_department: self.to_department,
            reason: self.reason,
            transferred_by: non_empty(self.transferred_by_name),
            transferred_at: self
                .transferred_at
                .as_deref()
                .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
                .map(|value| value.with_timezone(&Utc)),
        })
    }

    pub fn decode_list(body: &str) -> Result<Vec<TransferRecord>, ContractError> {
        let items: Vec<WireTransfer> = serde_json::from_str(body)?;
        items.into_iter().map(WireTransfer::into_record).collect()
    }
}

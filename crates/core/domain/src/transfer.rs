//! 部门转移命令。

use crate::asset::{AssetRecord, Department};
use crate::validation::{ValidationError, require};
use chrono::{DateTime, Utc};

/// 一次性转移命令：提交后即丢弃，客户端不持久化。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub asset_id: String,
    pub from_department: Department,
    pub to_department: Department,
    pub reason: String,
}

impl TransferRequest {
    /// 校验并构造转移命令。
    ///
    /// 目标部门为空、原因为空、目标部门未知或与当前部门相同时返回错误。
    pub fn new(
        record: &AssetRecord,
        destination: &str,
        reason: &str,
    ) -> Result<Self, ValidationError> {
        let destination = require(destination, "to_department")?;
        let reason = require(reason, "reason")?;
        let to_department = Department::parse(&destination).ok_or_else(|| {
            ValidationError::new("to_department", format!("unknown department: {destination}"))
        })?;
        if to_department == record.department {
            return Err(ValidationError::new(
                "to_department",
                "destination must differ from the current department",
            ));
        }
        Ok(Self {
            asset_id: record.id.clone(),
            from_department: record.department,
            to_department,
            reason,
        })
    }
}

/// 服务端记录的转移历史条目（只读）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    pub id: String,
    pub asset_id: String,
    pub asset_name: Option<String>,
    pub from_department: String,
    pub to_department: String,
    pub reason: String,
    pub transferred_by: Option<String>,
    pub transferred_at: Option<DateTime<Utc>>,
}

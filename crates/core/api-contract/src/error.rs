//! 错误体解析与契约映射错误。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 线上数据映射为领域模型时的错误。
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("invalid response body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("unknown department: {0}")]
    UnknownDepartment(String),
    #[error("unknown status: {0}")]
    UnknownStatus(String),
    #[error("missing field: {0}")]
    MissingField(&'static str),
}

/// 失败响应的错误体（字段均可选）。
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// 按 error → message → details 顺序取第一个非空字段。
    pub fn first_message(&self) -> Option<&str> {
        [&self.error, &self.message, &self.details]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .map(str::trim)
            .find(|text| !text.is_empty())
    }
}

/// 从失败响应中提取面向用户的错误信息。
///
/// 依次尝试：JSON 对象的 error/message/details 字段、JSON 字符串、
/// 原始响应体，最后退化为状态行。
pub fn decode_error_message(status: u16, reason: &str, body: &str) -> String {
    let trimmed = body.trim();
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(text)) if !text.trim().is_empty() => return text.trim().to_string(),
        Ok(value @ Value::Object(_)) => {
            if let Ok(error_body) = serde_json::from_value::<ErrorBody>(value) {
                if let Some(message) = error_body.first_message() {
                    return message.to_string();
                }
            }
        }
        _ => {}
    }
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    format!("HTTP {status} {reason}").trim_end().to_string()
}

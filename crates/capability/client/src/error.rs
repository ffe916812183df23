//! 客户端统一错误。

use api_contract::ContractError;
use domain::ValidationError;
use patrimony_auth::SESSION_EXPIRED_NOTICE;

/// 网络不可达时给用户的提示。
pub const NETWORK_ERROR_MESSAGE: &str =
    "Could not reach the server. Check that it is running and try again.";

/// 客户端操作错误。
///
/// 不做自动重试；失败原样交给界面层展示。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// 本地校验失败，未发出请求。
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// 401：会话已清除。
    #[error("session expired")]
    AuthExpired,
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
    /// 未收到响应。
    #[error("network error: {0}")]
    Network(String),
}

impl ClientError {
    /// 成功响应但响应体无法解析。
    pub(crate) fn invalid_body(status: u16, err: &ContractError) -> Self {
        let message = match err {
            ContractError::Body(_) => err.to_string(),
            other => format!("invalid response body: {other}"),
        };
        ClientError::Server { status, message }
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ClientError::AuthExpired)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 面向用户的提示文本。
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(err) => err.to_string(),
            ClientError::AuthExpired => SESSION_EXPIRED_NOTICE.to_string(),
            ClientError::Server { message, .. } => friendly_server_message(message),
            ClientError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
        }
    }
}

/// 常见数据库错误改写为可读提示，其余原样返回。
fn friendly_server_message(message: &str) -> String {
    let lowered = message.to_lowercase();
    if lowered.contains("duplicate key") || lowered.contains("already exists") {
        "An item with this plate already exists. Use a unique plate.".to_string()
    } else if lowered.contains("null value") {
        "Required fields were not filled in correctly.".to_string()
    } else if lowered.contains("invalid input") {
        "Some values have an invalid format. Check the data entered.".to_string()
    } else {
        message.to_string()
    }
}

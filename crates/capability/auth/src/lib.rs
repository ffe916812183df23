//! 认证能力：请求头生成、401 拦截、会话状态机。

mod headers;
mod interceptor;
mod session;

pub use headers::{BodyKind, auth_headers};
pub use interceptor::{AuthInterceptor, SESSION_EXPIRED_NOTICE, is_auth_failure};
pub use session::{AuthState, SessionManager};

use patrimony_storage::StorageError;

/// 认证相关错误。
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),
}

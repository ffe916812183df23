//! 401 拦截：任何接口返回 401 都视为会话失效。

use crate::session::SessionManager;
use patrimony_telemetry::record_auth_expiration;
use std::sync::Arc;
use tracing::warn;

/// 会话过期提示。
pub const SESSION_EXPIRED_NOTICE: &str = "Session expired. Please log in again.";

/// 仅 401 视为认证失败。
pub fn is_auth_failure(status: u16) -> bool {
    status == 401
}

#[derive(Clone)]
pub struct AuthInterceptor {
    sessions: Arc<SessionManager>,
}

impl AuthInterceptor {
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self { sessions }
    }

    /// 检查响应状态；返回 true 时调用方必须立即中止，不再解析响应体。
    pub async fn intercept(&self, status: u16) -> bool {
        if !is_auth_failure(status) {
            return false;
        }
        record_auth_expiration();
        warn!(status, "authentication rejected, clearing session");
        if let Err(err) = self.sessions.expire(SESSION_EXPIRED_NOTICE).await {
            warn!(error = %err, "failed to clear persisted session");
        }
        true
    }
}

//! 请求头生成：会话 + 请求体类型的纯函数。

use domain::Session;
use http::HeaderMap;
use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use tracing::warn;

/// 请求体类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Empty,
    Json,
    /// multipart 由传输层设置带 boundary 的 Content-Type。
    Multipart,
}

/// 生成认证请求头。
///
/// - 非 multipart 请求总是带 `Content-Type: application/json`
/// - 仅当存在 token 时带 `Authorization: Bearer <token>`
pub fn auth_headers(session: &Session, body: BodyKind) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if body != BodyKind::Multipart {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    if let Some(token) = session.bearer() {
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => warn!("session token contains invalid header characters, sending without it"),
        }
    }
    headers
}

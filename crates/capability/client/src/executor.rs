//! 统一请求执行。
//!
//! 每次调用：生成请求头与 request_id → 发送 → 401 拦截 → 非 2xx 解码错误信息。
//! 401 检查先于任何响应体处理。

use crate::error::ClientError;
use crate::transport::{ApiRequest, RawResponse, Transport};
use api_contract::decode_error_message;
use http::HeaderValue;
use patrimony_auth::{AuthInterceptor, SessionManager, auth_headers};
use patrimony_telemetry::{
    new_request_ids, record_network_failure, record_request_failure, record_request_latency_ms,
    record_request_sent,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, debug, info_span, warn};

pub struct ApiExecutor {
    transport: Arc<dyn Transport>,
    sessions: Arc<SessionManager>,
    interceptor: AuthInterceptor,
    upload_base: String,
}

impl ApiExecutor {
    pub fn new(
        transport: Arc<dyn Transport>,
        sessions: Arc<SessionManager>,
        upload_base: impl Into<String>,
    ) -> Self {
        let interceptor = AuthInterceptor::new(sessions.clone());
        Self {
            transport,
            sessions,
            interceptor,
            upload_base: upload_base.into(),
        }
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    /// 上传文件访问前缀。
    pub fn upload_base(&self) -> &str {
        &self.upload_base
    }

    /// 执行需认证的请求；只返回 2xx 响应。
    pub async fn execute(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        self.dispatch(request, true).await
    }

    /// 执行不经 401 拦截的请求（登录）。
    pub async fn execute_unintercepted(
        &self,
        request: ApiRequest,
    ) -> Result<RawResponse, ClientError> {
        self.dispatch(request, false).await
    }

    async fn dispatch(
        &self,
        mut request: ApiRequest,
        intercept: bool,
    ) -> Result<RawResponse, ClientError> {
        let session = self.sessions.snapshot();
        let ids = new_request_ids();
        request
            .headers
            .extend(auth_headers(&session, request.body.kind()));
        if let Ok(value) = HeaderValue::from_str(&ids.request_id) {
            request.headers.insert("x-request-id", value);
        }
        if let Ok(value) = HeaderValue::from_str(&ids.trace_id) {
            request.headers.insert("x-trace-id", value);
        }

        let span = info_span!(
            "request",
            request_id = %ids.request_id,
            trace_id = %ids.trace_id,
            method = %request.method,
            path = %request.path
        );
        async move {
            record_request_sent();
            let started = Instant::now();
            let result = self.transport.send(request).await;
            record_request_latency_ms(started.elapsed().as_millis() as u64);

            let response = match result {
                Ok(response) => response,
                Err(err) => {
                    record_network_failure();
                    warn!(error = %err, "request failed without response");
                    return Err(ClientError::Network(err.to_string()));
                }
            };

            let status = response.status.as_u16();
            if intercept && self.interceptor.intercept(status).await {
                return Err(ClientError::AuthExpired);
            }
            if !response.status.is_success() {
                record_request_failure();
                let message = decode_error_message(status, response.reason(), &response.body);
                warn!(status, %message, "request rejected");
                return Err(ClientError::Server { status, message });
            }
            debug!(status, "request completed");
            Ok(response)
        }
        .instrument(span)
        .await
    }
}

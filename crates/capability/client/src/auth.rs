//! 登录、注册、token 探针与登出。

use crate::error::ClientError;
use crate::executor::ApiExecutor;
use crate::patrimony::{decode, encode};
use crate::transport::ApiRequest;
use api_contract::{
    HEALTH_PATH, LOGIN_PATH, LoginRequest, LoginResponse, REGISTER_PATH, RegisterRequest,
    WireUser,
};
use domain::validation::require;
use domain::{Session, UserProfile, ValidationError};
use patrimony_telemetry::record_validation_rejection;
use std::sync::Arc;
use tracing::{info, warn};

/// 登录失败提示。
const INVALID_CREDENTIALS: &str = "invalid credentials";

#[derive(Clone)]
pub struct AuthClient {
    executor: Arc<ApiExecutor>,
}

impl AuthClient {
    pub fn new(executor: Arc<ApiExecutor>) -> Self {
        Self { executor }
    }

    /// 登录并建立会话。
    ///
    /// 登录接口的 401 表示凭证错误，不触发会话过期处理。
    pub async fn login(&self, username: &str, password: &str) -> Result<UserProfile, ClientError> {
        let username = require(username, "username").map_err(rejected)?;
        if password.is_empty() {
            return Err(rejected(ValidationError::new("password", "required")));
        }
        let request = ApiRequest::post(LOGIN_PATH).json(encode(&LoginRequest {
            username,
            password: password.to_string(),
        })?);
        let response = match self.executor.execute_unintercepted(request).await {
            Ok(response) => response,
            Err(ClientError::Server { status: 401, .. }) => {
                return Err(ClientError::Server {
                    status: 401,
                    message: INVALID_CREDENTIALS.to_string(),
                });
            }
            Err(err) => return Err(err),
        };
        let login: LoginResponse = decode(&response)?;
        let profile = login.user.into_profile();
        if let Err(err) = self
            .executor
            .sessions()
            .establish(Session::new(login.token, profile.clone()))
            .await
        {
            warn!(error = %err, "session could not be persisted");
        }
        info!(username = %profile.username, "logged in");
        Ok(profile)
    }

    /// 注册新用户；不自动登录。
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, ClientError> {
        let company_name = require(&request.company_name, "company_name").map_err(rejected)?;
        let department = require(&request.department, "department").map_err(rejected)?;
        let username = require(&request.username, "username").map_err(rejected)?;
        if request.password.is_empty() {
            return Err(rejected(ValidationError::new("password", "required")));
        }
        let body = RegisterRequest {
            company_name,
            department,
            username,
            password: request.password.clone(),
            email: request.email.clone().filter(|email| !email.trim().is_empty()),
            role: request.role.clone().filter(|role| !role.trim().is_empty()),
        };
        let body = encode(&body)?;
        let response = self
            .executor
            .execute_unintercepted(ApiRequest::post(REGISTER_PATH).json(body))
            .await?;
        let user: WireUser = decode(&response)?;
        Ok(user.into_profile())
    }

    /// token 探针：无 token 时不发请求；任何失败都视为无效。
    pub async fn check_token_validity(&self) -> bool {
        if !self.executor.sessions().snapshot().is_authenticated() {
            return false;
        }
        self.executor
            .execute(ApiRequest::get(HEALTH_PATH))
            .await
            .is_ok()
    }

    pub async fn logout(&self) {
        if let Err(err) = self.executor.sessions().logout().await {
            warn!(error = %err, "persisted session could not be cleared");
        }
        info!("logged out");
    }
}

fn rejected(err: ValidationError) -> ClientError {
    record_validation_rejection();
    ClientError::Validation(err)
}

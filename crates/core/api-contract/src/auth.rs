//! 登录、注册请求与用户资料映射。

use crate::lenient::{self, non_empty};
use domain::UserProfile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 登录成功响应：token + 用户资料。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: WireUser,
}

/// 注册请求；role 缺省时由服务端填 `user`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub company_name: String,
    pub department: String,
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// 后端返回的用户结构。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireUser {
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl WireUser {
    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username,
            role: non_empty(self.role).unwrap_or_else(|| "user".to_string()),
            department: self.department,
            company_name: self.company_name,
            email: non_empty(self.email),
        }
    }
}

impl From<&UserProfile> for WireUser {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.clone(),
            username: profile.username.clone(),
            role: Some(profile.role.clone()),
            department: profile.department.clone(),
            company_name: profile.company_name.clone(),
            email: profile.email.clone(),
        }
    }
}

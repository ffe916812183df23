//! 会话：凭证 token 与用户资料。

use serde::{Deserialize, Serialize};

/// 登录用户资料。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<String>,
    pub username: String,
    pub role: String,
    pub department: String,
    pub company_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// 进程级会话状态。
///
/// 显式传入客户端与请求头生成逻辑，不从环境存储隐式读取。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    /// 未登录会话。
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// 非空 token 才视为可用。
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer().is_some()
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

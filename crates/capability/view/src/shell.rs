//! 外壳：未登录时只渲染登录页。

use patrimony_auth::{AuthState, SessionManager};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellView {
    /// `notice` 为会话过期等阻断提示。
    Login { notice: Option<String> },
    Workspace { username: String },
}

#[derive(Clone)]
pub struct AppShell {
    sessions: Arc<SessionManager>,
}

impl AppShell {
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self { sessions }
    }

    pub fn view(&self) -> ShellView {
        match self.sessions.state() {
            AuthState::Authenticated { username } => ShellView::Workspace { username },
            AuthState::Unauthenticated { notice } => ShellView::Login { notice },
        }
    }

    /// 无 token 时禁止渲染数据视图。
    pub fn can_render_data(&self) -> bool {
        self.sessions.is_authenticated()
    }

    pub fn acknowledge_notice(&self) {
        self.sessions.acknowledge_notice();
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.sessions.subscribe()
    }
}

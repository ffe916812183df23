//! 会话管理：内存会话、持久化与显式认证状态。
//!
//! 认证状态通过 watch 通道广播，界面据此切换登录页，
//! 不依赖整页刷新，也不丢弃已加载的界面数据。

use crate::AuthError;
use domain::Session;
use patrimony_storage::SessionStore;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::info;

/// 显式认证状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Authenticated {
        username: String,
    },
    /// `notice` 为需要用户确认的阻断提示（如会话过期）。
    Unauthenticated {
        notice: Option<String>,
    },
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }

    pub fn notice(&self) -> Option<&str> {
        match self {
            AuthState::Unauthenticated { notice } => notice.as_deref(),
            AuthState::Authenticated { .. } => None,
        }
    }

    fn from_session(session: &Session) -> Self {
        if !session.is_authenticated() {
            return AuthState::Unauthenticated { notice: None };
        }
        AuthState::Authenticated {
            username: session
                .user
                .as_ref()
                .map(|user| user.username.clone())
                .unwrap_or_default(),
        }
    }
}

/// 进程级会话管理器。
///
/// 内存锁只在同步读写时持有，不跨 await。
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    session: RwLock<Session>,
    state: watch::Sender<AuthState>,
}

impl SessionManager {
    /// 以未登录状态创建。
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self::with_session(store, Session::anonymous())
    }

    fn with_session(store: Arc<dyn SessionStore>, session: Session) -> Self {
        let (state, _) = watch::channel(AuthState::from_session(&session));
        Self {
            store,
            session: RwLock::new(session),
            state,
        }
    }

    /// 启动时从持久化存储恢复会话。
    pub async fn restore(store: Arc<dyn SessionStore>) -> Result<Self, AuthError> {
        let session = store.load().await?;
        info!(authenticated = session.is_authenticated(), "session restored");
        Ok(Self::with_session(store, session))
    }

    /// 当前会话副本。
    pub fn snapshot(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// 登录成功：切换为已认证并持久化。
    ///
    /// 持久化失败时本进程内会话仍然有效，错误交给调用方决定是否提示。
    pub async fn establish(&self, session: Session) -> Result<(), AuthError> {
        if !session.is_authenticated() {
            return Err(AuthError::NotAuthenticated);
        }
        let state = AuthState::from_session(&session);
        self.replace(session.clone());
        self.state.send_replace(state);
        self.store.save(&session).await?;
        Ok(())
    }

    /// 主动登出。
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.replace(Session::anonymous());
        self.state
            .send_replace(AuthState::Unauthenticated { notice: None });
        self.store.clear().await?;
        Ok(())
    }

    /// 会话失效：先清内存并切换状态，再清持久化。
    ///
    /// 持久化清除失败时内存状态仍保持未登录。
    pub async fn expire(&self, notice: impl Into<String>) -> Result<(), AuthError> {
        self.replace(Session::anonymous());
        self.state.send_replace(AuthState::Unauthenticated {
            notice: Some(notice.into()),
        });
        self.store.clear().await?;
        Ok(())
    }

    /// 用户确认提示后清除 notice。
    pub fn acknowledge_notice(&self) {
        self.state.send_if_modified(|state| match state {
            AuthState::Unauthenticated { notice } if notice.is_some() => {
                *notice = None;
                true
            }
            _ => false,
        });
    }

    fn replace(&self, session: Session) {
        match self.session.write() {
            Ok(mut guard) => *guard = session,
            Err(poisoned) => *poisoned.into_inner() = session,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::UserProfile;
    use patrimony_storage::{InMemoryKeyValueStore, KeyValueSessionStore};

    #[tokio::test]
    async fn poisoned_lock_keeps_current_session() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let manager = SessionManager::new(Arc::new(KeyValueSessionStore::new(kv)));
        let profile = UserProfile {
            id: None,
            username: "ana".to_string(),
            role: "admin".to_string(),
            department: "administration".to_string(),
            company_name: "Prefeitura".to_string(),
            email: None,
        };
        manager
            .establish(Session::new("tok-1", profile))
            .await
            .expect("establish");

        std::thread::scope(|scope| {
            let crashed = scope
                .spawn(|| {
                    let _guard = manager.session.write();
                    panic!("writer crashed");
                })
                .join();
            assert!(crashed.is_err());
        });
        assert!(manager.session.is_poisoned());

        let session = manager.snapshot();
        assert_eq!(session.token.as_deref(), Some("tok-1"));
        assert!(session.is_authenticated());
    }
}

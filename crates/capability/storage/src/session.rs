//! 基于键值存储的会话存储。

use crate::error::StorageError;
use crate::traits::{KeyValueStore, SessionStore};
use domain::{Session, UserProfile};
use std::sync::Arc;
use tracing::warn;

/// token 键。
pub const TOKEN_KEY: &str = "token";
/// 用户资料键（JSON）。
pub const USER_KEY: &str = "user";

pub struct KeyValueSessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueSessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl SessionStore for KeyValueSessionStore {
    async fn load(&self) -> Result<Session, StorageError> {
        let token = self
            .store
            .get(TOKEN_KEY)
            .await?
            .filter(|token| !token.is_empty());
        let user = self.store.get(USER_KEY).await?;
        let (Some(token), Some(user)) = (token, user) else {
            return Ok(Session::anonymous());
        };
        match serde_json::from_str::<UserProfile>(&user) {
            Ok(user) => Ok(Session::new(token, user)),
            Err(err) => {
                warn!(error = %err, "stored user profile unreadable, treating as logged out");
                Ok(Session::anonymous())
            }
        }
    }

    async fn save(&self, session: &Session) -> Result<(), StorageError> {
        let (Some(token), Some(user)) = (session.bearer(), session.user.as_ref()) else {
            return self.clear().await;
        };
        let user = serde_json::to_string(user)?;
        self.store.set(TOKEN_KEY, token).await?;
        self.store.set(USER_KEY, &user).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(USER_KEY).await
    }
}

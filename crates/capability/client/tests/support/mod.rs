#![allow(dead_code)]

use std::sync::Arc;

use domain::{AssetFields, Session, UserProfile};
use patrimony_auth::SessionManager;
use patrimony_client::{ApiExecutor, InMemoryBackend};
use patrimony_storage::{InMemoryKeyValueStore, KeyValueSessionStore};

pub const UPLOAD_BASE: &str = "http://localhost:8080";

pub struct Harness {
    pub backend: Arc<InMemoryBackend>,
    pub kv: Arc<InMemoryKeyValueStore>,
    pub sessions: Arc<SessionManager>,
    pub executor: Arc<ApiExecutor>,
}

pub fn admin_profile() -> UserProfile {
    UserProfile {
        id: Some("user-1".to_string()),
        username: "admin".to_string(),
        role: "admin".to_string(),
        department: "administration".to_string(),
        company_name: "Prefeitura Municipal".to_string(),
        email: None,
    }
}

/// 未登录的客户端。
pub fn anonymous() -> Harness {
    let backend = Arc::new(InMemoryBackend::with_default_admin());
    let kv = Arc::new(InMemoryKeyValueStore::new());
    let store = Arc::new(KeyValueSessionStore::new(kv.clone()));
    let sessions = Arc::new(SessionManager::new(store));
    let executor = Arc::new(ApiExecutor::new(
        backend.clone(),
        sessions.clone(),
        UPLOAD_BASE,
    ));
    Harness {
        backend,
        kv,
        sessions,
        executor,
    }
}

/// 以 admin 登录的客户端。
pub async fn logged_in() -> Harness {
    let harness = anonymous();
    let token = harness.backend.issue_token("admin").expect("token");
    harness
        .sessions
        .establish(Session::new(token, admin_profile()))
        .await
        .expect("session");
    harness
}

pub fn desk() -> AssetFields {
    AssetFields {
        plate: "PAT-001".to_string(),
        name: "Desk".to_string(),
        department: "administration".to_string(),
        value: "150.00".to_string(),
        status: "active".to_string(),
        ..AssetFields::default()
    }
}

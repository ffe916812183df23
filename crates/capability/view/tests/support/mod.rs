#![allow(dead_code)]

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use domain::{AssetFields, Session, UserProfile};
use patrimony_auth::SessionManager;
use patrimony_client::{
    ApiExecutor, ApiRequest, InMemoryBackend, RawResponse, Transport, TransportError,
};
use patrimony_storage::{InMemoryKeyValueStore, KeyValueSessionStore};
use patrimony_view::Confirmer;
use tokio::sync::{Notify, oneshot};

pub const UPLOAD_BASE: &str = "http://localhost:8080";

pub struct Harness {
    pub backend: Arc<InMemoryBackend>,
    pub sessions: Arc<SessionManager>,
    pub executor: Arc<ApiExecutor>,
}

pub async fn logged_in_with(transport: Arc<dyn Transport>, backend: Arc<InMemoryBackend>) -> Harness {
    let store = Arc::new(KeyValueSessionStore::new(Arc::new(InMemoryKeyValueStore::new())));
    let sessions = Arc::new(SessionManager::new(store));
    let token = backend.issue_token("admin").expect("token");
    sessions
        .establish(Session::new(
            token,
            UserProfile {
                id: Some("user-1".to_string()),
                username: "admin".to_string(),
                role: "admin".to_string(),
                department: "administration".to_string(),
                company_name: "Prefeitura Municipal".to_string(),
                email: None,
            },
        ))
        .await
        .expect("session");
    let executor = Arc::new(ApiExecutor::new(transport, sessions.clone(), UPLOAD_BASE));
    Harness {
        backend,
        sessions,
        executor,
    }
}

pub async fn logged_in() -> Harness {
    let backend = Arc::new(InMemoryBackend::with_default_admin());
    logged_in_with(backend.clone(), backend).await
}

pub fn fields(plate: &str, department: &str) -> AssetFields {
    AssetFields {
        plate: plate.to_string(),
        name: "Desk".to_string(),
        department: department.to_string(),
        value: "150.00".to_string(),
        status: "active".to_string(),
        ..AssetFields::default()
    }
}

/// 固定回答的确认对话。
pub struct Answer(pub bool);

#[async_trait]
impl Confirmer for Answer {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// 第一个请求在闸门打开前挂起，其余请求直接转发。
pub struct GatedTransport {
    inner: Arc<InMemoryBackend>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    pub entered: Notify,
}

impl GatedTransport {
    pub fn new(inner: Arc<InMemoryBackend>) -> (Self, oneshot::Sender<()>) {
        let (open, gate) = oneshot::channel();
        let transport = Self {
            inner,
            gate: Mutex::new(Some(gate)),
            entered: Notify::new(),
        };
        (transport, open)
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let gate = self
            .gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(gate) = gate {
            self.entered.notify_one();
            let _ = gate.await;
        }
        self.inner.send(request).await
    }
}

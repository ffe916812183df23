//! 运行上下文：按启动参数组装存储、传输与各客户端。

use crate::cli::GlobalOptions;
use crate::commands::CliError;
use api_contract::WireAsset;
use patrimony_auth::SessionManager;
use patrimony_client::{
    ApiExecutor, AuthClient, HttpTransport, InMemoryBackend, PatrimonyClient, StatsAggregator,
    Transport, TransferWorkflow,
};
use patrimony_config::ClientConfig;
use patrimony_storage::{
    FileKeyValueStore, InMemoryKeyValueStore, KeyValueSessionStore, KeyValueStore,
};
use patrimony_view::{AppShell, RefreshCounter};
use std::sync::Arc;
use tracing::info;

pub struct AppContext {
    pub executor: Arc<ApiExecutor>,
    pub refresh: RefreshCounter,
    pub shell: AppShell,
}

impl AppContext {
    pub async fn build(config: &ClientConfig, options: &GlobalOptions) -> Result<Self, CliError> {
        let store: Arc<dyn KeyValueStore> = if options.ephemeral || options.demo {
            Arc::new(InMemoryKeyValueStore::new())
        } else {
            Arc::new(FileKeyValueStore::new(config.session_file.clone()))
        };
        let sessions =
            Arc::new(SessionManager::restore(Arc::new(KeyValueSessionStore::new(store))).await?);

        let transport: Arc<dyn Transport> = if options.demo {
            info!("using in-memory demo backend");
            Arc::new(demo_backend())
        } else {
            info!(api_url = %config.api_url, "using HTTP backend");
            Arc::new(HttpTransport::from_config(config)?)
        };

        let executor = Arc::new(ApiExecutor::new(
            transport,
            sessions.clone(),
            config.upload_base_url.clone(),
        ));
        Ok(Self {
            executor,
            refresh: RefreshCounter::new(),
            shell: AppShell::new(sessions),
        })
    }

    pub fn auth(&self) -> AuthClient {
        AuthClient::new(self.executor.clone())
    }

    pub fn patrimony(&self) -> PatrimonyClient {
        PatrimonyClient::new(self.executor.clone())
    }

    pub fn transfers(&self) -> TransferWorkflow {
        TransferWorkflow::new(self.executor.clone())
    }

    pub fn stats(&self) -> StatsAggregator {
        StatsAggregator::new(self.executor.clone())
    }
}

/// 演示后端：admin 账户与几条示例资产。
fn demo_backend() -> InMemoryBackend {
    let backend = InMemoryBackend::with_default_admin();
    let samples = [
        ("PAT-001", "Mesa de escritório", "administration", "active", 150.0),
        ("PAT-002", "Ambulância", "health", "maintenance", 185000.0),
        ("PAT-003", "Projetor", "education", "active", 3200.0),
        ("PAT-004", "Computador antigo", "education", "written_off", 900.0),
    ];
    for (plate, name, department, status, value) in samples {
        backend.insert_asset(WireAsset {
            plate: plate.to_string(),
            name: name.to_string(),
            department: department.to_string(),
            status: Some(status.to_string()),
            value: Some(value),
            acquisition_date: Some("2023-01-15".to_string()),
            ..WireAsset::default()
        });
    }
    backend
}

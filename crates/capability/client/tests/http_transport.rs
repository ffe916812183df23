use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use domain::{AssetFilter, Department, Session, UserProfile};
use patrimony_auth::SessionManager;
use patrimony_client::{ApiExecutor, ClientError, FileUpload, HttpTransport, PatrimonyClient};
use patrimony_storage::{InMemoryKeyValueStore, KeyValueSessionStore};
use serde_json::{Value, json};

async fn list(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let echo = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    let department = params
        .get("department")
        .cloned()
        .unwrap_or_else(|| "education".to_string());
    Json(json!([{
        "id": 7,
        "plate": "PAT-007",
        "name": "Projector",
        "description": authorization,
        "value": "320.50",
        "department": department,
        "status": params.get("status").cloned(),
        "invoice_number": echo("x-request-id"),
        "commitment_number": echo("x-trace-id"),
    }]))
}

async fn missing() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!("Patrimony not found")))
}

async fn upload(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if !content_type.starts_with("multipart/form-data") {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "No file provided" })));
    }
    (
        StatusCode::OK,
        Json(json!({ "message": "Image uploaded successfully", "image_url": "/uploads/x.png" })),
    )
}

async fn expired() -> (StatusCode, Json<Value>) {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Invalid token" })))
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/patrimony", get(list))
        .route("/api/patrimony/:id", get(missing))
        .route("/api/patrimony/:id/image", post(upload))
        .route("/api/stats", get(expired));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

async fn client_for(base_url: &str) -> (PatrimonyClient, Arc<SessionManager>) {
    let transport = HttpTransport::new(base_url, Some(Duration::from_secs(5))).expect("transport");
    let store = Arc::new(KeyValueSessionStore::new(Arc::new(InMemoryKeyValueStore::new())));
    let sessions = Arc::new(SessionManager::new(store));
    sessions
        .establish(Session::new(
            "abc",
            UserProfile {
                id: None,
                username: "admin".to_string(),
                role: "admin".to_string(),
                department: "administration".to_string(),
                company_name: "Prefeitura".to_string(),
                email: None,
            },
        ))
        .await
        .expect("session");
    let executor = Arc::new(ApiExecutor::new(
        Arc::new(transport),
        sessions.clone(),
        base_url,
    ));
    (PatrimonyClient::new(executor), sessions)
}

#[tokio::test]
async fn list_sends_bearer_and_filter() {
    let base = spawn_backend().await;
    let (client, _) = client_for(&base).await;

    let records = client
        .list(&AssetFilter::new(Some(Department::Health), None))
        .await
        .expect("list");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "7");
    assert_eq!(records[0].value, 320.5);
    assert_eq!(records[0].department, Department::Health);
    assert_eq!(records[0].description.as_deref(), Some("Bearer abc"));
}

#[tokio::test]
async fn each_request_carries_request_and_trace_ids() {
    let base = spawn_backend().await;
    let (client, _) = client_for(&base).await;

    let first = client.list(&AssetFilter::default()).await.expect("list");
    let second = client.list(&AssetFilter::default()).await.expect("list");
    let request_id = first[0].invoice.number.clone().expect("request id");
    let trace_id = first[0].commitment.number.clone().expect("trace id");
    assert!(!request_id.is_empty());
    assert!(!trace_id.is_empty());
    assert_ne!(request_id, trace_id);
    assert_ne!(second[0].invoice.number.as_deref(), Some(request_id.as_str()));
}

#[tokio::test]
async fn error_body_string_becomes_message() {
    let base = spawn_backend().await;
    let (client, _) = client_for(&base).await;

    let err = client.get("404").await.expect_err("missing");
    assert_eq!(
        err,
        ClientError::Server {
            status: 404,
            message: "Patrimony not found".to_string()
        }
    );
}

#[tokio::test]
async fn multipart_upload_uses_form_content_type() {
    let base = spawn_backend().await;
    let (client, _) = client_for(&base).await;

    let reference = client
        .upload_image("7", FileUpload::new("x.png", vec![1, 2, 3]))
        .await
        .expect("upload");
    assert_eq!(reference, Some(format!("{base}/uploads/x.png")));
}

#[tokio::test]
async fn unauthorized_expires_session() {
    let base = spawn_backend().await;
    let transport = HttpTransport::new(&base, None).expect("transport");
    assert_eq!(transport.base_url(), base);
    let (_, sessions) = client_for(&base).await;
    let executor = Arc::new(ApiExecutor::new(Arc::new(transport), sessions.clone(), &base));
    let stats = patrimony_client::StatsAggregator::new(executor);

    let err = stats.fetch(None).await.expect_err("expired");
    assert!(err.is_auth_expired());
    assert!(!sessions.is_authenticated());
}

#[tokio::test]
async fn closed_port_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let base = format!("http://{}", listener.local_addr().expect("addr"));
    drop(listener);
    let (client, sessions) = client_for(&base).await;

    let err = client
        .list(&AssetFilter::default())
        .await
        .expect_err("unreachable");
    assert!(matches!(err, ClientError::Network(_)));
    assert!(sessions.is_authenticated());
}

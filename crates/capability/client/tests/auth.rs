mod support;

use api_contract::RegisterRequest;
use patrimony_client::{AuthClient, ClientError};
use patrimony_storage::KeyValueStore;
use support::{anonymous, logged_in};

#[tokio::test]
async fn login_establishes_and_persists_session() {
    let harness = anonymous();
    let auth = AuthClient::new(harness.executor.clone());

    let profile = auth.login("admin", "admin123").await.expect("login");
    assert_eq!(profile.username, "admin");
    assert!(harness.sessions.is_authenticated());
    assert!(harness.kv.get("token").await.expect("get").is_some());
    assert!(auth.check_token_validity().await);
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials() {
    let harness = anonymous();
    let auth = AuthClient::new(harness.executor.clone());

    let err = auth.login("admin", "nope").await.expect_err("rejected");
    assert_eq!(
        err,
        ClientError::Server {
            status: 401,
            message: "invalid credentials".to_string()
        }
    );
    assert!(harness.sessions.state().notice().is_none());
}

#[tokio::test]
async fn token_check_without_token_sends_nothing() {
    let harness = anonymous();
    let auth = AuthClient::new(harness.executor.clone());
    assert!(!auth.check_token_validity().await);
    assert_eq!(harness.backend.request_count(), 0);
}

#[tokio::test]
async fn token_check_fails_after_expiry() {
    let harness = logged_in().await;
    let auth = AuthClient::new(harness.executor.clone());
    harness.backend.expire_sessions();
    assert!(!auth.check_token_validity().await);
    assert!(!harness.sessions.is_authenticated());
}

#[tokio::test]
async fn register_then_login() {
    let harness = anonymous();
    let auth = AuthClient::new(harness.executor.clone());
    let request = RegisterRequest {
        company_name: "Prefeitura".to_string(),
        department: "health".to_string(),
        username: "ana".to_string(),
        password: "secret".to_string(),
        email: Some(String::new()),
        role: None,
    };

    let profile = auth.register(&request).await.expect("register");
    assert_eq!(profile.role, "user");
    assert!(!harness.sessions.is_authenticated());

    let err = auth.register(&request).await.expect_err("duplicate");
    assert_eq!(err.status(), Some(400));

    auth.login("ana", "secret").await.expect("login");
    assert!(harness.sessions.is_authenticated());
}

#[tokio::test]
async fn logout_clears_everything() {
    let harness = logged_in().await;
    let auth = AuthClient::new(harness.executor.clone());
    auth.logout().await;
    assert!(!harness.sessions.is_authenticated());
    assert!(harness.kv.is_empty());
    assert!(harness.sessions.state().notice().is_none());
}

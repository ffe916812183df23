use domain::{Session, UserProfile};
use patrimony_storage::{
    InMemoryKeyValueStore, KeyValueSessionStore, KeyValueStore, SessionStore, TOKEN_KEY, USER_KEY,
};
use std::sync::Arc;

fn profile() -> UserProfile {
    UserProfile {
        id: Some("u-1".to_string()),
        username: "ana".to_string(),
        role: "admin".to_string(),
        department: "administration".to_string(),
        company_name: "Prefeitura".to_string(),
        email: None,
    }
}

#[tokio::test]
async fn save_then_load_restores_session() {
    let kv = Arc::new(InMemoryKeyValueStore::new());
    let sessions = KeyValueSessionStore::new(kv.clone());

    sessions
        .save(&Session::new("token-1", profile()))
        .await
        .expect("save");
    assert_eq!(kv.get(TOKEN_KEY).await.expect("get").as_deref(), Some("token-1"));

    let restored = sessions.load().await.expect("load");
    assert_eq!(restored.bearer(), Some("token-1"));
    assert_eq!(restored.user, Some(profile()));
}

#[tokio::test]
async fn token_without_user_is_logged_out() {
    let kv = Arc::new(InMemoryKeyValueStore::with_entries([(TOKEN_KEY, "token-1")]));
    let sessions = KeyValueSessionStore::new(kv);
    let session = sessions.load().await.expect("load");
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn unreadable_user_is_logged_out() {
    let kv = Arc::new(InMemoryKeyValueStore::with_entries([
        (TOKEN_KEY, "token-1"),
        (USER_KEY, "{broken"),
    ]));
    let sessions = KeyValueSessionStore::new(kv);
    assert_eq!(sessions.load().await.expect("load"), Session::anonymous());
}

#[tokio::test]
async fn clear_removes_both_keys() {
    let kv = Arc::new(InMemoryKeyValueStore::new());
    let sessions = KeyValueSessionStore::new(kv.clone());
    sessions
        .save(&Session::new("token-1", profile()))
        .await
        .expect("save");

    sessions.clear().await.expect("clear");
    assert!(kv.is_empty());

    sessions.save(&Session::anonymous()).await.expect("save anonymous");
    assert!(kv.is_empty());
}

use patrimony_storage::{FileKeyValueStore, KeyValueStore};

#[tokio::test]
async fn missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileKeyValueStore::new(dir.path().join("session.json"));
    assert!(store.get("token").await.expect("get").is_none());
    store.remove("token").await.expect("remove on empty");
    assert!(!store.path().exists());
}

#[tokio::test]
async fn values_survive_a_new_instance() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("session.json");

    let store = FileKeyValueStore::new(&path);
    store.set("token", "abc").await.expect("set token");
    store.set("user", r#"{"username":"ana"}"#).await.expect("set user");

    let reopened = FileKeyValueStore::new(&path);
    assert_eq!(reopened.get("token").await.expect("get").as_deref(), Some("abc"));
    assert_eq!(
        reopened.get("user").await.expect("get").as_deref(),
        Some(r#"{"username":"ana"}"#)
    );

    reopened.remove("token").await.expect("remove");
    assert!(store.get("token").await.expect("get").is_none());
    assert!(store.get("user").await.expect("get").is_some());
}

#[tokio::test]
async fn corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").expect("write");
    let store = FileKeyValueStore::new(&path);
    let err = store.get("token").await.expect_err("corrupt");
    assert!(err.to_string().starts_with("invalid stored data"));
}

use patrimony_storage::{InMemoryKeyValueStore, KeyValueStore};

#[tokio::test]
async fn set_get_remove() {
    let store = InMemoryKeyValueStore::new();
    assert!(store.get("token").await.expect("get").is_none());

    store.set("token", "abc").await.expect("set");
    assert_eq!(store.get("token").await.expect("get").as_deref(), Some("abc"));

    store.set("token", "def").await.expect("overwrite");
    assert_eq!(store.get("token").await.expect("get").as_deref(), Some("def"));
    assert_eq!(store.len(), 1);

    store.remove("token").await.expect("remove");
    store.remove("token").await.expect("remove twice");
    assert!(store.is_empty());
}

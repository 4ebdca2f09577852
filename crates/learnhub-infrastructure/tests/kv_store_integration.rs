use std::sync::Arc;

use learnhub_domain::KeyValueStore;
use learnhub_infrastructure::storage::{create_store, StorageBackend, SQLITE_STORE_FILE};
use sqlx::Row;

mod test_helpers;

#[tokio::test]
async fn sqlite_store_set_get_overwrite_remove() {
    let (database, store) = test_helpers::setup_in_memory_store().await;

    assert_eq!(store.get("darkMode").await.expect("get"), None);

    store.set("darkMode", "dark").await.expect("set");
    store.set("darkMode", "light").await.expect("overwrite");
    assert_eq!(
        store.get("darkMode").await.expect("get").as_deref(),
        Some("light")
    );

    let count: i64 = sqlx::query("SELECT COUNT(*) AS n FROM kv_store")
        .fetch_one(database.pool())
        .await
        .expect("count rows")
        .get("n");
    assert_eq!(count, 1);

    store.remove("darkMode").await.expect("remove");
    store.remove("darkMode").await.expect("remove missing key");
    assert_eq!(store.get("darkMode").await.expect("get"), None);
}

#[tokio::test]
async fn sqlite_backend_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");

    let store = create_store(StorageBackend::Sqlite, dir.path())
        .await
        .expect("open sqlite store");
    store
        .set("learning_streak_data", r#"{"currentStreak":2}"#)
        .await
        .expect("set");
    drop(store);

    assert!(dir.path().join(SQLITE_STORE_FILE).exists());

    let reopened = create_store(StorageBackend::Sqlite, dir.path())
        .await
        .expect("reopen sqlite store");
    assert_eq!(
        reopened
            .get("learning_streak_data")
            .await
            .expect("get")
            .as_deref(),
        Some(r#"{"currentStreak":2}"#)
    );
}

#[tokio::test]
async fn every_backend_behaves_the_same() {
    let dir = tempfile::tempdir().expect("tempdir");

    for backend in [
        StorageBackend::Memory,
        StorageBackend::File,
        StorageBackend::Sqlite,
    ] {
        let store: Arc<dyn KeyValueStore> = create_store(backend, dir.path())
            .await
            .expect("open store");

        store.set("k", "v1").await.expect("set");
        store.set("k", "v2").await.expect("overwrite");
        assert_eq!(store.get("k").await.expect("get").as_deref(), Some("v2"), "{backend}");

        store.remove("k").await.expect("remove");
        assert_eq!(store.get("k").await.expect("get"), None, "{backend}");
    }
}

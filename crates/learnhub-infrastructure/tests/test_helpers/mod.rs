use std::sync::Arc;

use learnhub_domain::KeyValueStore;
use learnhub_infrastructure::persistence::Database;
use learnhub_infrastructure::storage::SqliteKeyValueStore;

/// Fresh in-memory SQLite store with the schema applied
pub async fn setup_in_memory_store() -> (Database, Arc<dyn KeyValueStore>) {
    let database = Database::in_memory()
        .await
        .expect("open in-memory database");
    database.run_migrations().await.expect("run migrations");

    let store: Arc<dyn KeyValueStore> =
        Arc::new(SqliteKeyValueStore::new(Arc::new(database.pool().clone())));
    (database, store)
}

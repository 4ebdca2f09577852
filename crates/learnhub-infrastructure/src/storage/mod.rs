//! Key-value storage backends

mod file;
mod memory;
mod sqlite;

pub use file::JsonFileKeyValueStore;
pub use memory::InMemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

use learnhub_domain::shared::{DomainError, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::persistence::Database;

/// File name of the JSON backend under the data directory
pub const JSON_STORE_FILE: &str = "storage.json";

/// File name of the SQLite backend under the data directory
pub const SQLITE_STORE_FILE: &str = "learnhub.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
    Sqlite,
}

impl StorageBackend {
    pub fn as_str(&self) -> &str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::File => "file",
            StorageBackend::Sqlite => "sqlite",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" | "json" => Ok(StorageBackend::File),
            "sqlite" => Ok(StorageBackend::Sqlite),
            _ => Err(DomainError::InvalidInput(format!(
                "Unknown storage backend: {s} (expected memory, file or sqlite)"
            ))),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Open the key-value store for a backend rooted at `data_dir`
pub async fn create_store(
    backend: StorageBackend,
    data_dir: &Path,
) -> Result<Arc<dyn KeyValueStore>, DomainError> {
    match backend {
        StorageBackend::Memory => Ok(Arc::new(InMemoryKeyValueStore::new())),
        StorageBackend::File => Ok(Arc::new(JsonFileKeyValueStore::new(
            data_dir.join(JSON_STORE_FILE),
        ))),
        StorageBackend::Sqlite => {
            let database = Database::new(&data_dir.join(SQLITE_STORE_FILE)).await?;
            database.run_migrations().await?;
            Ok(Arc::new(SqliteKeyValueStore::new(Arc::new(
                database.pool().clone(),
            ))))
        }
    }
}

use async_trait::async_trait;
use learnhub_domain::shared::{DomainError, KeyValueStore};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::persistence::RepositoryErrorMapper;

/// Store backed by a single JSON object file.
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so a crash never leaves a half-written object behind.
pub struct JsonFileKeyValueStore {
    path: PathBuf,
    // serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl JsonFileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, DomainError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(DomainError::Repository(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw)
            .map_err(|e| RepositoryErrorMapper::map_json_error(e, "Parse storage file"))
    }

    async fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryErrorMapper::map_write_error(e, "Create data directory"))?;
        }

        let json = serde_json::to_string_pretty(values)
            .map_err(|e| RepositoryErrorMapper::map_json_error(e, "Serialize storage file"))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| RepositoryErrorMapper::map_write_error(e, "Write storage file"))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| RepositoryErrorMapper::map_write_error(e, "Replace storage file"))?;

        debug!("[storage] wrote {} keys to {}", values.len(), self.path.display());
        Ok(())
    }

    /// A corrupt file is replaced on the next write instead of blocking it
    async fn read_for_update(&self) -> Result<BTreeMap<String, String>, DomainError> {
        match self.read_all().await {
            Ok(values) => Ok(values),
            Err(DomainError::Deserialization(msg)) => {
                warn!(
                    "[storage] discarding unreadable file {}: {}",
                    self.path.display(),
                    msg
                );
                Ok(BTreeMap::new())
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl KeyValueStore for JsonFileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        let mut values = self.read_for_update().await?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values).await
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        let mut values = self.read_for_update().await?;
        if values.remove(key).is_some() {
            self.write_all(&values).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = JsonFileKeyValueStore::new(&path);
        assert_eq!(store.get("darkMode").await.unwrap(), None);
        store.set("darkMode", "dark").await.unwrap();
        store.set("learning_streak_data", "{}").await.unwrap();

        let reopened = JsonFileKeyValueStore::new(&path);
        assert_eq!(reopened.get("darkMode").await.unwrap().as_deref(), Some("dark"));

        reopened.remove("darkMode").await.unwrap();
        assert_eq!(store.get("darkMode").await.unwrap(), None);
        assert_eq!(
            store.get("learning_streak_data").await.unwrap().as_deref(),
            Some("{}")
        );
    }

    #[tokio::test]
    async fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileKeyValueStore::new(&path);
        assert!(matches!(
            store.get("darkMode").await,
            Err(DomainError::Deserialization(_))
        ));

        store.set("darkMode", "light").await.unwrap();
        assert_eq!(store.get("darkMode").await.unwrap().as_deref(), Some("light"));
    }
}

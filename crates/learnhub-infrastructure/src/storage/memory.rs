use async_trait::async_trait;
use learnhub_domain::shared::{DomainError, KeyValueStore};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local store, nothing survives a restart
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("darkMode").await.unwrap(), None);

        store.set("darkMode", "dark").await.unwrap();
        store.set("darkMode", "light").await.unwrap();
        assert_eq!(store.get("darkMode").await.unwrap().as_deref(), Some("light"));
        assert_eq!(store.len().await, 1);

        store.remove("darkMode").await.unwrap();
        store.remove("darkMode").await.unwrap();
        assert_eq!(store.get("darkMode").await.unwrap(), None);
    }
}

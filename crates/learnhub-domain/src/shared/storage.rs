use async_trait::async_trait;

use super::DomainError;

/// Scoped string key-value storage (the browser-storage collaborator).
///
/// Implementations live in the infrastructure layer: in-memory, JSON file
/// and SQLite. Values are opaque strings; callers own their encoding.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key was never written
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Write or overwrite a value
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Remove a value; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<(), DomainError>;
}

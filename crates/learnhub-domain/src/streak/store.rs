use log::{debug, warn};
use std::sync::Arc;

use super::persisted::PersistedStreak;
use super::record::StreakRecord;
use crate::shared::{DomainError, KeyValueStore};

/// Storage key, shared with the web client
pub const STREAK_STORAGE_KEY: &str = "learning_streak_data";

/// Loads and saves the single [`StreakRecord`] through a key-value store
pub struct StreakStore {
    storage: Arc<dyn KeyValueStore>,
}

impl StreakStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Load the record. Absent, unreadable or malformed data yields defaults.
    pub async fn load(&self) -> StreakRecord {
        let raw = match self.storage.get(STREAK_STORAGE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("[streak] no stored record, using defaults");
                return StreakRecord::new();
            }
            Err(e) => {
                warn!("[streak] failed to read stored record, using defaults: {}", e);
                return StreakRecord::new();
            }
        };

        match PersistedStreak::from_json(&raw) {
            Ok(persisted) => persisted.into_record(),
            Err(e) => {
                warn!("[streak] stored record is malformed, using defaults: {}", e);
                StreakRecord::new()
            }
        }
    }

    pub async fn save(&self, record: &StreakRecord) -> Result<(), DomainError> {
        let json = PersistedStreak::from(record).to_json()?;
        self.storage.set(STREAK_STORAGE_KEY, &json).await
    }

    /// Restore and persist the default record
    pub async fn reset(&self) -> Result<StreakRecord, DomainError> {
        let record = StreakRecord::new();
        self.save(&record).await?;
        Ok(record)
    }
}

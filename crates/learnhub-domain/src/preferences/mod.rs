use log::{debug, warn};
use serde::{Deserialize, Serialize};
use specta::Type;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::shared::{DomainError, KeyValueStore};

/// Storage key, shared with the web client
pub const THEME_STORAGE_KEY: &str = "darkMode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Stored values other than "dark" read as light
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(DomainError::InvalidInput(format!("Unknown theme: {s}"))),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Persisted dark/light preference
pub struct ThemeStore {
    storage: Arc<dyn KeyValueStore>,
}

impl ThemeStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    pub async fn load(&self) -> Theme {
        match self.storage.get(THEME_STORAGE_KEY).await {
            Ok(value) => Theme::from_stored(value.as_deref()),
            Err(e) => {
                warn!("[theme] failed to read preference, using light: {}", e);
                Theme::Light
            }
        }
    }

    pub async fn save(&self, theme: Theme) -> Result<(), DomainError> {
        debug!("[theme] save {}", theme);
        self.storage.set(THEME_STORAGE_KEY, theme.as_str()).await
    }

    /// Flip and persist the preference, returning the new theme
    pub async fn toggle(&self) -> Result<Theme, DomainError> {
        let next = self.load().await.toggled();
        self.save(next).await?;
        Ok(next)
    }
}

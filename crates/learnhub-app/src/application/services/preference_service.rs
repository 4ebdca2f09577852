use std::sync::Arc;
use tracing::info;

use learnhub_domain::preferences::{Theme, ThemeStore};
use learnhub_domain::shared::{DomainError, KeyValueStore};

pub struct PreferenceService {
    themes: ThemeStore,
}

impl PreferenceService {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            themes: ThemeStore::new(storage),
        }
    }

    pub async fn theme(&self) -> Theme {
        self.themes.load().await
    }

    pub async fn toggle_theme(&self) -> Result<Theme, DomainError> {
        let theme = self.themes.toggle().await?;
        info!("[theme] switched to {}", theme);
        Ok(theme)
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<Theme, DomainError> {
        self.themes.save(theme).await?;
        info!("[theme] set to {}", theme);
        Ok(theme)
    }
}

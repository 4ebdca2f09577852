use std::path::PathBuf;
use std::sync::Arc;

use crate::application::config::TimeoutConfig;
use crate::application::queries::StreakQueries;
use crate::application::services::{
    ConfigService, MessagingService, NotificationService, PreferenceService, StreakService,
    TaskScheduler, UiEventSender,
};
use learnhub_domain::events::EventBus;
use learnhub_domain::shared::KeyValueStore;
use learnhub_infrastructure::storage::StorageBackend;

pub struct Runtime {
    pub storage: Arc<dyn KeyValueStore>,
    pub storage_backend: StorageBackend,
    pub data_dir: PathBuf,
    pub event_bus: Arc<dyn EventBus>,
    pub scheduler: Arc<TaskScheduler>,
    pub ui: UiEventSender,
    pub timeouts: TimeoutConfig,
}

pub struct Services {
    pub config: Arc<ConfigService>,
    pub streak: Arc<StreakService>,
    pub notifications: Arc<NotificationService>,
    pub messaging: Arc<MessagingService>,
    pub preferences: Arc<PreferenceService>,
}

pub struct Queries {
    pub streak: Arc<StreakQueries>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub services: Services,
    pub queries: Queries,
}

impl AppState {
    /// Wait for delayed work, then stop the scheduler
    pub async fn drain(&self) {
        self.runtime.scheduler.join_all().await;
        self.runtime.scheduler.shutdown().await;
    }
}

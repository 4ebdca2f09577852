use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::config::TimeoutConfig;
use crate::application::event_handlers::{AchievementCelebrationHandler, AutoReplyNotifier};
use crate::application::queries::StreakQueries;
use crate::application::services::{
    ConfigService, MessagingService, NotificationService, PreferenceService, StreakService,
    TaskScheduler, UiEventSender,
};
use crate::presentation::state::{AppState, Queries, Runtime, Services};
use learnhub_domain::events::{AchievementUnlocked, AutoReplyDelivered, EventBus, TypedEventHandlerWrapper};
use learnhub_domain::streak::{StreakEvaluator, StreakStore};
use learnhub_domain::Clock;
use learnhub_infrastructure::events::InMemoryEventBus;
use learnhub_infrastructure::storage::{create_store, StorageBackend};

/// Everything needed to wire the application, after CLI overrides
pub struct BootstrapOptions {
    pub config: Arc<ConfigService>,
    pub data_dir: PathBuf,
    pub storage: StorageBackend,
    pub clock: Arc<dyn Clock>,
    pub timeouts: TimeoutConfig,
}

pub async fn build_app_state(options: BootstrapOptions) -> anyhow::Result<AppState> {
    let started_at = Instant::now();

    std::fs::create_dir_all(&options.data_dir)?;
    let storage = create_store(options.storage, &options.data_dir).await?;
    info!(
        "✓ Opened {} storage under {} ({}ms)",
        options.storage,
        options.data_dir.display(),
        started_at.elapsed().as_millis()
    );

    let scheduler = Arc::new(TaskScheduler::new());
    let ui = UiEventSender::new();
    let event_bus = Arc::new(InMemoryEventBus::new());

    let evaluator = Arc::new(StreakEvaluator::new(
        Arc::new(StreakStore::new(storage.clone())),
        options.clock.clone(),
    ));
    let notifications = Arc::new(NotificationService::new(ui.clone()));
    let messaging = Arc::new(MessagingService::new(
        scheduler.clone(),
        event_bus.clone() as Arc<dyn EventBus>,
        options.timeouts.clone(),
    ));

    event_bus
        .subscribe::<AchievementUnlocked>(Arc::new(TypedEventHandlerWrapper::<AchievementUnlocked, _>::new(
            AchievementCelebrationHandler::new(
                notifications.clone(),
                scheduler.clone(),
                ui.clone(),
                options.timeouts.clone(),
            ),
        )))
        .await;
    event_bus
        .subscribe::<AutoReplyDelivered>(Arc::new(TypedEventHandlerWrapper::<AutoReplyDelivered, _>::new(
            AutoReplyNotifier::new(ui.clone()),
        )))
        .await;

    let event_bus: Arc<dyn EventBus> = event_bus;
    let streak = Arc::new(StreakService::new(evaluator.clone(), event_bus.clone()));

    info!(
        "✓ Application state ready ({}ms)",
        started_at.elapsed().as_millis()
    );

    Ok(AppState {
        runtime: Runtime {
            storage: storage.clone(),
            storage_backend: options.storage,
            data_dir: options.data_dir,
            event_bus,
            scheduler,
            ui,
            timeouts: options.timeouts,
        },
        services: Services {
            config: options.config,
            streak,
            notifications,
            messaging,
            preferences: Arc::new(PreferenceService::new(storage)),
        },
        queries: Queries {
            streak: Arc::new(StreakQueries::new(evaluator)),
        },
    })
}

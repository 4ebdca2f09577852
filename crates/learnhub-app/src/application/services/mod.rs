mod config_service;
mod messaging_service;
mod notification_service;
mod preference_service;
mod scheduler;
mod streak_service;
mod ui_events;

pub use config_service::{AppConfig, ConfigService, LogLevel, APP_DIR_NAME};
pub use messaging_service::{MessagingService, SentMessage};
pub use notification_service::NotificationService;
pub use preference_service::PreferenceService;
pub use scheduler::{TaskId, TaskScheduler};
pub use streak_service::StreakService;
pub use ui_events::{UiEvent, UiEventSender};

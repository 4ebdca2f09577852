use async_trait::async_trait;
use log::{error, info};
use std::sync::Arc;

use crate::application::config::TimeoutConfig;
use crate::application::services::{NotificationService, TaskScheduler, UiEvent, UiEventSender};
use learnhub_domain::events::{AchievementUnlocked, EventHandler};
use learnhub_domain::notification::NotificationTemplate;
use learnhub_domain::shared::DomainError;

pub const ACHIEVEMENT_TOAST: &str =
    "🎉 Achievement Unlocked: \"Dedicated Learner\" - 7 Day Streak!";

/// Shows the streak celebration shortly after the session starts and
/// raises the matching badge notification
pub struct AchievementCelebrationHandler {
    notifications: Arc<NotificationService>,
    scheduler: Arc<TaskScheduler>,
    ui: UiEventSender,
    timeouts: TimeoutConfig,
}

impl AchievementCelebrationHandler {
    pub fn new(
        notifications: Arc<NotificationService>,
        scheduler: Arc<TaskScheduler>,
        ui: UiEventSender,
        timeouts: TimeoutConfig,
    ) -> Self {
        Self {
            notifications,
            scheduler,
            ui,
            timeouts,
        }
    }
}

#[async_trait]
impl EventHandler<AchievementUnlocked> for AchievementCelebrationHandler {
    async fn handle(&self, event: &AchievementUnlocked) -> Result<(), DomainError> {
        info!(
            "[streak] celebrating {} day streak in {}ms",
            event.current_streak,
            self.timeouts.celebration.as_millis()
        );

        let ui = self.ui.clone();
        let notifications = self.notifications.clone();
        let current_streak = event.current_streak;
        let toast_ms = self.timeouts.toast.as_millis() as u64;

        self.scheduler
            .schedule_after("celebration", self.timeouts.celebration, async move {
                ui.emit(UiEvent::Celebration { current_streak });
                ui.emit(UiEvent::Toast {
                    message: ACHIEVEMENT_TOAST.to_string(),
                    duration_ms: toast_ms,
                });
                if let Err(e) = notifications.simulate(NotificationTemplate::Badge).await {
                    error!("[notify] failed to add badge notification: {}", e);
                }
            })
            .await;

        Ok(())
    }
}

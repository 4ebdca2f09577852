use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use learnhub_domain::events::{AchievementUnlocked, EventBus};
use learnhub_domain::shared::DomainError;
use learnhub_domain::streak::{StreakEvaluation, StreakEvaluator, StreakRecord};

/// Records logins and announces streak milestones
pub struct StreakService {
    evaluator: Arc<StreakEvaluator>,
    event_bus: Arc<dyn EventBus>,
}

impl StreakService {
    pub fn new(evaluator: Arc<StreakEvaluator>, event_bus: Arc<dyn EventBus>) -> Self {
        Self {
            evaluator,
            event_bus,
        }
    }

    /// Evaluate today's login and publish the outcome.
    ///
    /// `AchievementUnlocked` goes out when this evaluation crossed the
    /// threshold, or when the stored record still owes a celebration. An
    /// owed celebration is flagged as shown on the evaluated record before
    /// the event is published, so it fires once.
    pub async fn check_in(&self) -> Result<StreakEvaluation, DomainError> {
        let evaluation = self.evaluator.evaluate().await;
        if !evaluation.persisted {
            warn!("[streak] login for {} kept in memory only", evaluation.today);
        }

        let owes_celebration = evaluation.should_celebrate();
        if !evaluation.achievement_newly_unlocked() && !owes_celebration {
            return Ok(evaluation);
        }

        if owes_celebration {
            // storage is not read again; a failed read would look like an empty record
            if let Err(e) = self
                .evaluator
                .acknowledge_achievement(evaluation.record.clone())
                .await
            {
                warn!("[streak] failed to flag achievement as shown: {}", e);
            }
        }

        info!(
            "[streak] achievement reached at {} days",
            evaluation.record.current_streak()
        );
        self.event_bus
            .publish(Box::new(AchievementUnlocked {
                current_streak: evaluation.record.current_streak(),
                occurred_at: Utc::now(),
            }))
            .await?;

        Ok(evaluation)
    }

    pub async fn reset(&self) -> Result<StreakRecord, DomainError> {
        self.evaluator.reset().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use learnhub_domain::events::DomainEvent;
    use learnhub_domain::shared::KeyValueStore;
    use learnhub_domain::streak::{CalendarDate, PersistedStreak, StreakStore, STREAK_STORAGE_KEY};
    use learnhub_infrastructure::clock::FixedClock;
    use learnhub_infrastructure::storage::InMemoryKeyValueStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Serves the stored value once, then every read fails
    struct FirstReadOnlyStore {
        value: Mutex<Option<String>>,
        reads: AtomicUsize,
    }

    impl FirstReadOnlyStore {
        fn holding(value: &str) -> Self {
            Self {
                value: Mutex::new(Some(value.to_string())),
                reads: AtomicUsize::new(0),
            }
        }

        fn stored(&self) -> PersistedStreak {
            let raw = self.value.lock().unwrap().clone().unwrap();
            PersistedStreak::from_json(&raw).unwrap()
        }
    }

    #[async_trait]
    impl KeyValueStore for FirstReadOnlyStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, DomainError> {
            if self.reads.fetch_add(1, Ordering::SeqCst) > 0 {
                return Err(DomainError::Repository("disk unavailable".to_string()));
            }
            Ok(self.value.lock().unwrap().clone())
        }

        async fn set(&self, _key: &str, value: &str) -> Result<(), DomainError> {
            *self.value.lock().unwrap() = Some(value.to_string());
            Ok(())
        }

        async fn remove(&self, _key: &str) -> Result<(), DomainError> {
            *self.value.lock().unwrap() = None;
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingEventBus {
        published: Mutex<Vec<&'static str>>,
    }

    impl RecordingEventBus {
        fn published(&self) -> Vec<&'static str> {
            self.published.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EventBus for RecordingEventBus {
        async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError> {
            self.published.lock().unwrap().push(event.event_type_name());
            Ok(())
        }
    }

    fn service_on(
        storage: Arc<dyn KeyValueStore>,
        today: &str,
    ) -> (StreakService, Arc<RecordingEventBus>) {
        let clock = Arc::new(FixedClock::on_date(CalendarDate::parse(today).unwrap()));
        let evaluator = StreakEvaluator::new(Arc::new(StreakStore::new(storage)), clock);
        let bus = Arc::new(RecordingEventBus::default());
        (StreakService::new(Arc::new(evaluator), bus.clone()), bus)
    }

    fn unlocked_type() -> &'static str {
        std::any::type_name::<AchievementUnlocked>()
    }

    #[tokio::test]
    async fn test_owed_celebration_keeps_streak_when_reread_fails() {
        let storage = Arc::new(FirstReadOnlyStore::holding(
            r#"{"currentStreak":7,"lastLoginDate":"2024-01-07","achievementUnlocked":false,
                "loginDates":["2024-01-01","2024-01-02","2024-01-03","2024-01-04",
                              "2024-01-05","2024-01-06","2024-01-07"]}"#,
        ));
        let (service, bus) = service_on(storage.clone(), "2024-01-07");

        let evaluation = service.check_in().await.unwrap();
        assert!(evaluation.should_celebrate());

        let stored = storage.stored();
        assert_eq!(stored.current_streak, 7);
        assert_eq!(stored.last_login_date.as_deref(), Some("2024-01-07"));
        assert!(stored.achievement_unlocked);
        assert_eq!(stored.login_dates.len(), 7);
        assert_eq!(bus.published(), vec![unlocked_type()]);
    }

    #[tokio::test]
    async fn test_seventh_day_publishes_single_achievement() {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        storage
            .set(
                STREAK_STORAGE_KEY,
                r#"{"currentStreak":6,"lastLoginDate":"2024-01-06","achievementUnlocked":false,"loginDates":["2024-01-06"]}"#,
            )
            .await
            .unwrap();
        let (service, bus) = service_on(storage.clone(), "2024-01-07");

        let evaluation = service.check_in().await.unwrap();

        assert!(evaluation.achievement_newly_unlocked());
        assert_eq!(bus.published(), vec![unlocked_type()]);

        // a second session the same day owes nothing
        service.check_in().await.unwrap();
        assert_eq!(bus.published().len(), 1);
    }

    #[tokio::test]
    async fn test_ordinary_day_publishes_nothing() {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let (service, bus) = service_on(storage, "2024-01-03");

        let evaluation = service.check_in().await.unwrap();

        assert_eq!(evaluation.record.current_streak(), 1);
        assert!(bus.published().is_empty());
    }
}

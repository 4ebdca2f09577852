use log::{info, warn};
use std::sync::Arc;

use super::record::{should_celebrate, StreakRecord};
use super::store::StreakStore;
use super::value_objects::{CalendarDate, StreakTransition};
use crate::shared::{Clock, DomainError};

/// Result of evaluating the streak for the current session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakEvaluation {
    pub today: CalendarDate,
    pub prior: StreakRecord,
    pub record: StreakRecord,
    pub transition: StreakTransition,
    /// False when the new record could not be written; it is still
    /// authoritative for the rest of the session
    pub persisted: bool,
}

impl StreakEvaluation {
    /// The achievement flag flipped during this evaluation
    pub fn achievement_newly_unlocked(&self) -> bool {
        !self.prior.achievement_unlocked() && self.record.achievement_unlocked()
    }

    pub fn should_celebrate(&self) -> bool {
        should_celebrate(&self.record)
    }
}

/// Domain service that applies one login per calendar day
pub struct StreakEvaluator {
    store: Arc<StreakStore>,
    clock: Arc<dyn Clock>,
}

impl StreakEvaluator {
    pub fn new(store: Arc<StreakStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn today(&self) -> CalendarDate {
        CalendarDate::from_datetime(self.clock.now())
    }

    /// Current stored record without recording a login
    pub async fn current(&self) -> StreakRecord {
        self.store.load().await
    }

    /// Record today's login: load, evaluate, persist before returning
    pub async fn evaluate(&self) -> StreakEvaluation {
        let today = self.today();
        let prior = self.store.load().await;
        let (record, transition) = prior.advance(today);

        let persisted = if transition == StreakTransition::Unchanged {
            true
        } else {
            match self.store.save(&record).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(
                        "[streak] failed to persist record for {}, keeping in-memory value: {}",
                        today, e
                    );
                    false
                }
            }
        };

        info!(
            "[streak] evaluate today={} transition={} current={} unlocked={} dates={}",
            today,
            transition,
            record.current_streak(),
            record.achievement_unlocked(),
            record.login_dates().len()
        );

        StreakEvaluation {
            today,
            prior,
            record,
            transition,
            persisted,
        }
    }

    /// Flag the achievement as shown and persist it
    pub async fn acknowledge_achievement(
        &self,
        mut record: StreakRecord,
    ) -> Result<StreakRecord, DomainError> {
        if record.mark_achievement_shown() {
            self.store.save(&record).await?;
            info!("[streak] achievement flagged as shown");
        }
        Ok(record)
    }

    /// Restore defaults
    pub async fn reset(&self) -> Result<StreakRecord, DomainError> {
        let record = self.store.reset().await?;
        info!("[streak] record reset to defaults");
        Ok(record)
    }
}

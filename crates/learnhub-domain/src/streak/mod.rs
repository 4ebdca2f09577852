mod evaluator;
mod persisted;
mod record;
mod store;
mod value_objects;


pub use evaluator::{StreakEvaluation, StreakEvaluator};
pub use persisted::PersistedStreak;
pub use record::{evaluate, should_celebrate, StreakRecord};
pub use store::{StreakStore, STREAK_STORAGE_KEY};
pub use value_objects::{
    ActivityLevel, CalendarDate, StreakTransition, ACHIEVEMENT_THRESHOLD, MAX_LOGIN_DATES,
};

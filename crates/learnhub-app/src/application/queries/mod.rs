mod streak_queries;

pub use streak_queries::{StreakQueries, HEATMAP_DAYS, MAX_HEATMAP_DAYS};

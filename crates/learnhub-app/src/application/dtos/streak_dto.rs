use serde::{Deserialize, Serialize};
use specta::Type;

use learnhub_domain::streak::{should_celebrate, CalendarDate, StreakRecord, ACHIEVEMENT_THRESHOLD};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct StreakDto {
    pub today: String, // YYYY-MM-DD
    pub current_streak: u32,
    pub last_login_date: Option<String>,
    pub achievement_unlocked: bool,
    pub login_dates: Vec<String>,
    pub logged_in_today: bool,
    pub should_celebrate: bool,
    /// Days left until the achievement, zero once reached
    pub days_to_achievement: u32,
}

impl StreakDto {
    pub fn from_record(record: &StreakRecord, today: CalendarDate) -> Self {
        Self {
            today: today.to_string(),
            current_streak: record.current_streak(),
            last_login_date: record.last_login_date().map(|d| d.to_string()),
            achievement_unlocked: record.achievement_unlocked(),
            login_dates: record.login_dates().iter().map(|d| d.to_string()).collect(),
            logged_in_today: record.last_login_date() == Some(today),
            should_celebrate: should_celebrate(record),
            days_to_achievement: ACHIEVEMENT_THRESHOLD.saturating_sub(record.current_streak()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct HeatmapDayDto {
    pub date: String,
    pub level: u8,
    pub label: String,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct HeatmapDto {
    pub start_date: String,
    pub end_date: String,
    /// Oldest first
    pub days: Vec<HeatmapDayDto>,
    pub active_days: u32,
}

use chrono::NaiveDateTime;

use super::value_objects::{
    ActivityLevel, CalendarDate, StreakTransition, ACHIEVEMENT_THRESHOLD, MAX_LOGIN_DATES,
};

/// Persisted login-streak state, one per user/session.
///
/// Invariants kept by every constructor and transition:
/// - `login_dates` is ascending, duplicate-free and at most [`MAX_LOGIN_DATES`] long
/// - `achievement_unlocked` never goes back to `false` except through an explicit reset
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreakRecord {
    current_streak: u32,
    last_login_date: Option<CalendarDate>,
    achievement_unlocked: bool,
    login_dates: Vec<CalendarDate>,
}

impl StreakRecord {
    /// Empty record used on first access or after a reset
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstruct from persistence, normalizing the login date list
    pub fn from_persistence(
        current_streak: u32,
        last_login_date: Option<CalendarDate>,
        achievement_unlocked: bool,
        login_dates: Vec<CalendarDate>,
    ) -> Self {
        Self {
            current_streak,
            last_login_date,
            achievement_unlocked,
            login_dates: normalize_login_dates(login_dates),
        }
    }

    // Getters
    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn last_login_date(&self) -> Option<CalendarDate> {
        self.last_login_date
    }

    pub fn achievement_unlocked(&self) -> bool {
        self.achievement_unlocked
    }

    pub fn login_dates(&self) -> &[CalendarDate] {
        &self.login_dates
    }

    pub fn has_logged_in_on(&self, date: CalendarDate) -> bool {
        self.login_dates.binary_search(&date).is_ok()
    }

    /// Heatmap level for a date: flat level for recorded logins, zero otherwise
    pub fn activity_level(&self, date: CalendarDate) -> ActivityLevel {
        if self.has_logged_in_on(date) {
            ActivityLevel::LOGGED_IN
        } else {
            ActivityLevel::NONE
        }
    }

    /// Flag the achievement as shown. Returns `true` if the flag changed.
    pub fn mark_achievement_shown(&mut self) -> bool {
        let changed = !self.achievement_unlocked;
        self.achievement_unlocked = true;
        changed
    }

    /// Compute the record that results from logging in on `today`
    pub fn advance(&self, today: CalendarDate) -> (StreakRecord, StreakTransition) {
        if self.last_login_date == Some(today) {
            return (self.clone(), StreakTransition::Unchanged);
        }

        let yesterday = today.pred();

        let (current_streak, login_dates, transition) = match self.last_login_date {
            Some(last) if Some(last) == yesterday => {
                let mut dates: Vec<CalendarDate> = self
                    .login_dates
                    .iter()
                    .copied()
                    .filter(|date| *date < today)
                    .collect();
                dates.push(today);
                (
                    self.current_streak.saturating_add(1),
                    dates,
                    StreakTransition::Continued,
                )
            }
            None if self.current_streak == 0 && self.login_dates.is_empty() => {
                (1, vec![today], StreakTransition::Started)
            }
            _ => (1, vec![today], StreakTransition::Reset),
        };

        let next = StreakRecord {
            current_streak,
            last_login_date: Some(today),
            achievement_unlocked: self.achievement_unlocked
                || current_streak >= ACHIEVEMENT_THRESHOLD,
            login_dates: keep_most_recent(login_dates),
        };

        (next, transition)
    }
}

/// Evaluate a login at `now` (local wall clock) against the prior record.
///
/// Returns `prior` unchanged when it already recorded a login today.
pub fn evaluate(now: NaiveDateTime, prior: &StreakRecord) -> StreakRecord {
    prior.advance(CalendarDate::from_datetime(now)).0
}

/// True exactly when the streak sits at the threshold and the one-time
/// achievement has not been flagged yet.
pub fn should_celebrate(record: &StreakRecord) -> bool {
    record.current_streak == ACHIEVEMENT_THRESHOLD && !record.achievement_unlocked
}

fn normalize_login_dates(mut dates: Vec<CalendarDate>) -> Vec<CalendarDate> {
    dates.sort_unstable();
    dates.dedup();
    keep_most_recent(dates)
}

// Drops the oldest entries first
fn keep_most_recent(mut dates: Vec<CalendarDate>) -> Vec<CalendarDate> {
    if dates.len() > MAX_LOGIN_DATES {
        let excess = dates.len() - MAX_LOGIN_DATES;
        dates.drain(..excess);
    }
    dates
}

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::DomainError;

/// Number of most recent login dates kept for the heatmap
pub const MAX_LOGIN_DATES: usize = 30;

/// Streak length that unlocks the "Dedicated Learner" achievement
pub const ACHIEVEMENT_THRESHOLD: u32 = 7;

/// A local calendar date, persisted as ISO `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Truncate a local wall-clock instant to its calendar date
    pub fn from_datetime(now: NaiveDateTime) -> Self {
        Self(now.date())
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        NaiveDate::parse_from_str(value.trim(), Self::FORMAT)
            .map(Self)
            .map_err(|e| {
                DomainError::InvalidInput(format!(
                    "Invalid date '{value}', expected YYYY-MM-DD: {e}"
                ))
            })
    }

    /// The previous calendar day
    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    pub fn minus_days(&self, days: u64) -> Option<Self> {
        self.0.checked_sub_days(Days::new(days)).map(Self)
    }

    pub fn plus_days(&self, days: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(days)).map(Self)
    }

    /// Signed number of days from `self` to `other`
    pub fn days_until(&self, other: CalendarDate) -> i64 {
        (other.0 - self.0).num_days()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Heatmap intensity, 0 (nothing) to 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLevel(u8);

impl ActivityLevel {
    pub const NONE: Self = Self(0);
    /// Flat level used for any day with a recorded login
    pub const LOGGED_IN: Self = Self(3);
    pub const MAX: u8 = 4;

    pub fn new(level: u8) -> Result<Self, DomainError> {
        if level > Self::MAX {
            return Err(DomainError::InvalidInput(format!(
                "Activity level must be between 0 and {}, got {level}",
                Self::MAX
            )));
        }
        Ok(Self(level))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Legend text shown for the level
    pub fn label(&self) -> &'static str {
        match self.0 {
            0 => "No activity",
            1 => "Light activity",
            2 => "Moderate activity",
            3 => "High activity",
            _ => "Very high activity",
        }
    }
}

/// What a single evaluation did to the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTransition {
    /// Already evaluated today
    Unchanged,
    /// First ever recorded login
    Started,
    /// Last login was yesterday
    Continued,
    /// Gap of two or more days, or an unusable last login date
    Reset,
}

impl StreakTransition {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreakTransition::Unchanged => "unchanged",
            StreakTransition::Started => "started",
            StreakTransition::Continued => "continued",
            StreakTransition::Reset => "reset",
        }
    }
}

impl fmt::Display for StreakTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

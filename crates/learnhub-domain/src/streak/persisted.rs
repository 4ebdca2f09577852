use log::warn;
use serde::{Deserialize, Serialize};

use super::record::StreakRecord;
use super::value_objects::CalendarDate;
use crate::shared::DomainError;

/// Storage representation of a [`StreakRecord`].
///
/// Field names match the JSON the web client has always written, so records
/// saved by older clients keep loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedStreak {
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub last_login_date: Option<String>,
    #[serde(default)]
    pub achievement_unlocked: bool,
    #[serde(default)]
    pub login_dates: Vec<String>,
}

impl PersistedStreak {
    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string(self)
            .map_err(|e| DomainError::Serialization(format!("Failed to serialize streak: {}", e)))
    }

    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json).map_err(|e| {
            DomainError::Deserialization(format!("Failed to deserialize streak: {}", e))
        })
    }

    /// Convert into the domain record.
    ///
    /// An unparsable last login date becomes `None`, which forces a reset on
    /// the next evaluation; unparsable login dates are dropped.
    pub fn into_record(self) -> StreakRecord {
        let last_login_date = self.last_login_date.as_deref().and_then(|raw| {
            CalendarDate::parse(raw)
                .map_err(|e| warn!("[streak] ignoring stored lastLoginDate: {}", e))
                .ok()
        });

        let login_dates = self
            .login_dates
            .iter()
            .filter_map(|raw| match CalendarDate::parse(raw) {
                Ok(date) => Some(date),
                Err(e) => {
                    warn!("[streak] dropping stored login date: {}", e);
                    None
                }
            })
            .collect();

        StreakRecord::from_persistence(
            self.current_streak,
            last_login_date,
            self.achievement_unlocked,
            login_dates,
        )
    }
}

impl From<&StreakRecord> for PersistedStreak {
    fn from(record: &StreakRecord) -> Self {
        Self {
            current_streak: record.current_streak(),
            last_login_date: record.last_login_date().map(|d| d.to_string()),
            achievement_unlocked: record.achievement_unlocked(),
            login_dates: record.login_dates().iter().map(|d| d.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_web_client_format() {
        let json = r#"{"currentStreak":6,"lastLoginDate":"2024-01-06","achievementUnlocked":false,"loginDates":["2024-01-05","2024-01-06"]}"#;
        let record = PersistedStreak::from_json(json).unwrap().into_record();

        assert_eq!(record.current_streak(), 6);
        assert_eq!(record.last_login_date().unwrap().to_string(), "2024-01-06");
        assert_eq!(record.login_dates().len(), 2);
    }

    #[test]
    fn test_writes_camel_case_keys() {
        let record = StreakRecord::from_persistence(
            1,
            CalendarDate::from_ymd(2024, 1, 1),
            true,
            vec![CalendarDate::from_ymd(2024, 1, 1).unwrap()],
        );
        let json = PersistedStreak::from(&record).to_json().unwrap();

        assert_eq!(
            json,
            r#"{"currentStreak":1,"lastLoginDate":"2024-01-01","achievementUnlocked":true,"loginDates":["2024-01-01"]}"#
        );
    }

    #[test]
    fn test_null_last_login_date() {
        let json = r#"{"currentStreak":0,"lastLoginDate":null,"achievementUnlocked":false,"loginDates":[]}"#;
        let record = PersistedStreak::from_json(json).unwrap().into_record();
        assert_eq!(record, StreakRecord::new());
    }

    #[test]
    fn test_missing_fields_default() {
        let record = PersistedStreak::from_json("{}").unwrap().into_record();
        assert_eq!(record, StreakRecord::new());
    }

    #[test]
    fn test_malformed_dates_are_lenient() {
        let json = r#"{"currentStreak":4,"lastLoginDate":"Jan 4th","achievementUnlocked":true,"loginDates":["2024-01-03","not-a-date","2024-01-04"]}"#;
        let record = PersistedStreak::from_json(json).unwrap().into_record();

        assert_eq!(record.last_login_date(), None);
        assert!(record.achievement_unlocked());
        assert_eq!(record.login_dates().len(), 2);
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        assert!(PersistedStreak::from_json("[1,2,3]").is_err());
        assert!(PersistedStreak::from_json("{\"currentStreak\":-2}").is_err());
        assert!(PersistedStreak::from_json("not json").is_err());
    }
}

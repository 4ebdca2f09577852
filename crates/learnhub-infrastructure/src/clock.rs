use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use learnhub_domain::streak::CalendarDate;
use learnhub_domain::Clock;
use std::sync::Mutex;

/// Local wall clock of the host
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Settable clock for tests and the `--today` override
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Mid-morning on the given date
    pub fn on_date(date: CalendarDate) -> Self {
        let morning = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN);
        Self::new(date.as_naive().and_time(morning))
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_advances_across_midnight() {
        let date = CalendarDate::parse("2024-01-06").unwrap();
        let clock = FixedClock::on_date(date);
        assert_eq!(CalendarDate::from_datetime(clock.now()), date);

        clock.advance(Duration::hours(15));
        assert_eq!(
            CalendarDate::from_datetime(clock.now()),
            CalendarDate::parse("2024-01-07").unwrap()
        );
    }

    #[test]
    fn test_system_clock_is_local() {
        let before = Local::now().naive_local();
        let now = SystemClock.now();
        assert!(now >= before);
    }
}

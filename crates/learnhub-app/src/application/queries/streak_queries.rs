use log::debug;
use std::sync::Arc;

use crate::application::dtos::{HeatmapDayDto, HeatmapDto, StreakDto};
use learnhub_domain::shared::DomainError;
use learnhub_domain::streak::{CalendarDate, StreakEvaluator, StreakRecord};

/// Days shown on the activity heatmap, ending today
pub const HEATMAP_DAYS: u32 = 30;

/// Longest heatmap range, one leap year
pub const MAX_HEATMAP_DAYS: u32 = 366;

/// Read-only views of the streak record; never records a login
pub struct StreakQueries {
    evaluator: Arc<StreakEvaluator>,
}

impl StreakQueries {
    pub fn new(evaluator: Arc<StreakEvaluator>) -> Self {
        Self { evaluator }
    }

    pub async fn status(&self) -> StreakDto {
        let record = self.evaluator.current().await;
        StreakDto::from_record(&record, self.evaluator.today())
    }

    /// Heatmap of the `days` calendar days ending today, oldest first
    pub async fn heatmap(&self, days: u32) -> Result<HeatmapDto, DomainError> {
        let record = self.evaluator.current().await;
        build_heatmap(&record, self.evaluator.today(), days)
    }
}

fn build_heatmap(
    record: &StreakRecord,
    today: CalendarDate,
    days: u32,
) -> Result<HeatmapDto, DomainError> {
    if days == 0 {
        return Err(DomainError::Validation(
            "Heatmap needs at least one day".to_string(),
        ));
    }
    if days > MAX_HEATMAP_DAYS {
        return Err(DomainError::Validation(format!(
            "Heatmap covers at most {} days, got {}",
            MAX_HEATMAP_DAYS, days
        )));
    }

    let start = today
        .minus_days(u64::from(days - 1))
        .ok_or_else(|| DomainError::Validation("Heatmap range out of bounds".to_string()))?;

    let mut cells = Vec::with_capacity(days as usize);
    let mut date = start;
    loop {
        let level = record.activity_level(date);
        cells.push(HeatmapDayDto {
            date: date.to_string(),
            level: level.value(),
            label: level.label().to_string(),
            is_today: date == today,
        });
        if date >= today {
            break;
        }
        date = date
            .plus_days(1)
            .ok_or_else(|| DomainError::Validation("Heatmap range out of bounds".to_string()))?;
    }

    let active_days = cells.iter().filter(|c| c.level > 0).count() as u32;
    debug!(
        "[streak] heatmap {}..{} active_days={}",
        start, today, active_days
    );

    Ok(HeatmapDto {
        start_date: start.to_string(),
        end_date: today.to_string(),
        days: cells,
        active_days,
    })
}

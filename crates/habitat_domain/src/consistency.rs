use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single qualifying event on a day already counts toward consistency;
/// per-habit weekly goals govern goal progress, not this metric.
pub const DEFAULT_DAILY_THRESHOLD: u32 = 1;

/// One day of a period series. Zero-count days are represented explicitly,
/// never omitted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("day series must be ascending ({prev} appears before {next})")]
    Unsorted { prev: NaiveDate, next: NaiveDate },
    #[error("day series has a gap between {prev} and {next}; zero-count days must be present")]
    Gap { prev: NaiveDate, next: NaiveDate },
}

/// Share of days in the period meeting the threshold. Always finite and in
/// [0, 100]; an empty period is 0%, not NaN.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ConsistencyResult {
    pub percentage: f64,
}

impl ConsistencyResult {
    /// Integer percentage for display, rounded half up.
    pub fn display_percentage(&self) -> u32 {
        self.percentage.round() as u32
    }
}

pub fn consistency(series: &[DayCount]) -> Result<ConsistencyResult, SeriesError> {
    consistency_with_threshold(series, DEFAULT_DAILY_THRESHOLD)
}

pub fn consistency_with_threshold(
    series: &[DayCount],
    threshold: u32,
) -> Result<ConsistencyResult, SeriesError> {
    validate_contiguous(series)?;

    if series.is_empty() {
        return Ok(ConsistencyResult::default());
    }

    let qualifying = series.iter().filter(|day| day.count >= threshold).count();
    let percentage = qualifying as f64 / series.len() as f64 * 100.0;
    Ok(ConsistencyResult { percentage })
}

/// Zero-count days in the series, surfaced as "skipped days this period".
pub fn skipped_days(series: &[DayCount]) -> usize {
    series.iter().filter(|day| day.count == 0).count()
}

fn validate_contiguous(series: &[DayCount]) -> Result<(), SeriesError> {
    for pair in series.windows(2) {
        let (prev, next) = (pair[0].date, pair[1].date);
        if next <= prev {
            return Err(SeriesError::Unsorted { prev, next });
        }
        if next - prev > Duration::days(1) {
            return Err(SeriesError::Gap { prev, next });
        }
    }
    Ok(())
}

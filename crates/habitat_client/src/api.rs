use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use habitat_domain::consistency::DayCount;
use habitat_domain::dates::{self, PeriodKind};
use habitat_domain::habit::{Habit, HabitId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backing completion record vanished; distinct from generic
    /// failure so the presentation layer can show an "out of sync" message.
    #[error("no completion record exists for this habit and day")]
    RecordNotFound,
    #[error("backend responded with status {0}")]
    Status(u16),
    #[error("transport failure: {0}")]
    Transport(String),
}

/// A habit paired with its accomplishment state for the active period, as
/// returned by the habit listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HabitSummary {
    pub habit: Habit,
    pub accomplished: bool,
    pub weekly_count: u32,
    pub goal_progress: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HabitPage {
    pub items: Vec<HabitSummary>,
    pub total: u32,
    pub total_pages: u32,
}

/// Streak queries run either per habit or across all of a user's habits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StreakTarget {
    Habit(HabitId),
    Aggregate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreakSnapshot {
    pub current_streak: u32,
    pub current_streak_range: Option<(NaiveDate, NaiveDate)>,
    pub best_streak: u32,
    pub best_streak_range: Option<(NaiveDate, NaiveDate)>,
    pub accomplished_dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConsistencySnapshot {
    pub percentage: f64,
}

/// Inclusive day range for the day-count endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The period containing `date`, e.g. the Sunday-to-Saturday week of a
    /// weekly view.
    pub fn period_of(date: NaiveDate, kind: PeriodKind) -> Self {
        let (start, end) = dates::period_bounds(date, kind);
        Self { start, end }
    }
}

/// The backend collaborator that owns persistence. The exact wire format is
/// owned externally; these are the shapes the client requires.
#[async_trait]
pub trait HabitBackend: Send + Sync {
    async fn list_habits(&self, page: u32, limit: u32) -> Result<HabitPage, ApiError>;

    /// Toggles today's accomplishment for the habit. A vanished backing
    /// record surfaces as [`ApiError::RecordNotFound`].
    async fn toggle_accomplishment(&self, habit: &HabitId) -> Result<(), ApiError>;

    async fn habit_streak(
        &self,
        target: &StreakTarget,
        period: PeriodKind,
    ) -> Result<StreakSnapshot, ApiError>;

    async fn consistency(&self, period: PeriodKind) -> Result<ConsistencySnapshot, ApiError>;

    /// Ordered day counts covering every day of `range`, zero-count days
    /// included.
    async fn habit_day_counts(&self, range: DateRange) -> Result<Vec<DayCount>, ApiError>;
}

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_NAME_LEN: usize = 30;

/// Opaque backend-assigned habit identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HabitId(String);

impl HabitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed card palette; the wire format carries the hex value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardColor {
    #[serde(rename = "#BFFF95")]
    Green,
    #[serde(rename = "#89E2CD")]
    Blue,
    #[serde(rename = "#FBEF95")]
    Yellow,
    #[serde(rename = "#FEBCEA")]
    Pink,
    #[serde(rename = "#F2C394")]
    Orange,
}

impl CardColor {
    pub fn hex(&self) -> &'static str {
        match self {
            CardColor::Green => "#BFFF95",
            CardColor::Blue => "#89E2CD",
            CardColor::Yellow => "#FBEF95",
            CardColor::Pink => "#FEBCEA",
            CardColor::Orange => "#F2C394",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HabitError {
    #[error("habit name must not be empty")]
    EmptyName,
    #[error("habit name must be at most {MAX_NAME_LEN} characters (got {0})")]
    NameTooLong(usize),
    #[error("weekly goal must be at least 1")]
    ZeroGoal,
}

/// A user-defined habit. Name and goal stay behind accessors so every write
/// path passes validation; deletion is a soft-delete timestamp, the client
/// never hard-removes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Habit {
    pub id: HabitId,
    name: String,
    goal: u32,
    pub color: CardColor,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Habit {
    pub fn new(
        id: HabitId,
        name: impl Into<String>,
        goal: u32,
        color: CardColor,
        created_at: DateTime<Utc>,
    ) -> Result<Self, HabitError> {
        let name = validate_name(name.into())?;
        validate_goal(goal)?;
        Ok(Self {
            id,
            name,
            goal,
            color,
            created_at,
            deleted_at: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), HabitError> {
        self.name = validate_name(name.into())?;
        Ok(())
    }

    pub fn set_goal(&mut self, goal: u32) -> Result<(), HabitError> {
        validate_goal(goal)?;
        self.goal = goal;
        Ok(())
    }

    pub fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.deleted_at.get_or_insert(at);
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

fn validate_name(name: String) -> Result<String, HabitError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(HabitError::EmptyName);
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(HabitError::NameTooLong(len));
    }
    Ok(trimmed.to_string())
}

fn validate_goal(goal: u32) -> Result<(), HabitError> {
    if goal == 0 {
        return Err(HabitError::ZeroGoal);
    }
    Ok(())
}

/// One day on which a habit was marked accomplished. At most one record per
/// (habit, day); toggling a day is idempotent, not additive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionRecord {
    pub habit: HabitId,
    pub date: NaiveDate,
    pub accomplished: bool,
}

/// Distinct accomplished days in ascending order, ready for the streak
/// engine.
pub fn accomplished_days(records: &[CompletionRecord]) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = records
        .iter()
        .filter(|record| record.accomplished)
        .map(|record| record.date)
        .collect();
    days.sort();
    days.dedup();
    days
}

/// Client-local per-period view of a habit. Goal progress is always derived
/// from the count and the goal, never stored, so the two cannot drift.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HabitViewState {
    pub accomplished_today: bool,
    pub weekly_count: u32,
}

impl HabitViewState {
    /// `(weekly_count / goal) * 100`, uncapped: exceeding the goal yields
    /// values over 100 and must render that way.
    pub fn goal_progress(&self, goal: u32) -> f64 {
        if goal == 0 {
            return 0.0;
        }
        f64::from(self.weekly_count) / f64::from(goal) * 100.0
    }
}

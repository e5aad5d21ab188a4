pub mod activity;
pub mod consistency;
pub mod dates;
pub mod habit;
pub mod streak;

pub use crate::activity::{classify, ActivityBands, ActivityTier};
pub use crate::consistency::{consistency, ConsistencyResult, DayCount};
pub use crate::dates::PeriodKind;
pub use crate::habit::{Habit, HabitId, HabitViewState};
pub use crate::streak::{compute_streaks, StreakResult};

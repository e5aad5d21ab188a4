use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Period selector shared by the analytics views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Weekly,
    Monthly,
}

/// First day of the period containing `date`. Weeks start on Sunday.
pub fn start_of_period(date: NaiveDate, kind: PeriodKind) -> NaiveDate {
    match kind {
        PeriodKind::Weekly => {
            let back = i64::from(date.weekday().num_days_from_sunday());
            date - Duration::days(back)
        }
        PeriodKind::Monthly => date.with_day(1).unwrap_or(date),
    }
}

/// Last day of the period containing `date` (Saturday for weekly periods).
pub fn end_of_period(date: NaiveDate, kind: PeriodKind) -> NaiveDate {
    match kind {
        PeriodKind::Weekly => start_of_period(date, kind) + Duration::days(6),
        PeriodKind::Monthly => {
            let (year, month) = if date.month() == 12 {
                (date.year() + 1, 1)
            } else {
                (date.year(), date.month() + 1)
            };
            NaiveDate::from_ymd_opt(year, month, 1)
                .map(|first_of_next| first_of_next - Duration::days(1))
                .unwrap_or(date)
        }
    }
}

pub fn period_bounds(date: NaiveDate, kind: PeriodKind) -> (NaiveDate, NaiveDate) {
    (start_of_period(date, kind), end_of_period(date, kind))
}

/// Short label like "Jan 5". Display only, never used for comparison.
pub fn format_short(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Interval label like "Jan 5 - Jan 11"; a single-day interval collapses
/// to one label.
pub fn format_range(start: NaiveDate, end: NaiveDate) -> String {
    if is_same_calendar_day(start, end) {
        format_short(start)
    } else {
        format!("{} - {}", format_short(start), format_short(end))
    }
}

/// The canonical day-equality comparison. Every day-level check in the
/// workspace routes through here so the day boundary is decided in exactly
/// one place.
pub fn is_same_calendar_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

/// Day equality for server timestamps: truncates to the naive date first.
pub fn is_same_calendar_day_dt(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    is_same_calendar_day(a.date_naive(), b.date_naive())
}

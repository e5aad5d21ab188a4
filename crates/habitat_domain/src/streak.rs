use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Days the last accomplished day may lag behind the query date while the
/// run still counts as "current". One day, so a streak survives until the
/// user has had a chance to act today.
pub const DEFAULT_GRACE_DAYS: i64 = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StreakError {
    #[error("accomplished days must be strictly ascending ({prev} appears before {next})")]
    UnsortedInput { prev: NaiveDate, next: NaiveDate },
}

/// Derived streak metrics. Ranges always point at dates from the input
/// series; a single-day run is the singleton range `(d, d)`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreakResult {
    pub current_len: u32,
    pub current_range: Option<(NaiveDate, NaiveDate)>,
    pub best_len: u32,
    pub best_range: Option<(NaiveDate, NaiveDate)>,
}

pub fn compute_streaks(days: &[NaiveDate], today: NaiveDate) -> Result<StreakResult, StreakError> {
    compute_streaks_with_grace(days, today, DEFAULT_GRACE_DAYS)
}

/// Splits the accomplished-day series into maximal runs of consecutive
/// calendar days, then reports the most recent run (if it ends within
/// `grace_days` of `today`) and the longest run, ties going to the most
/// recent occurrence.
pub fn compute_streaks_with_grace(
    days: &[NaiveDate],
    today: NaiveDate,
    grace_days: i64,
) -> Result<StreakResult, StreakError> {
    for pair in days.windows(2) {
        if pair[1] <= pair[0] {
            return Err(StreakError::UnsortedInput {
                prev: pair[0],
                next: pair[1],
            });
        }
    }

    let Some(&first) = days.first() else {
        return Ok(StreakResult::default());
    };

    let mut runs: Vec<(NaiveDate, NaiveDate)> = Vec::new();
    let mut run_start = first;
    let mut prev = first;
    for &day in &days[1..] {
        if day - prev > Duration::days(1) {
            runs.push((run_start, prev));
            run_start = day;
        }
        prev = day;
    }
    runs.push((run_start, prev));

    let mut best = runs[0];
    for &run in &runs[1..] {
        // >= so that among equal lengths the most recent run wins.
        if run_len(run) >= run_len(best) {
            best = run;
        }
    }

    let last = runs[runs.len() - 1];
    let (current_len, current_range) = if (today - last.1).num_days() <= grace_days {
        (run_len(last), Some(last))
    } else {
        (0, None)
    };

    Ok(StreakResult {
        current_len,
        current_range,
        best_len: run_len(best),
        best_range: Some(best),
    })
}

fn run_len((start, end): (NaiveDate, NaiveDate)) -> u32 {
    ((end - start).num_days() + 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn days(specs: &[(i32, u32, u32)]) -> Vec<NaiveDate> {
        specs.iter().map(|&(y, m, d)| date(y, m, d)).collect()
    }

    #[test]
    fn empty_series_has_no_streaks() {
        let result = compute_streaks(&[], date(2025, 6, 4)).unwrap();
        assert_eq!(result, StreakResult::default());
    }

    #[test]
    fn consecutive_week_days_form_one_run() {
        // Mon 2025-06-02 through Wed 2025-06-04, queried on the Wednesday.
        let series = days(&[(2025, 6, 2), (2025, 6, 3), (2025, 6, 4)]);
        let result = compute_streaks(&series, date(2025, 6, 4)).unwrap();
        assert_eq!(result.current_len, 3);
        assert_eq!(result.current_range, Some((date(2025, 6, 2), date(2025, 6, 4))));
        assert_eq!(result.best_len, 3);
        assert_eq!(result.best_range, result.current_range);
    }

    #[test]
    fn gap_splits_runs_and_grace_decides_currency() {
        // Mon and Wed with Tuesday skipped.
        let series = days(&[(2025, 6, 2), (2025, 6, 4)]);

        let queried_wednesday = compute_streaks(&series, date(2025, 6, 4)).unwrap();
        assert_eq!(queried_wednesday.best_len, 1);
        assert_eq!(queried_wednesday.current_len, 1);
        assert_eq!(
            queried_wednesday.current_range,
            Some((date(2025, 6, 4), date(2025, 6, 4)))
        );

        let queried_thursday = compute_streaks(&series, date(2025, 6, 5)).unwrap();
        assert_eq!(queried_thursday.current_len, 1, "one-day grace keeps it current");

        let queried_friday = compute_streaks(&series, date(2025, 6, 6)).unwrap();
        assert_eq!(queried_friday.current_len, 0);
        assert_eq!(queried_friday.current_range, None);
        assert_eq!(queried_friday.best_len, 1, "best streak ignores the grace window");
    }

    #[test]
    fn best_streak_ties_prefer_the_most_recent_run() {
        let series = days(&[
            (2025, 5, 1),
            (2025, 5, 2),
            (2025, 5, 10),
            (2025, 5, 11),
        ]);
        let result = compute_streaks(&series, date(2025, 5, 30)).unwrap();
        assert_eq!(result.best_len, 2);
        assert_eq!(result.best_range, Some((date(2025, 5, 10), date(2025, 5, 11))));
        assert_eq!(result.current_len, 0);
    }

    #[test]
    fn best_is_never_shorter_than_current() {
        let fixtures: Vec<Vec<NaiveDate>> = vec![
            days(&[(2025, 1, 1)]),
            days(&[(2025, 1, 1), (2025, 1, 2), (2025, 1, 5)]),
            days(&[(2025, 1, 1), (2025, 1, 3), (2025, 1, 4), (2025, 1, 5)]),
            days(&[(2025, 1, 1), (2025, 1, 4), (2025, 1, 7)]),
        ];
        for series in fixtures {
            let today = *series.last().unwrap();
            let result = compute_streaks(&series, today).unwrap();
            assert!(
                result.best_len >= result.current_len,
                "best {} < current {} for {series:?}",
                result.best_len,
                result.current_len
            );
        }
    }

    #[test]
    fn isolated_days_only_produce_unit_runs() {
        let series = days(&[(2025, 1, 1), (2025, 1, 4), (2025, 1, 7), (2025, 1, 10)]);
        let result = compute_streaks(&series, date(2025, 1, 10)).unwrap();
        assert_eq!(result.best_len, 1);
        assert_eq!(result.current_len, 1);
    }

    #[test]
    fn rejects_unsorted_and_duplicated_input() {
        let unsorted = days(&[(2025, 1, 2), (2025, 1, 1)]);
        assert_eq!(
            compute_streaks(&unsorted, date(2025, 1, 2)),
            Err(StreakError::UnsortedInput {
                prev: date(2025, 1, 2),
                next: date(2025, 1, 1),
            })
        );

        let duplicated = days(&[(2025, 1, 1), (2025, 1, 1)]);
        assert!(compute_streaks(&duplicated, date(2025, 1, 2)).is_err());
    }

    #[test]
    fn single_day_series_is_a_singleton_range() {
        let series = days(&[(2025, 6, 4)]);
        let result = compute_streaks(&series, date(2025, 6, 4)).unwrap();
        assert_eq!(result.current_len, 1);
        assert_eq!(result.current_range, Some((date(2025, 6, 4), date(2025, 6, 4))));
        assert_eq!(result.best_len, 1);
    }
}

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use habitat_domain::consistency::DayCount;
use habitat_domain::dates::PeriodKind;

use crate::api::{ConsistencySnapshot, StreakSnapshot};

/// Which analytics response a cache entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Streak,
    Consistency,
    DayCounts,
}

#[derive(Debug, Clone)]
enum CachedValue {
    Streak(StreakSnapshot),
    Consistency(ConsistencySnapshot),
    DayCounts(Vec<DayCount>),
}

/// Analytics responses keyed by `(metric, period)`. An accomplishment
/// toggle invalidates everything, so a displayed consistency figure can be
/// stale at most until the toggle lands; between toggles an entry lives
/// until the next natural refetch.
#[derive(Default)]
pub struct AnalyticsCache {
    entries: RwLock<HashMap<(Metric, PeriodKind), CachedValue>>,
}

impl AnalyticsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_streak(&self, period: PeriodKind) -> Option<StreakSnapshot> {
        match self.entries.read().get(&(Metric::Streak, period)) {
            Some(CachedValue::Streak(snapshot)) => Some(snapshot.clone()),
            _ => None,
        }
    }

    pub fn insert_streak(&self, period: PeriodKind, snapshot: StreakSnapshot) {
        self.entries
            .write()
            .insert((Metric::Streak, period), CachedValue::Streak(snapshot));
    }

    pub fn get_consistency(&self, period: PeriodKind) -> Option<ConsistencySnapshot> {
        match self.entries.read().get(&(Metric::Consistency, period)) {
            Some(CachedValue::Consistency(snapshot)) => Some(*snapshot),
            _ => None,
        }
    }

    pub fn insert_consistency(&self, period: PeriodKind, snapshot: ConsistencySnapshot) {
        self.entries
            .write()
            .insert((Metric::Consistency, period), CachedValue::Consistency(snapshot));
    }

    pub fn get_day_counts(&self, period: PeriodKind) -> Option<Vec<DayCount>> {
        match self.entries.read().get(&(Metric::DayCounts, period)) {
            Some(CachedValue::DayCounts(counts)) => Some(counts.clone()),
            _ => None,
        }
    }

    pub fn insert_day_counts(&self, period: PeriodKind, counts: Vec<DayCount>) {
        self.entries
            .write()
            .insert((Metric::DayCounts, period), CachedValue::DayCounts(counts));
    }

    pub fn invalidate_metric(&self, metric: Metric) {
        self.entries.write().retain(|(m, _), _| *m != metric);
    }

    pub fn invalidate_all(&self) {
        let mut entries = self.entries.write();
        if !entries.is_empty() {
            debug!(dropped = entries.len(), "invalidating analytics cache");
        }
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(best: u32) -> StreakSnapshot {
        StreakSnapshot {
            current_streak: 0,
            current_streak_range: None,
            best_streak: best,
            best_streak_range: None,
            accomplished_dates: Vec::new(),
        }
    }

    #[test]
    fn entries_are_keyed_by_metric_and_period() {
        let cache = AnalyticsCache::new();
        cache.insert_streak(PeriodKind::Weekly, snapshot(3));
        cache.insert_streak(PeriodKind::Monthly, snapshot(9));
        cache.insert_consistency(PeriodKind::Weekly, ConsistencySnapshot { percentage: 71.0 });

        assert_eq!(cache.get_streak(PeriodKind::Weekly).unwrap().best_streak, 3);
        assert_eq!(cache.get_streak(PeriodKind::Monthly).unwrap().best_streak, 9);
        assert_eq!(
            cache.get_consistency(PeriodKind::Weekly).unwrap().percentage,
            71.0
        );
        assert!(cache.get_consistency(PeriodKind::Monthly).is_none());
        assert!(cache.get_day_counts(PeriodKind::Weekly).is_none());
    }

    #[test]
    fn invalidate_all_empties_the_cache() {
        let cache = AnalyticsCache::new();
        cache.insert_streak(PeriodKind::Weekly, snapshot(2));
        cache.insert_consistency(PeriodKind::Monthly, ConsistencySnapshot { percentage: 50.0 });
        assert_eq!(cache.len(), 2);
        cache.invalidate_all();
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidate_metric_leaves_other_metrics_alone() {
        let cache = AnalyticsCache::new();
        cache.insert_streak(PeriodKind::Weekly, snapshot(2));
        cache.insert_consistency(PeriodKind::Weekly, ConsistencySnapshot { percentage: 40.0 });
        cache.invalidate_metric(Metric::Streak);
        assert!(cache.get_streak(PeriodKind::Weekly).is_none());
        assert!(cache.get_consistency(PeriodKind::Weekly).is_some());
    }
}

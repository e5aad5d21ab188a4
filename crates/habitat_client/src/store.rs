use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, warn};

use habitat_domain::dates::PeriodKind;
use habitat_domain::habit::{Habit, HabitId, HabitViewState};

use crate::api::HabitPage;

/// Identifies which fetch a page of habits belongs to. A response whose key
/// no longer matches the active key arrived after the user navigated away
/// and is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchKey {
    pub page: u32,
    pub period: PeriodKind,
}

#[derive(Default)]
struct StoreInner {
    habits: Vec<Habit>,
    states: HashMap<HabitId, HabitViewState>,
    goals: HashMap<HabitId, u32>,
    total: u32,
    total_pages: u32,
    active_key: Option<FetchKey>,
}

/// The single mutable shared resource of the session: habit catalog plus
/// per-habit view state for the active page and period. All mutations go
/// through [`HabitStore::load`] and [`HabitStore::apply_check`].
pub struct HabitStore {
    inner: RwLock<StoreInner>,
}

impl Default for HabitStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HabitStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
        }
    }

    /// Marks `key` as the page/period the user is looking at. Responses for
    /// any other key are stale from this point on.
    pub fn navigate(&self, key: FetchKey) {
        self.inner.write().active_key = Some(key);
    }

    pub fn active_key(&self) -> Option<FetchKey> {
        self.inner.read().active_key
    }

    /// Replaces the entire store contents atomically; never a partial
    /// merge, so no entry from a previous page can survive navigation.
    /// Returns false (and leaves the store untouched) when `key` is stale.
    pub fn load(&self, key: FetchKey, page: HabitPage) -> bool {
        let mut inner = self.inner.write();
        if inner.active_key.is_some_and(|active| active != key) {
            debug!(?key, active = ?inner.active_key, "discarding stale habit page");
            return false;
        }
        inner.active_key = Some(key);
        inner.total = page.total;
        inner.total_pages = page.total_pages;
        inner.habits.clear();
        inner.states.clear();
        inner.goals.clear();
        for summary in page.items {
            let id = summary.habit.id.clone();
            inner.states.insert(
                id.clone(),
                HabitViewState {
                    accomplished_today: summary.accomplished,
                    weekly_count: summary.weekly_count,
                },
            );
            inner.goals.insert(id, summary.habit.goal());
            inner.habits.push(summary.habit);
        }
        true
    }

    /// The single mutation entry point for user toggles. Returns false when
    /// the habit is not part of the loaded page.
    pub fn apply_check(&self, id: &HabitId, checked: bool) -> bool {
        let mut inner = self.inner.write();
        let Some(state) = inner.states.get_mut(id) else {
            warn!(habit = %id, "toggle for a habit outside the loaded page");
            return false;
        };
        state.accomplished_today = checked;
        if checked {
            state.weekly_count += 1;
        } else if state.weekly_count > 0 {
            state.weekly_count -= 1;
        } else {
            // A count must never go negative; an uncheck at zero means the
            // caller and store already disagree.
            warn!(habit = %id, "uncheck would drop weekly count below zero");
        }
        true
    }

    pub fn view(&self, id: &HabitId) -> Option<HabitViewState> {
        self.inner.read().states.get(id).copied()
    }

    /// Derived on every read from the current count and goal.
    pub fn goal_progress(&self, id: &HabitId) -> Option<f64> {
        let inner = self.inner.read();
        let state = inner.states.get(id)?;
        let goal = inner.goals.get(id)?;
        Some(state.goal_progress(*goal))
    }

    pub fn habits(&self) -> Vec<Habit> {
        self.inner.read().habits.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().habits.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.inner.read().total
    }

    pub fn total_pages(&self) -> u32 {
        self.inner.read().total_pages
    }

    pub fn completed_today(&self) -> usize {
        self.inner
            .read()
            .states
            .values()
            .filter(|state| state.accomplished_today)
            .count()
    }

    /// Share of today's habits already completed, for the dashboard header.
    pub fn completion_ratio(&self) -> f64 {
        let inner = self.inner.read();
        if inner.total == 0 {
            return 0.0;
        }
        let completed = inner
            .states
            .values()
            .filter(|state| state.accomplished_today)
            .count();
        completed as f64 / f64::from(inner.total) * 100.0
    }
}

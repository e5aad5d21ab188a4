use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use habitat_domain::consistency::DayCount;
use habitat_domain::dates::PeriodKind;
use habitat_domain::habit::HabitId;

use crate::api::{
    ApiError, ConsistencySnapshot, DateRange, HabitBackend, StreakSnapshot, StreakTarget,
};
use crate::cache::AnalyticsCache;
use crate::notify::{Toast, ToastSink};
use crate::store::{FetchKey, HabitStore};

/// Outcome of one (habit, day) toggle. The optimistic mutation happens on
/// entry to `Pending`; `RolledBack` records a failed confirmation, which
/// deliberately does not revert the local state (the failure is surfaced as
/// a toast instead).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    Pending,
    Confirmed,
    RolledBack,
}

/// Mediates user check/uncheck actions between the store and the backend.
/// Local state updates immediately; the backend confirmation is awaited
/// afterwards. Because the mutation is applied synchronously at issue time
/// on the single logical thread, per-habit counts always follow user-intent
/// order regardless of response order.
pub struct UpdateCoordinator {
    store: Arc<HabitStore>,
    backend: Arc<dyn HabitBackend>,
    cache: AnalyticsCache,
    toasts: Arc<dyn ToastSink>,
}

impl UpdateCoordinator {
    pub fn new(
        store: Arc<HabitStore>,
        backend: Arc<dyn HabitBackend>,
        toasts: Arc<dyn ToastSink>,
    ) -> Self {
        Self {
            store,
            backend,
            cache: AnalyticsCache::new(),
            toasts,
        }
    }

    pub fn store(&self) -> &HabitStore {
        &self.store
    }

    pub fn cache(&self) -> &AnalyticsCache {
        &self.cache
    }

    /// Applies the toggle locally, invalidates cached analytics for the
    /// mutated period, then asks the backend to persist it. No automatic
    /// retry: a failed confirmation leaves re-action to the user.
    pub async fn toggle(&self, id: &HabitId, checked: bool) -> ToggleState {
        if !self.store.apply_check(id, checked) {
            self.toasts
                .push(Toast::error("This habit is no longer on the current page."));
            return ToggleState::RolledBack;
        }
        self.cache.invalidate_all();
        debug!(habit = %id, checked, "toggle pending");

        match self.backend.toggle_accomplishment(id).await {
            Ok(()) => {
                debug!(habit = %id, "toggle confirmed");
                ToggleState::Confirmed
            }
            Err(ApiError::RecordNotFound) => {
                warn!(habit = %id, "completion record missing on the server");
                self.toasts.push(Toast::error(
                    "This habit is out of sync with the server. Refresh to reconcile.",
                ));
                ToggleState::RolledBack
            }
            Err(err) => {
                warn!(habit = %id, error = %err, "toggle confirmation failed");
                self.toasts
                    .push(Toast::error(format!("Did not update habit: {err}")));
                ToggleState::RolledBack
            }
        }
    }

    /// Fetches a habit page and loads it into the store. Returns Ok(false)
    /// when the response arrived for a page the user already left.
    pub async fn refresh_habits(&self, key: FetchKey, limit: u32) -> Result<bool, ApiError> {
        let page = match self.backend.list_habits(key.page, limit).await {
            Ok(page) => page,
            Err(err) => {
                self.toasts
                    .push(Toast::error(format!("Failed to fetch habits: {err}")));
                return Err(err);
            }
        };
        Ok(self.store.load(key, page))
    }

    /// Streak metrics for the overview cards. Aggregate queries are cached
    /// per period; per-habit queries always go to the backend.
    pub async fn streak_overview(
        &self,
        target: &StreakTarget,
        period: PeriodKind,
    ) -> Result<StreakSnapshot, ApiError> {
        if matches!(target, StreakTarget::Aggregate) {
            if let Some(snapshot) = self.cache.get_streak(period) {
                return Ok(snapshot);
            }
        }
        let snapshot = self.backend.habit_streak(target, period).await?;
        if matches!(target, StreakTarget::Aggregate) {
            self.cache.insert_streak(period, snapshot.clone());
        }
        Ok(snapshot)
    }

    pub async fn consistency_overview(
        &self,
        period: PeriodKind,
    ) -> Result<ConsistencySnapshot, ApiError> {
        if let Some(snapshot) = self.cache.get_consistency(period) {
            return Ok(snapshot);
        }
        let snapshot = self.backend.consistency(period).await?;
        self.cache.insert_consistency(period, snapshot);
        Ok(snapshot)
    }

    /// Day counts for the calendar heatmap of the period containing
    /// `today`, cached per period selector.
    pub async fn day_counts(
        &self,
        today: NaiveDate,
        period: PeriodKind,
    ) -> Result<Vec<DayCount>, ApiError> {
        if let Some(counts) = self.cache.get_day_counts(period) {
            return Ok(counts);
        }
        let range = DateRange::period_of(today, period);
        let counts = self.backend.habit_day_counts(range).await?;
        self.cache.insert_day_counts(period, counts.clone());
        Ok(counts)
    }
}

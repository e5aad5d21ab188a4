pub mod api;
pub mod cache;
pub mod coordinator;
pub mod notify;
pub mod store;

pub use crate::api::{ApiError, HabitBackend};
pub use crate::coordinator::{ToggleState, UpdateCoordinator};
pub use crate::store::{FetchKey, HabitStore};

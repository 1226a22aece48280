//! Repository trait for schedule persistence.
//!
//! The editor reads and writes whole schedules keyed by their term. Storage
//! backends implement [`ScheduleRepository`]; the in-memory
//! [`LocalRepository`](crate::db::repositories::LocalRepository) is used for
//! local development and tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{Schedule, Telescope};

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Lightweight description of a stored schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleInfo {
    pub term: String,
    pub telescope: Telescope,
    pub project_count: usize,
    pub slot_count: usize,
    /// SHA-256 of the schedule's JSON encoding, hex
    pub checksum: String,
    /// False when a store found identical content already present
    #[serde(default)]
    pub changed: bool,
}

impl ScheduleInfo {
    pub fn describe(schedule: &Schedule, checksum: impl Into<String>, changed: bool) -> Self {
        Self {
            term: schedule.term.clone(),
            telescope: schedule.telescope,
            project_count: schedule.projects.len(),
            slot_count: schedule.slot_count(),
            checksum: checksum.into(),
            changed,
        }
    }
}

/// Repository trait for schedule storage.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Check if the backing store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// List all stored schedules, ordered by term.
    async fn list_schedules(&self) -> RepositoryResult<Vec<ScheduleInfo>>;

    /// Retrieve a complete schedule by term.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no schedule has this term
    async fn get_schedule(&self, term: &str) -> RepositoryResult<Schedule>;

    /// Store a schedule, replacing any schedule with the same term.
    ///
    /// Storing content identical to what is already present is a no-op and
    /// reports `changed == false`.
    async fn store_schedule(&self, schedule: &Schedule) -> RepositoryResult<ScheduleInfo>;

    /// Delete a schedule by term.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no schedule has this term
    async fn delete_schedule(&self, term: &str) -> RepositoryResult<()>;
}

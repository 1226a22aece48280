//! In-memory local repository implementation.
//!
//! Schedules are kept in a map keyed by term, behind a `parking_lot` lock.
//! Suitable for local development and tests: fast, deterministic, and isolated
//! per instance.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::db::checksum::schedule_checksum;
use crate::db::repository::{
    ErrorContext, RepositoryError, RepositoryResult, ScheduleInfo, ScheduleRepository,
};
use crate::models::Schedule;

/// In-memory local repository.
///
/// Clones share the same storage.
///
/// # Example
/// ```
/// use atsched::db::repositories::LocalRepository;
/// use atsched::db::ScheduleRepository;
/// use atsched::models::{Schedule, Telescope};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let repo = LocalRepository::new();
///     repo.store_schedule(&Schedule::new("2025OCT", Telescope::Atca)).await?;
///
///     let schedules = repo.list_schedules().await?;
///     assert_eq!(schedules.len(), 1);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct StoredSchedule {
    schedule: Schedule,
    checksum: String,
}

struct LocalData {
    schedules: BTreeMap<String, StoredSchedule>,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            schedules: BTreeMap::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        self.data.write().schedules.clear();
    }

    /// Get the number of schedules stored.
    pub fn schedule_count(&self) -> usize {
        self.data.read().schedules.len()
    }

    pub fn has_schedule(&self, term: &str) -> bool {
        self.data.read().schedules.contains_key(term)
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(
                RepositoryError::connection("Repository is not healthy").with_operation(operation),
            );
        }
        Ok(())
    }

    fn not_found(operation: &str, term: &str) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Schedule {} not found", term),
            ErrorContext::new(operation)
                .with_entity("schedule")
                .with_entity_id(term),
        )
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScheduleRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list_schedules(&self) -> RepositoryResult<Vec<ScheduleInfo>> {
        self.check_health("list_schedules")?;
        let data = self.data.read();
        Ok(data
            .schedules
            .values()
            .map(|stored| ScheduleInfo::describe(&stored.schedule, stored.checksum.clone(), false))
            .collect())
    }

    async fn get_schedule(&self, term: &str) -> RepositoryResult<Schedule> {
        self.check_health("get_schedule")?;
        let data = self.data.read();
        data.schedules
            .get(term)
            .map(|stored| stored.schedule.clone())
            .ok_or_else(|| Self::not_found("get_schedule", term))
    }

    async fn store_schedule(&self, schedule: &Schedule) -> RepositoryResult<ScheduleInfo> {
        self.check_health("store_schedule")?;
        let checksum = schedule_checksum(schedule)?;

        let mut data = self.data.write();
        let unchanged = data
            .schedules
            .get(&schedule.term)
            .is_some_and(|stored| stored.checksum == checksum);
        if !unchanged {
            data.schedules.insert(
                schedule.term.clone(),
                StoredSchedule {
                    schedule: schedule.clone(),
                    checksum: checksum.clone(),
                },
            );
        }
        Ok(ScheduleInfo::describe(schedule, checksum, !unchanged))
    }

    async fn delete_schedule(&self, term: &str) -> RepositoryResult<()> {
        self.check_health("delete_schedule")?;
        self.data
            .write()
            .schedules
            .remove(term)
            .map(|_| ())
            .ok_or_else(|| Self::not_found("delete_schedule", term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Project, Telescope};

    fn schedule(term: &str) -> Schedule {
        Schedule::new(term, Telescope::Atca)
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());

        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
        assert!(matches!(
            repo.list_schedules().await,
            Err(RepositoryError::ConnectionError { .. })
        ));
    }

    #[tokio::test]
    async fn test_store_and_retrieve_schedule() {
        let repo = LocalRepository::new();
        let mut original = schedule("2025OCT");
        original.projects.push(Project::new("C001"));

        let info = repo.store_schedule(&original).await.unwrap();
        assert!(info.changed);
        assert_eq!(info.project_count, 1);

        let retrieved = repo.get_schedule("2025OCT").await.unwrap();
        assert_eq!(retrieved, original);
    }

    #[tokio::test]
    async fn test_store_identical_content_is_noop() {
        let repo = LocalRepository::new();
        let first = repo.store_schedule(&schedule("2025OCT")).await.unwrap();
        let second = repo.store_schedule(&schedule("2025OCT")).await.unwrap();

        assert!(first.changed);
        assert!(!second.changed);
        assert_eq!(first.checksum, second.checksum);
        assert_eq!(repo.schedule_count(), 1);
    }

    #[tokio::test]
    async fn test_list_schedules_sorted_by_term() {
        let repo = LocalRepository::new();
        repo.store_schedule(&schedule("2025OCT")).await.unwrap();
        repo.store_schedule(&schedule("2025APR")).await.unwrap();

        let terms: Vec<String> = repo
            .list_schedules()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.term)
            .collect();
        assert_eq!(terms, vec!["2025APR", "2025OCT"]);
    }

    #[tokio::test]
    async fn test_not_found_error() {
        let repo = LocalRepository::new();

        let result = repo.get_schedule("1999APR").await;
        match result {
            Err(RepositoryError::NotFound { context, .. }) => {
                assert_eq!(context.entity_id.as_deref(), Some("1999APR"));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert!(repo.delete_schedule("1999APR").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let repo = LocalRepository::new();
        repo.store_schedule(&schedule("2025APR")).await.unwrap();
        repo.store_schedule(&schedule("2025OCT")).await.unwrap();

        repo.delete_schedule("2025APR").await.unwrap();
        assert!(!repo.has_schedule("2025APR"));
        assert!(repo.has_schedule("2025OCT"));

        repo.clear();
        assert_eq!(repo.schedule_count(), 0);
    }
}

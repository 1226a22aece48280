//! High-level database service layer.
//!
//! Repository-agnostic operations with the checks that should hold regardless
//! of the storage backend. Prefer these over calling the repository directly.
//!
//! # Usage
//!
//! ```no_run
//! use atsched::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!
//!     let schedules = services::list_schedules(&repo).await?;
//!     println!("Found {} schedules", schedules.len());
//!
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;

use log::{debug, info};

use super::repository::{
    ErrorContext, RepositoryError, RepositoryResult, ScheduleInfo, ScheduleRepository,
};
use crate::models::Schedule;

/// Check if the backing store is healthy.
pub async fn health_check<R: ScheduleRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// List all stored schedules.
pub async fn list_schedules<R: ScheduleRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<ScheduleInfo>> {
    repo.list_schedules().await
}

/// Fetch a schedule by term.
pub async fn get_schedule<R: ScheduleRepository + ?Sized>(
    repo: &R,
    term: &str,
) -> RepositoryResult<Schedule> {
    repo.get_schedule(term).await
}

/// Reject schedules that could not be addressed once stored.
///
/// The term must be non-blank and project idents must be unique, since both
/// are used as lookup keys.
pub fn validate_schedule(schedule: &Schedule) -> RepositoryResult<()> {
    let context = || {
        ErrorContext::new("validate_schedule")
            .with_entity("schedule")
            .with_entity_id(&schedule.term)
    };

    if schedule.term.trim().is_empty() {
        return Err(RepositoryError::validation_with_context(
            "schedule term is empty",
            context(),
        ));
    }

    let mut seen = HashSet::new();
    for project in &schedule.projects {
        if project.ident.trim().is_empty() {
            return Err(RepositoryError::validation_with_context(
                "project ident is empty",
                context(),
            ));
        }
        if !seen.insert(project.ident.as_str()) {
            return Err(RepositoryError::validation_with_context(
                format!("duplicate project ident {}", project.ident),
                context().with_details("project idents must be unique"),
            ));
        }
    }
    Ok(())
}

/// Validate and store a schedule.
///
/// Storing content identical to the stored copy leaves the repository
/// untouched and reports `changed == false`.
pub async fn store_schedule<R: ScheduleRepository + ?Sized>(
    repo: &R,
    schedule: &Schedule,
) -> RepositoryResult<ScheduleInfo> {
    validate_schedule(schedule)?;
    info!(
        "Service layer: storing schedule '{}' ({}, {} projects, {} slots)",
        schedule.term,
        schedule.telescope,
        schedule.projects.len(),
        schedule.slot_count(),
    );

    let info = repo.store_schedule(schedule).await?;
    if info.changed {
        info!(
            "Service layer: stored schedule '{}' (checksum {})",
            info.term, info.checksum
        );
    } else {
        debug!(
            "Service layer: schedule '{}' unchanged, nothing written",
            info.term
        );
    }
    Ok(info)
}

/// Delete a schedule by term.
pub async fn delete_schedule<R: ScheduleRepository + ?Sized>(
    repo: &R,
    term: &str,
) -> RepositoryResult<()> {
    repo.delete_schedule(term).await?;
    info!("Service layer: deleted schedule '{}'", term);
    Ok(())
}

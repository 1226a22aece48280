//! Integration tests for schedule storage through the db service layer.

mod support;

use std::sync::Arc;

use atsched::db::repositories::LocalRepository;
use atsched::db::repository::{RepositoryError, ScheduleRepository};
use atsched::db::{services, RepositoryFactory, RepositoryType};
use atsched::models::{Project, Telescope};

#[tokio::test]
async fn test_store_edit_store_detects_changes() {
    let repo = LocalRepository::new();
    let schedule = support::sample_schedule("2025OCT");

    let first = services::store_schedule(&repo, &schedule).await.unwrap();
    assert!(first.changed);
    assert_eq!(first.slot_count, 3);

    let unchanged = services::store_schedule(&repo, &schedule).await.unwrap();
    assert!(!unchanged.changed);
    assert_eq!(unchanged.checksum, first.checksum);

    let mut edited = services::get_schedule(&repo, "2025OCT").await.unwrap();
    edited.projects.push(Project::new("C9999"));
    let second = services::store_schedule(&repo, &edited).await.unwrap();
    assert!(second.changed);
    assert_ne!(second.checksum, first.checksum);
    assert_eq!(second.project_count, 2);
}

#[tokio::test]
async fn test_concurrent_stores_of_distinct_terms() {
    let repo = Arc::new(LocalRepository::new());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                let schedule = support::sample_schedule(&format!("T{:02}", i));
                repo.store_schedule(&schedule).await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap().changed);
    }

    let listed = services::list_schedules(repo.as_ref()).await.unwrap();
    assert_eq!(listed.len(), 16);
    assert_eq!(listed[0].term, "T00");
    assert_eq!(listed[15].term, "T15");
}

#[tokio::test]
async fn test_concurrent_identical_stores_write_once() {
    let repo = Arc::new(LocalRepository::new());
    let schedule = support::sample_schedule("2025OCT");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = Arc::clone(&repo);
            let schedule = schedule.clone();
            tokio::spawn(async move { repo.store_schedule(&schedule).await })
        })
        .collect();

    let mut changed = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().changed {
            changed += 1;
        }
    }
    assert_eq!(changed, 1);
}

#[tokio::test]
async fn test_unhealthy_repository_rejects_operations() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);

    assert!(!services::health_check(&repo).await.unwrap());
    let err = services::store_schedule(&repo, &support::sample_schedule("2025OCT"))
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.context().operation.as_deref(), Some("store_schedule"));

    repo.set_healthy(true);
    assert!(services::store_schedule(&repo, &support::sample_schedule("2025OCT"))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_delete_unknown_term_is_not_found() {
    let repo = RepositoryFactory::create(RepositoryType::Local);
    let err = services::delete_schedule(repo.as_ref(), "1999APR")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_telescope_survives_storage() {
    let repo = LocalRepository::new();
    let mut schedule = support::sample_schedule("2026APR");
    schedule.telescope = Telescope::Parkes;

    let info = services::store_schedule(&repo, &schedule).await.unwrap();
    assert_eq!(info.telescope, Telescope::Parkes);

    let fetched = services::get_schedule(&repo, "2026APR").await.unwrap();
    assert_eq!(fetched.observatory().name, "Parkes");
}

//! Repository factory for dependency injection.
//!
//! Creates repository instances from runtime configuration.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::repositories::LocalRepository;
use super::repository::{RepositoryResult, ScheduleRepository};
use crate::config::AppConfig;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("local" or "memory").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```
/// use atsched::db::{RepositoryFactory, RepositoryType};
///
/// let repo = RepositoryFactory::create(RepositoryType::Local);
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    pub fn create(repo_type: RepositoryType) -> Arc<dyn ScheduleRepository> {
        match repo_type {
            RepositoryType::Local => Self::create_local(),
        }
    }

    /// Create an empty in-memory repository.
    pub fn create_local() -> Arc<dyn ScheduleRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create the repository selected by `config`.
    pub fn from_config(config: &AppConfig) -> RepositoryResult<Arc<dyn ScheduleRepository>> {
        Ok(Self::create(config.repository_type()?))
    }
}

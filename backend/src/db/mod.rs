//! Schedule persistence.
//!
//! Storage is abstracted behind the [`ScheduleRepository`] trait so that
//! backends can be swapped without touching the editor or the HTTP layer.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, server binary)            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Schedule validation                                  │
//! │  - Logging                                              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                 │
//!     │     (in-memory, checksum change detection)   │
//!     └──────────────────────────────────────────────┘
//! ```

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod checksum;
pub mod factory;
pub mod repositories;
pub mod repository;
pub mod services;

pub use checksum::{calculate_checksum, schedule_checksum};
pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
pub use repository::{
    ErrorContext, RepositoryError, RepositoryResult, ScheduleInfo, ScheduleRepository,
};

//! Schedule data model: schedules, projects, observation slots and sites.

pub mod observatory;
pub mod project;
pub mod schedule;
pub mod slot;

pub use observatory::*;
pub use project::*;
pub use schedule::*;
pub use slot::*;

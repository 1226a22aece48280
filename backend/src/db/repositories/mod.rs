//! Repository implementations.
//!
//! - `local`: in-memory implementation for tests and local development
pub mod local;

pub use local::LocalRepository;

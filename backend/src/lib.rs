//! # atsched
//!
//! Core of an observing schedule editor for the ATCA and Parkes telescopes.
//!
//! A schedule holds the projects of one observing term, and each project a list
//! of observation slots. This crate provides the pieces the editor is built
//! from: grouping of identical slots for display, default LST windows from a
//! target's rise and set, editing operations with single-level undo, schedule
//! storage and an HTTP API for the web front end.
//!
//! ## Architecture
//!
//! - [`astro`]: sexagesimal angle parsing and visibility windows
//! - [`models`]: schedules, projects, slots and observatories
//! - [`services`]: slot grouping, editing operations and undo history
//! - [`db`]: repository pattern and persistence layer
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```
//! use atsched::models::{Project, Schedule, Telescope};
//! use atsched::services::editor::{add_slot, SlotRequest};
//! use atsched::services::{summarize_groups, ScheduleHistory};
//!
//! let mut schedule = Schedule::new("2025OCT", Telescope::Atca);
//! schedule.projects.push(Project::new("C3132"));
//! let site = schedule.observatory();
//!
//! let request = SlotRequest {
//!     source: "crab".to_string(),
//!     ra: "05:34:32".to_string(),
//!     dec: "+22:00:48".to_string(),
//!     requested_duration: 4.0,
//!     array: "6A".to_string(),
//!     bandwidth: "CFB1M".to_string(),
//!     bands: vec!["4cm".to_string()],
//!     ..Default::default()
//! };
//!
//! let history = ScheduleHistory::new(schedule);
//! let (history, added) = history
//!     .apply(|s| add_slot(s, "C3132", &request, &site, 2))
//!     .unwrap();
//! assert_eq!(added, vec![0, 1]);
//!
//! let slots = &history.current().project("C3132").unwrap().slots;
//! assert_eq!(summarize_groups(slots)[0].count, 2);
//!
//! let restored = history.undo().unwrap();
//! assert!(restored.current().project("C3132").unwrap().slots.is_empty());
//! ```

// RepositoryError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod astro;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{AstroError, AstroResult, EditError, EditResult};

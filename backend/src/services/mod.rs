//! Schedule editing services.
//!
//! These sit between the data model and the HTTP layer: grouping of identical
//! slots for display, the editing operations themselves, and single-level undo.

pub mod editor;
pub mod grouping;
pub mod history;

pub use editor::SlotRequest;
pub use grouping::{group_slots, summarize_groups, GroupSummary, SlotGroup};
pub use history::{EditHistory, ScheduleHistory};

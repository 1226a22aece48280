//! Angle parsing and visibility calculations.

pub mod sexagesimal;
pub mod visibility;

pub use visibility::{compute_default_window, hour_angle_at_elevation, LstWindow};

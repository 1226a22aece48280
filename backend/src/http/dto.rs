//! Data Transfer Objects for the HTTP API.
//!
//! Schedules, schedule listings and group rows are served in their library
//! shapes; the types here cover the remaining request and response bodies.

use serde::{Deserialize, Serialize};

pub use crate::db::repository::ScheduleInfo;
pub use crate::services::editor::SlotRequest;
pub use crate::services::grouping::GroupSummary;
use crate::models::Telescope;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// "connected", "disconnected" or the health check error
    pub repository: String,
}

/// Response for listing schedules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleListResponse {
    pub schedules: Vec<ScheduleInfo>,
    pub total: usize,
}

/// Request body for adding identical slots to a project.
///
/// The slot fields sit at the top level next to `repeats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSlotsRequest {
    #[serde(flatten)]
    pub slot: SlotRequest,
    #[serde(default = "default_repeats")]
    pub repeats: usize,
}

fn default_repeats() -> usize {
    1
}

/// Response after adding slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSlotsResponse {
    /// Indices of the new slots within the project
    pub added: Vec<usize>,
    /// The project's slot groups after the edit
    pub groups: Vec<GroupSummary>,
    pub schedule: ScheduleInfo,
}

/// Request body for computing a default LST window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityWindowRequest {
    pub ra: String,
    pub dec: String,
    /// Defaults to the configured telescope
    #[serde(default)]
    pub telescope: Option<Telescope>,
}

/// Default LST window for a target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityWindowResponse {
    pub lst_start: String,
    pub lst_end: String,
    /// Hour angle at the elevation limit, degrees
    pub hour_angle_deg: f64,
    pub observatory: String,
}

//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the db
//! service layer and the editing services.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::dto::{
    AddSlotsRequest, AddSlotsResponse, HealthResponse, ScheduleListResponse,
    VisibilityWindowRequest, VisibilityWindowResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::astro::visibility::compute_default_window;
use crate::db::repository::{ErrorContext, RepositoryError, ScheduleInfo};
use crate::db::services as db_services;
use crate::error::EditError;
use crate::models::Schedule;
use crate::services::editor;
use crate::services::grouping::{summarize_groups, GroupSummary};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the repository is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repo_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        repository: repo_status,
    }))
}

// =============================================================================
// Schedule CRUD
// =============================================================================

/// GET /v1/schedules
pub async fn list_schedules(State(state): State<AppState>) -> HandlerResult<ScheduleListResponse> {
    let schedules = db_services::list_schedules(state.repository.as_ref()).await?;
    let total = schedules.len();
    Ok(Json(ScheduleListResponse { schedules, total }))
}

/// GET /v1/schedules/{term}
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> HandlerResult<Schedule> {
    let schedule = db_services::get_schedule(state.repository.as_ref(), &term).await?;
    Ok(Json(schedule))
}

/// PUT /v1/schedules/{term}
///
/// Store a schedule under `term`. The body's own term must agree with the path.
pub async fn put_schedule(
    State(state): State<AppState>,
    Path(term): Path<String>,
    Json(schedule): Json<Schedule>,
) -> HandlerResult<ScheduleInfo> {
    if schedule.term != term {
        return Err(RepositoryError::conflict_with_context(
            format!(
                "schedule term '{}' does not match path term '{}'",
                schedule.term, term
            ),
            ErrorContext::new("put_schedule")
                .with_entity("schedule")
                .with_entity_id(&term),
        )
        .into());
    }

    let info = db_services::store_schedule(state.repository.as_ref(), &schedule).await?;
    Ok(Json(info))
}

/// DELETE /v1/schedules/{term}
pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> Result<StatusCode, AppError> {
    db_services::delete_schedule(state.repository.as_ref(), &term).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Slot editing
// =============================================================================

/// GET /v1/schedules/{term}/projects/{ident}/slot-groups
///
/// One row per group of identical slots in the project.
pub async fn get_slot_groups(
    State(state): State<AppState>,
    Path((term, ident)): Path<(String, String)>,
) -> HandlerResult<Vec<GroupSummary>> {
    let schedule = db_services::get_schedule(state.repository.as_ref(), &term).await?;
    let project = schedule
        .project(&ident)
        .ok_or(EditError::ProjectNotFound(ident))?;
    Ok(Json(summarize_groups(&project.slots)))
}

/// POST /v1/schedules/{term}/projects/{ident}/slots
///
/// Append identical slots to a project and store the edited schedule. Blank
/// LST bounds are filled from the target's visibility at the schedule's
/// telescope.
pub async fn add_slots(
    State(state): State<AppState>,
    Path((term, ident)): Path<(String, String)>,
    Json(request): Json<AddSlotsRequest>,
) -> Result<(StatusCode, Json<AddSlotsResponse>), AppError> {
    let mut schedule = db_services::get_schedule(state.repository.as_ref(), &term).await?;
    let observatory = state.observatory_for(schedule.telescope);

    let added = editor::add_slot(
        &mut schedule,
        &ident,
        &request.slot,
        &observatory,
        request.repeats,
    )?;
    let info = db_services::store_schedule(state.repository.as_ref(), &schedule).await?;
    info!(
        "Added {} slot(s) of {} to {}/{}",
        added.len(),
        request.slot.source.trim(),
        term,
        ident
    );

    let groups = schedule
        .project(&ident)
        .map(|project| summarize_groups(&project.slots))
        .unwrap_or_default();

    Ok((
        StatusCode::CREATED,
        Json(AddSlotsResponse {
            added,
            groups,
            schedule: info,
        }),
    ))
}

// =============================================================================
// Visibility
// =============================================================================

/// POST /v1/visibility/window
///
/// Default LST window for a target at the requested (or configured) telescope.
pub async fn visibility_window(
    State(state): State<AppState>,
    Json(request): Json<VisibilityWindowRequest>,
) -> HandlerResult<VisibilityWindowResponse> {
    let telescope = request.telescope.unwrap_or(state.site.telescope);
    let observatory = state.observatory_for(telescope);
    let window = compute_default_window(&request.ra, &request.dec, &observatory)?;

    Ok(Json(VisibilityWindowResponse {
        lst_start: window.lst_start,
        lst_end: window.lst_end,
        hour_angle_deg: window.hour_angle.value(),
        observatory: observatory.name,
    }))
}

//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Largest accepted request body; a full term's schedule is well below this.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Schedule CRUD
        .route("/schedules", get(handlers::list_schedules))
        .route(
            "/schedules/{term}",
            get(handlers::get_schedule)
                .put(handlers::put_schedule)
                .delete(handlers::delete_schedule),
        )
        // Slot editing
        .route(
            "/schedules/{term}/projects/{ident}/slot-groups",
            get(handlers::get_slot_groups),
        )
        .route(
            "/schedules/{term}/projects/{ident}/slots",
            post(handlers::add_slots),
        )
        // Visibility
        .route("/visibility/window", post(handlers::visibility_window));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new())
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

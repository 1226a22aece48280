//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::error::{AstroError, EditError};

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Repository error
    Repository(RepositoryError),
    /// Rejected schedule edit
    Edit(EditError),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ApiError) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Repository(e) => {
                let details = e.context().to_string();
                let (status, code, message) = match e {
                    RepositoryError::NotFound { message, .. } => {
                        (StatusCode::NOT_FOUND, "NOT_FOUND", message)
                    }
                    RepositoryError::ValidationError { message, .. } => {
                        (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
                    }
                    RepositoryError::ConflictError { message, .. } => {
                        (StatusCode::CONFLICT, "CONFLICT", message)
                    }
                    RepositoryError::ConnectionError { message, .. } => {
                        (StatusCode::SERVICE_UNAVAILABLE, "REPOSITORY_UNAVAILABLE", message)
                    }
                    RepositoryError::ConfigurationError { message, .. }
                    | RepositoryError::InternalError { message, .. } => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "REPOSITORY_ERROR", message)
                    }
                };
                (status, ApiError::new(code, message).with_details(details))
            }
            AppError::Edit(e) => {
                let (status, code) = match &e {
                    EditError::ProjectNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                    EditError::DuplicateProject(_) | EditError::WouldDropScheduledSlot { .. } => {
                        (StatusCode::CONFLICT, "CONFLICT")
                    }
                    EditError::Astro(_) => (StatusCode::BAD_REQUEST, "INVALID_COORDINATES"),
                    _ => (StatusCode::BAD_REQUEST, "INVALID_EDIT"),
                };
                (status, ApiError::new(code, e.to_string()))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_body();
        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<EditError> for AppError {
    fn from(err: EditError) -> Self {
        AppError::Edit(err)
    }
}

impl From<AstroError> for AppError {
    fn from(err: AstroError) -> Self {
        AppError::Edit(EditError::Astro(err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::ErrorContext;

    fn status_of(err: AppError) -> (StatusCode, String) {
        let (status, body) = err.status_and_body();
        (status, body.code)
    }

    #[test]
    fn test_repository_errors_map_by_variant() {
        assert_eq!(
            status_of(RepositoryError::not_found("x").into()),
            (StatusCode::NOT_FOUND, "NOT_FOUND".to_string())
        );
        assert_eq!(
            status_of(RepositoryError::validation("x").into()).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(RepositoryError::conflict("x").into()).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(RepositoryError::connection("x").into()).0,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_edit_errors_map_to_client_errors() {
        assert_eq!(
            status_of(EditError::ProjectNotFound("C001".into()).into()).0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(EditError::EmptySelection.into()),
            (StatusCode::BAD_REQUEST, "INVALID_EDIT".to_string())
        );
        assert_eq!(
            status_of(AstroError::invalid_input("nan").into()),
            (StatusCode::BAD_REQUEST, "INVALID_COORDINATES".to_string())
        );
    }

    #[test]
    fn test_repository_context_becomes_details() {
        let err = RepositoryError::not_found_with_context(
            "Schedule 2025OCT not found",
            ErrorContext::new("get_schedule").with_entity_id("2025OCT"),
        );
        let (_, body) = AppError::from(err).status_and_body();
        assert_eq!(body.message, "Schedule 2025OCT not found");
        assert_eq!(
            body.details.as_deref(),
            Some("[operation=get_schedule, id=2025OCT]")
        );
    }
}

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::ErrorKind;
use serde_json::json;
use service::ServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("Malformed request body: {0}")]
    Body(#[from] JsonRejection),
    #[error("Malformed path: {0}")]
    Path(#[from] PathRejection),
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        let err = match self {
            AppError::Body(rejection) => return (StatusCode::BAD_REQUEST, rejection.body_text()),
            AppError::Path(rejection) => return (StatusCode::BAD_REQUEST, rejection.body_text()),
            AppError::Service(err) => err,
        };
        match err.kind() {
            ErrorKind::AlreadyExists(entity) => {
                (StatusCode::CONFLICT, format!("{entity} already exists"))
            }
            ErrorKind::DoesNotExist(entity) => {
                (StatusCode::NOT_FOUND, format!("{entity} does not exist"))
            }
            ErrorKind::ForeignKeyConstraint(entity) => (
                StatusCode::CONFLICT,
                format!("{entity} is still referenced by other records"),
            ),
            ErrorKind::ValidationFailed => (StatusCode::BAD_REQUEST, err.to_string()),
            ErrorKind::Unavailable => (StatusCode::INTERNAL_SERVER_ERROR, "unhealthy".to_string()),
            ErrorKind::Timeout => (
                StatusCode::SERVICE_UNAVAILABLE,
                "The database did not answer in time".to_string(),
            ),
            ErrorKind::Unknown => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal database error occurred".to_string(),
            ),
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed.");
        } else {
            tracing::debug!(error = %self, "Request rejected.");
        }

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

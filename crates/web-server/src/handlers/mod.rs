//! One module per resource. Handlers only unpack the request, call the
//! matching service and pick the status code; errors convert through
//! [`AppError`](crate::error::AppError).

pub mod beans;
pub mod roasters;
pub mod sheets;
pub mod shots;

use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// # GET /api/health
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    match state.services.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "healthy" }))).into_response(),
        Err(err) => {
            tracing::error!(error = ?err, "Health check failed.");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "unhealthy" })))
                .into_response()
        }
    }
}

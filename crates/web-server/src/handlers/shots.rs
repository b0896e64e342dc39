use crate::{error::AppError, AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use core_types::Shot;
use service::ShotRequest;
use std::sync::Arc;

/// # GET /api/shots
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Shot>>, AppError> {
    let shots = state.services.shots.get_all().await?;
    Ok(Json(shots))
}

/// # POST /api/shots
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ShotRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Shot>), AppError> {
    let Json(request) = payload?;
    let shot = state.services.shots.create(request).await?;
    Ok((StatusCode::CREATED, Json(shot)))
}

/// # GET /api/shots/:id
pub async fn get(
    path: Result<Path<u64>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Shot>, AppError> {
    let Path(id) = path?;
    let shot = state.services.shots.get_by_id(id).await?;
    Ok(Json(shot))
}

/// # PUT /api/shots/:id
pub async fn update(
    path: Result<Path<u64>, PathRejection>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ShotRequest>, JsonRejection>,
) -> Result<Json<Shot>, AppError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let shot = state.services.shots.update_by_id(id, request).await?;
    Ok(Json(shot))
}

/// # DELETE /api/shots/:id
pub async fn delete(
    path: Result<Path<u64>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    state.services.shots.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// # GET /api/sheets/:id/shots
/// Shots recorded on one sheet; empty when the sheet has none.
pub async fn list_by_sheet(
    path: Result<Path<u64>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Shot>>, AppError> {
    let Path(sheet_id) = path?;
    let shots = state.services.shots.get_all_by_sheet(sheet_id).await?;
    Ok(Json(shots))
}

use crate::{error::AppError, AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use core_types::Roaster;
use service::RoasterRequest;
use std::sync::Arc;

/// # GET /api/roasters
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Roaster>>, AppError> {
    let roasters = state.services.roasters.get_all().await?;
    Ok(Json(roasters))
}

/// # POST /api/roasters
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RoasterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Roaster>), AppError> {
    let Json(request) = payload?;
    let roaster = state.services.roasters.create(request).await?;
    Ok((StatusCode::CREATED, Json(roaster)))
}

/// # GET /api/roasters/:id
pub async fn get(
    path: Result<Path<u64>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Roaster>, AppError> {
    let Path(id) = path?;
    let roaster = state.services.roasters.get_by_id(id).await?;
    Ok(Json(roaster))
}

/// # PUT /api/roasters/:id
pub async fn update(
    path: Result<Path<u64>, PathRejection>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RoasterRequest>, JsonRejection>,
) -> Result<Json<Roaster>, AppError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let roaster = state.services.roasters.update_by_id(id, request).await?;
    Ok(Json(roaster))
}

/// # DELETE /api/roasters/:id
pub async fn delete(
    path: Result<Path<u64>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    state.services.roasters.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

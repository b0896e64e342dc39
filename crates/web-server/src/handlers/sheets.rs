use crate::{error::AppError, AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use core_types::Sheet;
use service::SheetRequest;
use std::sync::Arc;

/// # GET /api/sheets
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Sheet>>, AppError> {
    let sheets = state.services.sheets.get_all().await?;
    Ok(Json(sheets))
}

/// # POST /api/sheets
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SheetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Sheet>), AppError> {
    let Json(request) = payload?;
    let sheet = state.services.sheets.create(request).await?;
    Ok((StatusCode::CREATED, Json(sheet)))
}

/// # GET /api/sheets/:id
pub async fn get(
    path: Result<Path<u64>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Sheet>, AppError> {
    let Path(id) = path?;
    let sheet = state.services.sheets.get_by_id(id).await?;
    Ok(Json(sheet))
}

/// # PUT /api/sheets/:id
pub async fn update(
    path: Result<Path<u64>, PathRejection>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SheetRequest>, JsonRejection>,
) -> Result<Json<Sheet>, AppError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let sheet = state.services.sheets.update_by_id(id, request).await?;
    Ok(Json(sheet))
}

/// # DELETE /api/sheets/:id
pub async fn delete(
    path: Result<Path<u64>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    state.services.sheets.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

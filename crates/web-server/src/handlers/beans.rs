use crate::{error::AppError, AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use core_types::Beans;
use service::BeansRequest;
use std::sync::Arc;

/// # GET /api/beans
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Beans>>, AppError> {
    let beans = state.services.beans.get_all().await?;
    Ok(Json(beans))
}

/// # POST /api/beans
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BeansRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Beans>), AppError> {
    let Json(request) = payload?;
    let beans = state.services.beans.create(request).await?;
    Ok((StatusCode::CREATED, Json(beans)))
}

/// # GET /api/beans/:id
pub async fn get(
    path: Result<Path<u64>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Beans>, AppError> {
    let Path(id) = path?;
    let beans = state.services.beans.get_by_id(id).await?;
    Ok(Json(beans))
}

/// # PUT /api/beans/:id
pub async fn update(
    path: Result<Path<u64>, PathRejection>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BeansRequest>, JsonRejection>,
) -> Result<Json<Beans>, AppError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let beans = state.services.beans.update_by_id(id, request).await?;
    Ok(Json(beans))
}

/// # DELETE /api/beans/:id
pub async fn delete(
    path: Result<Path<u64>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    state.services.beans.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

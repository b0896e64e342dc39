use crate::dto::ShotRequest;
use crate::error::ServiceError;
use core_types::Shot;
use database::ShotRepository;
use std::sync::Arc;
use tracing::info;

/// Shot use cases. Writes only carry sheet and beans ids; every shot handed
/// back is the joined aggregate read from the store.
#[derive(Clone)]
pub struct ShotService {
    repo: Arc<dyn ShotRepository>,
}

impl ShotService {
    pub fn new(repo: Arc<dyn ShotRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, request: ShotRequest) -> Result<Shot, ServiceError> {
        let record = request.into_record()?;
        let id = self
            .repo
            .create(&record)
            .await
            .map_err(ServiceError::repository("could not create shot"))?;
        let shot = self
            .repo
            .get_by_id(id)
            .await
            .map_err(ServiceError::repository("could not fetch created shot"))?;
        info!(shot_id = shot.id, sheet_id = shot.sheet.id, rating = shot.rating, "Created shot.");
        Ok(shot)
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Shot, ServiceError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(ServiceError::repository("could not fetch shot by id"))
    }

    pub async fn get_all(&self) -> Result<Vec<Shot>, ServiceError> {
        self.repo
            .get_all()
            .await
            .map_err(ServiceError::repository("could not fetch shots"))
    }

    /// Shots recorded on one sheet. An unknown sheet yields an empty list.
    pub async fn get_all_by_sheet(&self, sheet_id: u64) -> Result<Vec<Shot>, ServiceError> {
        self.repo
            .get_all_by_sheet(sheet_id)
            .await
            .map_err(ServiceError::repository("could not fetch shots by sheet"))
    }

    pub async fn update_by_id(&self, id: u64, request: ShotRequest) -> Result<Shot, ServiceError> {
        let record = request.into_record()?;
        self.repo
            .update_by_id(id, &record)
            .await
            .map_err(ServiceError::repository("could not update shot by id"))?;
        let shot = self
            .repo
            .get_by_id(id)
            .await
            .map_err(ServiceError::repository("could not fetch updated shot"))?;
        info!(shot_id = id, "Updated shot.");
        Ok(shot)
    }

    pub async fn delete_by_id(&self, id: u64) -> Result<(), ServiceError> {
        self.repo
            .delete_by_id(id)
            .await
            .map_err(ServiceError::repository("could not delete shot by id"))?;
        info!(shot_id = id, "Deleted shot.");
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), ServiceError> {
        self.repo
            .ping()
            .await
            .map_err(ServiceError::repository("shot store unreachable"))
    }
}

use crate::dto::RoasterRequest;
use crate::error::ServiceError;
use core_types::Roaster;
use database::RoasterRepository;
use std::sync::Arc;
use tracing::info;

/// Roaster use cases over a [`RoasterRepository`].
#[derive(Clone)]
pub struct RoasterService {
    repo: Arc<dyn RoasterRepository>,
}

impl RoasterService {
    pub fn new(repo: Arc<dyn RoasterRepository>) -> Self {
        Self { repo }
    }

    /// Inserts the roaster and returns it as stored, read back by its unique name.
    pub async fn create(&self, request: RoasterRequest) -> Result<Roaster, ServiceError> {
        let record = request.into_record()?;
        self.repo
            .create(&record)
            .await
            .map_err(ServiceError::repository("could not create roaster"))?;
        let roaster = self
            .repo
            .get_by_name(&record.name)
            .await
            .map_err(ServiceError::repository("could not fetch created roaster"))?;
        info!(roaster_id = roaster.id, name = %roaster.name, "Created roaster.");
        Ok(roaster)
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Roaster, ServiceError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(ServiceError::repository("could not fetch roaster by id"))
    }

    pub async fn get_all(&self) -> Result<Vec<Roaster>, ServiceError> {
        self.repo
            .get_all()
            .await
            .map_err(ServiceError::repository("could not fetch roasters"))
    }

    pub async fn update_by_id(&self, id: u64, request: RoasterRequest) -> Result<Roaster, ServiceError> {
        let record = request.into_record()?;
        let roaster = self
            .repo
            .update_by_id(id, &record)
            .await
            .map_err(ServiceError::repository("could not update roaster by id"))?;
        info!(roaster_id = id, "Updated roaster.");
        Ok(roaster)
    }

    pub async fn delete_by_id(&self, id: u64) -> Result<(), ServiceError> {
        self.repo
            .delete_by_id(id)
            .await
            .map_err(ServiceError::repository("could not delete roaster by id"))?;
        info!(roaster_id = id, "Deleted roaster.");
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), ServiceError> {
        self.repo
            .ping()
            .await
            .map_err(ServiceError::repository("roaster store unreachable"))
    }
}

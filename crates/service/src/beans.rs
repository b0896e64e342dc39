use crate::dto::BeansRequest;
use crate::error::ServiceError;
use core_types::Beans;
use database::BeansRepository;
use std::sync::Arc;
use tracing::info;

/// Beans use cases. Beans names are not unique, so a created row is read
/// back by the id the store assigned.
#[derive(Clone)]
pub struct BeansService {
    repo: Arc<dyn BeansRepository>,
}

impl BeansService {
    pub fn new(repo: Arc<dyn BeansRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, request: BeansRequest) -> Result<Beans, ServiceError> {
        let record = request.into_record()?;
        let id = self
            .repo
            .create(&record)
            .await
            .map_err(ServiceError::repository("could not create beans"))?;
        let beans = self
            .repo
            .get_by_id(id)
            .await
            .map_err(ServiceError::repository("could not fetch created beans"))?;
        info!(beans_id = beans.id, roaster_id = beans.roaster_id, "Created beans.");
        Ok(beans)
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Beans, ServiceError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(ServiceError::repository("could not fetch beans by id"))
    }

    pub async fn get_all(&self) -> Result<Vec<Beans>, ServiceError> {
        self.repo
            .get_all()
            .await
            .map_err(ServiceError::repository("could not fetch beans"))
    }

    pub async fn update_by_id(&self, id: u64, request: BeansRequest) -> Result<Beans, ServiceError> {
        let record = request.into_record()?;
        let beans = self
            .repo
            .update_by_id(id, &record)
            .await
            .map_err(ServiceError::repository("could not update beans by id"))?;
        info!(beans_id = id, "Updated beans.");
        Ok(beans)
    }

    pub async fn delete_by_id(&self, id: u64) -> Result<(), ServiceError> {
        self.repo
            .delete_by_id(id)
            .await
            .map_err(ServiceError::repository("could not delete beans by id"))?;
        info!(beans_id = id, "Deleted beans.");
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), ServiceError> {
        self.repo
            .ping()
            .await
            .map_err(ServiceError::repository("beans store unreachable"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::beans;
    use chrono::NaiveDate;
    use core_types::{Entity, ErrorKind, RoastLevel};
    use database::{DbError, MockBeansRepository};

    fn request(roaster_id: u64) -> BeansRequest {
        BeansRequest {
            roaster_id,
            name: "Giant Steps".to_string(),
            roast_date: NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
            roast_level: RoastLevel::Medium,
        }
    }

    #[tokio::test]
    async fn create_reads_the_beans_back_by_id() {
        let mut repo = MockBeansRepository::new();
        repo.expect_create()
            .withf(|record| record.roaster_id == 3 && record.name == "Giant Steps")
            .times(1)
            .returning(|_| Ok(11));
        repo.expect_get_by_id()
            .withf(|id| *id == 11)
            .times(1)
            .returning(|id| Ok(beans(id, "Giant Steps")));

        let service = BeansService::new(Arc::new(repo));
        let created = service.create(request(3)).await.expect("create succeeds");

        assert_eq!(created.id, 11);
        assert_eq!(created.roaster.name, "BlueBottle");
    }

    #[tokio::test]
    async fn create_with_a_missing_roaster_names_the_roaster() {
        let mut repo = MockBeansRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|_| Err(DbError::DoesNotExist(Entity::Roaster)));
        repo.expect_get_by_id().never();

        let service = BeansService::new(Arc::new(repo));
        let err = service.create(request(999)).await.expect_err("dangling roaster");

        assert_eq!(err.kind(), ErrorKind::DoesNotExist(Entity::Roaster));
    }

    #[tokio::test]
    async fn update_returns_the_stored_beans() {
        let mut repo = MockBeansRepository::new();
        repo.expect_update_by_id()
            .withf(|id, record| *id == 11 && record.roast_level == RoastLevel::Medium)
            .times(1)
            .returning(|id, record| Ok(beans(id, &record.name)));

        let service = BeansService::new(Arc::new(repo));
        let updated = service.update_by_id(11, request(3)).await.expect("update succeeds");

        assert_eq!(updated.id, 11);
    }

    #[tokio::test]
    async fn get_all_on_an_empty_table_is_an_empty_list() {
        let mut repo = MockBeansRepository::new();
        repo.expect_get_all().times(1).returning(|| Ok(Vec::new()));

        let service = BeansService::new(Arc::new(repo));
        let beans = service.get_all().await.expect("listing succeeds");

        assert!(beans.is_empty());
    }
}

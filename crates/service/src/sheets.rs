use crate::dto::SheetRequest;
use crate::error::ServiceError;
use core_types::Sheet;
use database::SheetRepository;
use std::sync::Arc;
use tracing::info;

/// Sheet use cases over a [`SheetRepository`].
#[derive(Clone)]
pub struct SheetService {
    repo: Arc<dyn SheetRepository>,
}

impl SheetService {
    pub fn new(repo: Arc<dyn SheetRepository>) -> Self {
        Self { repo }
    }

    /// Inserts the sheet and returns it as stored, read back by its unique name.
    pub async fn create(&self, request: SheetRequest) -> Result<Sheet, ServiceError> {
        let record = request.into_record()?;
        self.repo
            .create(&record)
            .await
            .map_err(ServiceError::repository("could not create sheet"))?;
        let sheet = self
            .repo
            .get_by_name(&record.name)
            .await
            .map_err(ServiceError::repository("could not fetch created sheet"))?;
        info!(sheet_id = sheet.id, name = %sheet.name, "Created sheet.");
        Ok(sheet)
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Sheet, ServiceError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(ServiceError::repository("could not fetch sheet by id"))
    }

    pub async fn get_all(&self) -> Result<Vec<Sheet>, ServiceError> {
        self.repo
            .get_all()
            .await
            .map_err(ServiceError::repository("could not fetch sheets"))
    }

    pub async fn update_by_id(&self, id: u64, request: SheetRequest) -> Result<Sheet, ServiceError> {
        let record = request.into_record()?;
        let sheet = self
            .repo
            .update_by_id(id, &record)
            .await
            .map_err(ServiceError::repository("could not update sheet by id"))?;
        info!(sheet_id = id, "Updated sheet.");
        Ok(sheet)
    }

    pub async fn delete_by_id(&self, id: u64) -> Result<(), ServiceError> {
        self.repo
            .delete_by_id(id)
            .await
            .map_err(ServiceError::repository("could not delete sheet by id"))?;
        info!(sheet_id = id, "Deleted sheet.");
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), ServiceError> {
        self.repo
            .ping()
            .await
            .map_err(ServiceError::repository("sheet store unreachable"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sheet;
    use core_types::{Entity, ErrorKind};
    use database::{DbError, MockSheetRepository};

    #[tokio::test]
    async fn create_reads_the_sheet_back_by_name() {
        let mut repo = MockSheetRepository::new();
        repo.expect_create()
            .withf(|record| record.name == "Morning")
            .times(1)
            .returning(|_| Ok(1));
        repo.expect_get_by_name()
            .withf(|name| name == "Morning")
            .times(1)
            .returning(|name| Ok(sheet(1, name)));

        let service = SheetService::new(Arc::new(repo));
        let created = service
            .create(SheetRequest { name: " Morning ".to_string() })
            .await
            .expect("create succeeds");

        assert_eq!(created.id, 1);
        assert_eq!(created.name, "Morning");
    }

    #[tokio::test]
    async fn create_passes_already_exists_through() {
        let mut repo = MockSheetRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|_| Err(DbError::AlreadyExists(Entity::Sheet)));
        repo.expect_get_by_name().never();

        let service = SheetService::new(Arc::new(repo));
        let err = service
            .create(SheetRequest { name: "Morning".to_string() })
            .await
            .expect_err("duplicate name");

        assert_eq!(err.kind(), ErrorKind::AlreadyExists(Entity::Sheet));
    }

    #[tokio::test]
    async fn create_rejects_a_blank_name_without_touching_the_store() {
        let mut repo = MockSheetRepository::new();
        repo.expect_create().never();

        let service = SheetService::new(Arc::new(repo));
        let err = service
            .create(SheetRequest { name: "  ".to_string() })
            .await
            .expect_err("blank name");

        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    }

    #[tokio::test]
    async fn update_of_a_missing_sheet_does_not_exist() {
        let mut repo = MockSheetRepository::new();
        repo.expect_update_by_id()
            .withf(|id, record| *id == 42 && record.name == "Evening")
            .times(1)
            .returning(|_, _| Err(DbError::DoesNotExist(Entity::Sheet)));

        let service = SheetService::new(Arc::new(repo));
        let err = service
            .update_by_id(42, SheetRequest { name: "Evening".to_string() })
            .await
            .expect_err("missing sheet");

        assert_eq!(err.kind(), ErrorKind::DoesNotExist(Entity::Sheet));
    }

    #[tokio::test]
    async fn delete_of_a_missing_sheet_does_not_exist() {
        let mut repo = MockSheetRepository::new();
        repo.expect_delete_by_id()
            .times(1)
            .returning(|_| Err(DbError::DoesNotExist(Entity::Sheet)));

        let service = SheetService::new(Arc::new(repo));
        let err = service.delete_by_id(7).await.expect_err("missing sheet");

        assert_eq!(err.kind(), ErrorKind::DoesNotExist(Entity::Sheet));
    }

    #[tokio::test]
    async fn get_all_on_an_empty_table_is_an_empty_list() {
        let mut repo = MockSheetRepository::new();
        repo.expect_get_all().times(1).returning(|| Ok(Vec::new()));

        let service = SheetService::new(Arc::new(repo));
        let sheets = service.get_all().await.expect("listing succeeds");

        assert!(sheets.is_empty());
    }
}

use super::{expect_single_row, read_error, DbContext, SheetRepository};
use crate::models::SheetRecord;
use crate::translator::TranslateExt;
use crate::DbError;
use async_trait::async_trait;
use chrono::Utc;
use core_types::{Entity, Sheet};

/// `SheetRepository` over the `sheets` table.
#[derive(Debug, Clone)]
pub struct MySqlSheetRepository {
    ctx: DbContext,
}

impl MySqlSheetRepository {
    pub fn new(ctx: DbContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl SheetRepository for MySqlSheetRepository {
    async fn create(&self, sheet: &SheetRecord) -> Result<u64, DbError> {
        self.ctx
            .run(async {
                let result = sqlx::query("INSERT INTO sheets (name) VALUES (?)")
                    .bind(&sheet.name)
                    .execute(self.ctx.pool())
                    .await
                    .or_translate(self.ctx.translator(), Some(Entity::Sheet), "could not create sheet")?;
                Ok::<_, DbError>(result.last_insert_id())
            })
            .await
    }

    async fn get_by_id(&self, id: u64) -> Result<Sheet, DbError> {
        self.ctx
            .run(async {
                sqlx::query_as::<_, Sheet>(
                    "SELECT id, name, created_at, updated_at FROM sheets WHERE id = ?",
                )
                .bind(id)
                .fetch_one(self.ctx.pool())
                .await
                .map_err(read_error(Entity::Sheet, "could not fetch sheet by id"))
            })
            .await
    }

    async fn get_by_name(&self, name: &str) -> Result<Sheet, DbError> {
        self.ctx
            .run(async {
                sqlx::query_as::<_, Sheet>(
                    "SELECT id, name, created_at, updated_at FROM sheets WHERE name = ?",
                )
                .bind(name)
                .fetch_one(self.ctx.pool())
                .await
                .map_err(read_error(Entity::Sheet, "could not fetch sheet by name"))
            })
            .await
    }

    async fn get_all(&self) -> Result<Vec<Sheet>, DbError> {
        self.ctx
            .run(async {
                sqlx::query_as::<_, Sheet>(
                    "SELECT id, name, created_at, updated_at FROM sheets ORDER BY id",
                )
                .fetch_all(self.ctx.pool())
                .await
                .map_err(|e| DbError::unknown("could not fetch sheets", e))
            })
            .await
    }

    async fn update_by_id(&self, id: u64, sheet: &SheetRecord) -> Result<Sheet, DbError> {
        let result = self
            .ctx
            .run(async {
                sqlx::query("UPDATE sheets SET name = ?, updated_at = ? WHERE id = ?")
                    .bind(&sheet.name)
                    .bind(Utc::now())
                    .bind(id)
                    .execute(self.ctx.pool())
                    .await
                    .or_translate(self.ctx.translator(), Some(Entity::Sheet), "could not update sheet")
            })
            .await?;
        expect_single_row(result, Entity::Sheet)?;

        self.get_by_id(id).await
    }

    async fn delete_by_id(&self, id: u64) -> Result<(), DbError> {
        let result = self
            .ctx
            .run(async {
                sqlx::query("DELETE FROM sheets WHERE id = ?")
                    .bind(id)
                    .execute(self.ctx.pool())
                    .await
                    .or_translate(self.ctx.translator(), Some(Entity::Sheet), "could not delete sheet")
            })
            .await?;
        expect_single_row(result, Entity::Sheet)
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.ctx.ping().await
    }
}

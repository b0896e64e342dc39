use super::{expect_single_row, read_error, DbContext, RoasterRepository};
use crate::models::RoasterRecord;
use crate::translator::TranslateExt;
use crate::DbError;
use async_trait::async_trait;
use chrono::Utc;
use core_types::{Entity, Roaster};

/// `RoasterRepository` over the `roasters` table.
///
/// Beans reference roasters, so deleting a roaster that still has beans fails
/// with `ForeignKeyConstraint(Roaster)`.
#[derive(Debug, Clone)]
pub struct MySqlRoasterRepository {
    ctx: DbContext,
}

impl MySqlRoasterRepository {
    pub fn new(ctx: DbContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl RoasterRepository for MySqlRoasterRepository {
    async fn create(&self, roaster: &RoasterRecord) -> Result<u64, DbError> {
        self.ctx
            .run(async {
                let result = sqlx::query("INSERT INTO roasters (name) VALUES (?)")
                    .bind(&roaster.name)
                    .execute(self.ctx.pool())
                    .await
                    .or_translate(self.ctx.translator(), Some(Entity::Roaster), "could not create roaster")?;
                Ok::<_, DbError>(result.last_insert_id())
            })
            .await
    }

    async fn get_by_id(&self, id: u64) -> Result<Roaster, DbError> {
        self.ctx
            .run(async {
                sqlx::query_as::<_, Roaster>(
                    "SELECT id, name, created_at, updated_at FROM roasters WHERE id = ?",
                )
                .bind(id)
                .fetch_one(self.ctx.pool())
                .await
                .map_err(read_error(Entity::Roaster, "could not fetch roaster by id"))
            })
            .await
    }

    async fn get_by_name(&self, name: &str) -> Result<Roaster, DbError> {
        self.ctx
            .run(async {
                sqlx::query_as::<_, Roaster>(
                    "SELECT id, name, created_at, updated_at FROM roasters WHERE name = ?",
                )
                .bind(name)
                .fetch_one(self.ctx.pool())
                .await
                .map_err(read_error(Entity::Roaster, "could not fetch roaster by name"))
            })
            .await
    }

    async fn get_all(&self) -> Result<Vec<Roaster>, DbError> {
        self.ctx
            .run(async {
                sqlx::query_as::<_, Roaster>(
                    "SELECT id, name, created_at, updated_at FROM roasters ORDER BY id",
                )
                .fetch_all(self.ctx.pool())
                .await
                .map_err(|e| DbError::unknown("could not fetch roasters", e))
            })
            .await
    }

    async fn update_by_id(&self, id: u64, roaster: &RoasterRecord) -> Result<Roaster, DbError> {
        let result = self
            .ctx
            .run(async {
                sqlx::query("UPDATE roasters SET name = ?, updated_at = ? WHERE id = ?")
                    .bind(&roaster.name)
                    .bind(Utc::now())
                    .bind(id)
                    .execute(self.ctx.pool())
                    .await
                    .or_translate(self.ctx.translator(), Some(Entity::Roaster), "could not update roaster")
            })
            .await?;
        expect_single_row(result, Entity::Roaster)?;

        self.get_by_id(id).await
    }

    async fn delete_by_id(&self, id: u64) -> Result<(), DbError> {
        let result = self
            .ctx
            .run(async {
                sqlx::query("DELETE FROM roasters WHERE id = ?")
                    .bind(id)
                    .execute(self.ctx.pool())
                    .await
                    .or_translate(self.ctx.translator(), Some(Entity::Roaster), "could not delete roaster")
            })
            .await?;
        expect_single_row(result, Entity::Roaster)
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.ctx.ping().await
    }
}

use super::{expect_single_row, read_error, BeansRepository, DbContext};
use crate::models::{BeansRecord, BeansRow};
use crate::translator::TranslateExt;
use crate::DbError;
use async_trait::async_trait;
use chrono::Utc;
use core_types::{Beans, Entity};

const SELECT_BEANS: &str = r#"
    SELECT
        b.id, b.roaster_id, b.name, b.roast_date, b.roast_level, b.created_at, b.updated_at,
        r.name AS roaster_name, r.created_at AS roaster_created_at, r.updated_at AS roaster_updated_at
    FROM beans AS b
    INNER JOIN roasters AS r ON r.id = b.roaster_id
"#;

/// `BeansRepository` over `beans`, joined with `roasters` on every read.
#[derive(Debug, Clone)]
pub struct MySqlBeansRepository {
    ctx: DbContext,
}

impl MySqlBeansRepository {
    pub fn new(ctx: DbContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl BeansRepository for MySqlBeansRepository {
    async fn create(&self, beans: &BeansRecord) -> Result<u64, DbError> {
        self.ctx
            .run(async {
                let result = sqlx::query(
                    "INSERT INTO beans (roaster_id, name, roast_date, roast_level) VALUES (?, ?, ?, ?)",
                )
                .bind(beans.roaster_id)
                .bind(&beans.name)
                .bind(beans.roast_date)
                .bind(beans.roast_level)
                .execute(self.ctx.pool())
                .await
                // Untagged: a dangling roaster_id must name the roaster.
                .or_translate(self.ctx.translator(), None, "could not create beans")?;
                Ok::<_, DbError>(result.last_insert_id())
            })
            .await
    }

    async fn get_by_id(&self, id: u64) -> Result<Beans, DbError> {
        let query = format!("{SELECT_BEANS} WHERE b.id = ?");
        self.ctx
            .run(async {
                sqlx::query_as::<_, BeansRow>(&query)
                    .bind(id)
                    .fetch_one(self.ctx.pool())
                    .await
                    .map(Beans::from)
                    .map_err(read_error(Entity::Beans, "could not fetch beans by id"))
            })
            .await
    }

    async fn get_all(&self) -> Result<Vec<Beans>, DbError> {
        let query = format!("{SELECT_BEANS} ORDER BY b.id");
        self.ctx
            .run(async {
                let rows = sqlx::query_as::<_, BeansRow>(&query)
                    .fetch_all(self.ctx.pool())
                    .await
                    .map_err(|e| DbError::unknown("could not fetch beans", e))?;
                Ok::<Vec<Beans>, DbError>(rows.into_iter().map(Beans::from).collect())
            })
            .await
    }

    async fn update_by_id(&self, id: u64, beans: &BeansRecord) -> Result<Beans, DbError> {
        let result = self
            .ctx
            .run(async {
                sqlx::query(
                    r#"
                    UPDATE beans
                    SET roaster_id = ?, name = ?, roast_date = ?, roast_level = ?, updated_at = ?
                    WHERE id = ?
                    "#,
                )
                .bind(beans.roaster_id)
                .bind(&beans.name)
                .bind(beans.roast_date)
                .bind(beans.roast_level)
                .bind(Utc::now())
                .bind(id)
                .execute(self.ctx.pool())
                .await
                .or_translate(self.ctx.translator(), None, "could not update beans")
            })
            .await?;
        expect_single_row(result, Entity::Beans)?;

        self.get_by_id(id).await
    }

    async fn delete_by_id(&self, id: u64) -> Result<(), DbError> {
        let result = self
            .ctx
            .run(async {
                sqlx::query("DELETE FROM beans WHERE id = ?")
                    .bind(id)
                    .execute(self.ctx.pool())
                    .await
                    .or_translate(self.ctx.translator(), Some(Entity::Beans), "could not delete beans")
            })
            .await?;
        expect_single_row(result, Entity::Beans)
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.ctx.ping().await
    }
}

use super::{expect_single_row, read_error, DbContext, ShotRepository};
use crate::models::{ShotRecord, ShotRow};
use crate::translator::TranslateExt;
use crate::DbError;
use async_trait::async_trait;
use chrono::Utc;
use core_types::{Entity, Shot};

// All three joins are inner joins: a shot whose sheet, beans or roaster is
// gone never comes back half populated.
const SELECT_SHOTS: &str = r#"
    SELECT
        s.id,
        s.sheet_id,
        sh.name AS sheet_name,
        sh.created_at AS sheet_created_at,
        sh.updated_at AS sheet_updated_at,
        s.beans_id,
        b.name AS beans_name,
        b.roast_date AS beans_roast_date,
        b.roast_level AS beans_roast_level,
        b.created_at AS beans_created_at,
        b.updated_at AS beans_updated_at,
        b.roaster_id,
        r.name AS roaster_name,
        r.created_at AS roaster_created_at,
        r.updated_at AS roaster_updated_at,
        s.grind_setting,
        s.quantity_in,
        s.quantity_out,
        s.shot_time AS shot_time_ms,
        s.water_temperature,
        s.rating,
        s.is_too_bitter,
        s.is_too_sour,
        s.comparison_with_previous,
        s.additional_notes,
        s.created_at,
        s.updated_at
    FROM shots AS s
    INNER JOIN sheets AS sh ON sh.id = s.sheet_id
    INNER JOIN beans AS b ON b.id = s.beans_id
    INNER JOIN roasters AS r ON r.id = b.roaster_id
"#;

/// `ShotRepository` over `shots`. Reads assemble the full aggregate from one
/// joined row.
#[derive(Debug, Clone)]
pub struct MySqlShotRepository {
    ctx: DbContext,
}

impl MySqlShotRepository {
    pub fn new(ctx: DbContext) -> Self {
        Self { ctx }
    }

    async fn fetch_many(&self, query: &str, sheet_id: Option<u64>) -> Result<Vec<Shot>, DbError> {
        self.ctx
            .run(async {
                let mut statement = sqlx::query_as::<_, ShotRow>(query);
                if let Some(sheet_id) = sheet_id {
                    statement = statement.bind(sheet_id);
                }
                let rows = statement
                    .fetch_all(self.ctx.pool())
                    .await
                    .map_err(|e| DbError::unknown("could not fetch shots", e))?;
                Ok::<Vec<Shot>, DbError>(rows.into_iter().map(Shot::from).collect())
            })
            .await
    }
}

#[async_trait]
impl ShotRepository for MySqlShotRepository {
    async fn create(&self, shot: &ShotRecord) -> Result<u64, DbError> {
        self.ctx
            .run(async {
                let result = sqlx::query(
                    r#"
                    INSERT INTO shots (
                        sheet_id, beans_id, grind_setting, quantity_in, quantity_out, shot_time,
                        water_temperature, rating, is_too_bitter, is_too_sour,
                        comparison_with_previous, additional_notes
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(shot.sheet_id)
                .bind(shot.beans_id)
                .bind(shot.grind_setting)
                .bind(shot.quantity_in)
                .bind(shot.quantity_out)
                .bind(shot.shot_time_ms())
                .bind(shot.water_temperature)
                .bind(shot.rating)
                .bind(shot.is_too_bitter)
                .bind(shot.is_too_sour)
                .bind(shot.comparison_with_previous)
                .bind(&shot.additional_notes)
                .execute(self.ctx.pool())
                .await
                // Untagged so a missing sheet or beans row is named as such.
                .or_translate(self.ctx.translator(), None, "could not create shot")?;
                Ok::<_, DbError>(result.last_insert_id())
            })
            .await
    }

    async fn get_by_id(&self, id: u64) -> Result<Shot, DbError> {
        let query = format!("{SELECT_SHOTS} WHERE s.id = ?");
        self.ctx
            .run(async {
                sqlx::query_as::<_, ShotRow>(&query)
                    .bind(id)
                    .fetch_one(self.ctx.pool())
                    .await
                    .map(Shot::from)
                    .map_err(read_error(Entity::Shot, "could not fetch shot by id"))
            })
            .await
    }

    async fn get_all(&self) -> Result<Vec<Shot>, DbError> {
        let query = format!("{SELECT_SHOTS} ORDER BY s.id");
        self.fetch_many(&query, None).await
    }

    async fn get_all_by_sheet(&self, sheet_id: u64) -> Result<Vec<Shot>, DbError> {
        let query = format!("{SELECT_SHOTS} WHERE s.sheet_id = ? ORDER BY s.id");
        self.fetch_many(&query, Some(sheet_id)).await
    }

    async fn update_by_id(&self, id: u64, shot: &ShotRecord) -> Result<(), DbError> {
        let result = self
            .ctx
            .run(async {
                sqlx::query(
                    r#"
                    UPDATE shots
                    SET sheet_id = ?, beans_id = ?, grind_setting = ?, quantity_in = ?,
                        quantity_out = ?, shot_time = ?, water_temperature = ?, rating = ?,
                        is_too_bitter = ?, is_too_sour = ?, comparison_with_previous = ?,
                        additional_notes = ?, updated_at = ?
                    WHERE id = ?
                    "#,
                )
                .bind(shot.sheet_id)
                .bind(shot.beans_id)
                .bind(shot.grind_setting)
                .bind(shot.quantity_in)
                .bind(shot.quantity_out)
                .bind(shot.shot_time_ms())
                .bind(shot.water_temperature)
                .bind(shot.rating)
                .bind(shot.is_too_bitter)
                .bind(shot.is_too_sour)
                .bind(shot.comparison_with_previous)
                .bind(&shot.additional_notes)
                .bind(Utc::now())
                .bind(id)
                .execute(self.ctx.pool())
                .await
                .or_translate(self.ctx.translator(), None, "could not update shot")
            })
            .await?;
        expect_single_row(result, Entity::Shot)
    }

    async fn delete_by_id(&self, id: u64) -> Result<(), DbError> {
        let result = self
            .ctx
            .run(async {
                sqlx::query("DELETE FROM shots WHERE id = ?")
                    .bind(id)
                    .execute(self.ctx.pool())
                    .await
                    .or_translate(self.ctx.translator(), Some(Entity::Shot), "could not delete shot")
            })
            .await?;
        expect_single_row(result, Entity::Shot)
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.ctx.ping().await
    }
}

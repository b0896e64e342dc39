//! Write shapes handed to the repositories and the flat rows read back from
//! joined queries.
//!
//! Write shapes never carry an id or timestamps: ids come from the path on
//! update and from the store on insert, timestamps from the store or the
//! repository.

use chrono::{DateTime, NaiveDate, Utc};
use core_types::{Beans, Comparison, RoastLevel, Roaster, Sheet, Shot};
use sqlx::FromRow;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRecord {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoasterRecord {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeansRecord {
    pub roaster_id: u64,
    pub name: String,
    pub roast_date: NaiveDate,
    pub roast_level: RoastLevel,
}

/// A shot as written: references only, never inline sheet or beans data.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotRecord {
    pub sheet_id: u64,
    pub beans_id: u64,
    pub grind_setting: i32,
    pub quantity_in: f64,
    pub quantity_out: f64,
    pub shot_time: Duration,
    pub water_temperature: f64,
    pub rating: f64,
    pub is_too_bitter: bool,
    pub is_too_sour: bool,
    pub comparison_with_previous: Comparison,
    pub additional_notes: String,
}

impl ShotRecord {
    /// `shot_time` as stored: whole milliseconds.
    pub(crate) fn shot_time_ms(&self) -> i64 {
        i64::try_from(self.shot_time.as_millis()).unwrap_or(i64::MAX)
    }
}

/// One row of `beans` inner-joined with its roaster.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct BeansRow {
    pub id: u64,
    pub roaster_id: u64,
    pub name: String,
    pub roast_date: NaiveDate,
    pub roast_level: RoastLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub roaster_name: String,
    pub roaster_created_at: DateTime<Utc>,
    pub roaster_updated_at: DateTime<Utc>,
}

impl From<BeansRow> for Beans {
    fn from(row: BeansRow) -> Self {
        Beans {
            id: row.id,
            roaster_id: row.roaster_id,
            name: row.name,
            roast_date: row.roast_date,
            roast_level: row.roast_level,
            created_at: row.created_at,
            updated_at: row.updated_at,
            roaster: Roaster {
                id: row.roaster_id,
                name: row.roaster_name,
                created_at: row.roaster_created_at,
                updated_at: row.roaster_updated_at,
            },
        }
    }
}

/// One row of `shots` inner-joined with its sheet, beans and the beans'
/// roaster. Columns of the joined tables are aliased with their prefix.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct ShotRow {
    pub id: u64,
    pub sheet_id: u64,
    pub sheet_name: String,
    pub sheet_created_at: DateTime<Utc>,
    pub sheet_updated_at: DateTime<Utc>,
    pub beans_id: u64,
    pub beans_name: String,
    pub beans_roast_date: NaiveDate,
    pub beans_roast_level: RoastLevel,
    pub beans_created_at: DateTime<Utc>,
    pub beans_updated_at: DateTime<Utc>,
    pub roaster_id: u64,
    pub roaster_name: String,
    pub roaster_created_at: DateTime<Utc>,
    pub roaster_updated_at: DateTime<Utc>,
    pub grind_setting: i32,
    pub quantity_in: f64,
    pub quantity_out: f64,
    pub shot_time_ms: i64,
    pub water_temperature: f64,
    pub rating: f64,
    pub is_too_bitter: bool,
    pub is_too_sour: bool,
    pub comparison_with_previous: Comparison,
    pub additional_notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ShotRow> for Shot {
    fn from(row: ShotRow) -> Self {
        let roaster = Roaster {
            id: row.roaster_id,
            name: row.roaster_name,
            created_at: row.roaster_created_at,
            updated_at: row.roaster_updated_at,
        };
        let beans = Beans {
            id: row.beans_id,
            roaster_id: roaster.id,
            name: row.beans_name,
            roast_date: row.beans_roast_date,
            roast_level: row.beans_roast_level,
            created_at: row.beans_created_at,
            updated_at: row.beans_updated_at,
            roaster,
        };
        let sheet = Sheet {
            id: row.sheet_id,
            name: row.sheet_name,
            created_at: row.sheet_created_at,
            updated_at: row.sheet_updated_at,
        };

        Shot {
            id: row.id,
            sheet,
            beans,
            grind_setting: row.grind_setting,
            quantity_in: row.quantity_in,
            quantity_out: row.quantity_out,
            shot_time: Duration::from_millis(u64::try_from(row.shot_time_ms).unwrap_or(0)),
            water_temperature: row.water_temperature,
            rating: row.rating,
            is_too_bitter: row.is_too_bitter,
            is_too_sour: row.is_too_sour,
            comparison_with_previous: row.comparison_with_previous,
            additional_notes: row.additional_notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

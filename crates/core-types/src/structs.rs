use crate::enums::{Comparison, RoastLevel};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::time::Duration;

/// A named brewing session that shots are logged against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Sheet {
    pub id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A coffee roaster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Roaster {
    pub id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A roasted batch of beans, always read together with its roaster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beans {
    pub id: u64,
    pub roaster_id: u64,
    pub name: String,
    pub roast_date: NaiveDate,
    pub roast_level: RoastLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub roaster: Roaster,
}

/// A single brew attempt with its sheet, beans and roaster fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub id: u64,
    pub sheet: Sheet,
    pub beans: Beans,
    pub grind_setting: i32,
    /// Dose in grams.
    pub quantity_in: f64,
    /// Yield in grams.
    pub quantity_out: f64,
    /// Serialized as fractional seconds.
    #[serde(with = "duration_secs")]
    pub shot_time: Duration,
    /// Degrees Celsius.
    pub water_temperature: f64,
    pub rating: f64,
    pub is_too_bitter: bool,
    pub is_too_sour: bool,
    pub comparison_with_previous: Comparison,
    pub additional_notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shot {
    /// Applied when a shot is submitted without a positive water temperature.
    pub const DEFAULT_WATER_TEMPERATURE: f64 = 93.0;
    pub const MIN_RATING: f64 = 0.0;
    pub const MAX_RATING: f64 = 10.0;
    /// Longest accepted extraction. Anything longer is a typo, not a shot.
    pub const MAX_SHOT_TIME: Duration = Duration::from_secs(600);

    /// Output weight divided by dose, if a dose was recorded.
    pub fn brew_ratio(&self) -> Option<f64> {
        (self.quantity_in > 0.0).then(|| self.quantity_out / self.quantity_in)
    }
}

/// Serde adapter for `Duration` as a floating point number of seconds.
pub mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}

//! Request payloads accepted by the services, and their validation into the
//! write records the repositories take.

use crate::error::ServiceError;
use chrono::NaiveDate;
use core_types::structs::duration_secs;
use core_types::{Comparison, RoastLevel, Shot};
use database::{BeansRecord, RoasterRecord, SheetRecord, ShotRecord};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoasterRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeansRequest {
    pub roaster_id: u64,
    pub name: String,
    pub roast_date: NaiveDate,
    pub roast_level: RoastLevel,
}

/// A shot as submitted. `shot_time` is in seconds on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotRequest {
    pub sheet_id: u64,
    pub beans_id: u64,
    pub grind_setting: i32,
    pub quantity_in: f64,
    pub quantity_out: f64,
    #[serde(with = "duration_secs")]
    pub shot_time: Duration,
    /// Zero or absent means "not measured".
    #[serde(default)]
    pub water_temperature: f64,
    pub rating: f64,
    #[serde(default)]
    pub is_too_bitter: bool,
    #[serde(default)]
    pub is_too_sour: bool,
    #[serde(default)]
    pub comparison_with_previous: Comparison,
    #[serde(default)]
    pub additional_notes: String,
}

fn required_name(field: &'static str, name: &str) -> Result<String, ServiceError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ServiceError> {
    // NaN fails this comparison as well.
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ServiceError::validation(field, format!("must be a non-negative number, got {value}")))
    }
}

impl SheetRequest {
    pub fn into_record(self) -> Result<SheetRecord, ServiceError> {
        Ok(SheetRecord { name: required_name("name", &self.name)? })
    }
}

impl RoasterRequest {
    pub fn into_record(self) -> Result<RoasterRecord, ServiceError> {
        Ok(RoasterRecord { name: required_name("name", &self.name)? })
    }
}

impl BeansRequest {
    pub fn into_record(self) -> Result<BeansRecord, ServiceError> {
        Ok(BeansRecord {
            roaster_id: self.roaster_id,
            name: required_name("name", &self.name)?,
            roast_date: self.roast_date,
            roast_level: self.roast_level,
        })
    }
}

impl ShotRequest {
    /// Validates the request and fills in the default water temperature.
    pub fn into_record(self) -> Result<ShotRecord, ServiceError> {
        if !(Shot::MIN_RATING..=Shot::MAX_RATING).contains(&self.rating) {
            return Err(ServiceError::validation(
                "rating",
                format!(
                    "must be between {} and {}, got {}",
                    Shot::MIN_RATING,
                    Shot::MAX_RATING,
                    self.rating
                ),
            ));
        }
        if self.shot_time > Shot::MAX_SHOT_TIME {
            return Err(ServiceError::validation(
                "shot_time",
                format!(
                    "must be at most {} seconds, got {}",
                    Shot::MAX_SHOT_TIME.as_secs(),
                    self.shot_time.as_secs_f64()
                ),
            ));
        }
        let quantity_in = non_negative("quantity_in", self.quantity_in)?;
        let quantity_out = non_negative("quantity_out", self.quantity_out)?;

        let water_temperature = if self.water_temperature > 0.0 {
            self.water_temperature
        } else {
            Shot::DEFAULT_WATER_TEMPERATURE
        };

        Ok(ShotRecord {
            sheet_id: self.sheet_id,
            beans_id: self.beans_id,
            grind_setting: self.grind_setting,
            quantity_in,
            quantity_out,
            shot_time: self.shot_time,
            water_temperature,
            rating: self.rating,
            is_too_bitter: self.is_too_bitter,
            is_too_sour: self.is_too_sour,
            comparison_with_previous: self.comparison_with_previous,
            additional_notes: self.additional_notes,
        })
    }
}

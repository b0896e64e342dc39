//! Fixtures shared by the service tests.

use crate::dto::ShotRequest;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_types::{Beans, Comparison, RoastLevel, Roaster, Sheet, Shot};
use std::time::Duration;

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()
}

pub fn sheet(id: u64, name: &str) -> Sheet {
    Sheet { id, name: name.to_string(), created_at: at(), updated_at: at() }
}

pub fn roaster(id: u64, name: &str) -> Roaster {
    Roaster { id, name: name.to_string(), created_at: at(), updated_at: at() }
}

pub fn beans(id: u64, name: &str) -> Beans {
    Beans {
        id,
        roaster_id: 3,
        name: name.to_string(),
        roast_date: NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
        roast_level: RoastLevel::Medium,
        created_at: at(),
        updated_at: at(),
        roaster: roaster(3, "BlueBottle"),
    }
}

pub fn shot(id: u64) -> Shot {
    Shot {
        id,
        sheet: sheet(1, "Morning"),
        beans: beans(2, "Giant Steps"),
        grind_setting: 12,
        quantity_in: 18.0,
        quantity_out: 36.0,
        shot_time: Duration::from_millis(28_000),
        water_temperature: 93.0,
        rating: 7.5,
        is_too_bitter: false,
        is_too_sour: false,
        comparison_with_previous: Comparison::Better,
        additional_notes: String::new(),
        created_at: at(),
        updated_at: at(),
    }
}

pub fn shot_request() -> ShotRequest {
    ShotRequest {
        sheet_id: 1,
        beans_id: 2,
        grind_setting: 12,
        quantity_in: 18.0,
        quantity_out: 36.0,
        shot_time: Duration::from_millis(28_000),
        water_temperature: 93.0,
        rating: 7.5,
        is_too_bitter: false,
        is_too_sour: false,
        comparison_with_previous: Comparison::Better,
        additional_notes: String::new(),
    }
}

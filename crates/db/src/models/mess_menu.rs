//! Mess menu entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hostelgate_core::types::{DbId, Timestamp};

pub const VALID_DAYS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

pub fn validate_day(day: &str) -> Result<(), String> {
    if VALID_DAYS.contains(&day) {
        Ok(())
    } else {
        Err(format!("Invalid day '{day}'. Must be a lowercase weekday name"))
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessMenu {
    pub id: DbId,
    pub hostel_name: String,
    pub day_of_week: String,
    pub breakfast: String,
    pub lunch: String,
    pub snacks: String,
    pub dinner: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Upsert DTO: one hostel-day is replaced wholesale.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertMessMenu {
    pub hostel_name: String,
    pub day_of_week: String,
    pub breakfast: String,
    pub lunch: String,
    pub snacks: String,
    pub dinner: String,
}

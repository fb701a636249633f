//! Fee status entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hostelgate_core::types::{DbId, Timestamp};

pub const FEE_PAID: &str = "paid";
pub const FEE_DUE: &str = "due";
pub const FEE_OVERDUE: &str = "overdue";

pub const VALID_FEE_STATUSES: &[&str] = &[FEE_PAID, FEE_DUE, FEE_OVERDUE];

pub fn validate_fee_status(status: &str) -> Result<(), String> {
    if VALID_FEE_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid fee status '{status}'. Must be one of: {}",
            VALID_FEE_STATUSES.join(", ")
        ))
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeStatus {
    pub id: DbId,
    pub student_id: String,
    pub student_name: String,
    pub hostel_name: String,
    pub room_number: String,
    /// Paise, not rupees.
    pub amount_due: i64,
    pub due_date: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFee {
    pub student_id: String,
    pub student_name: String,
    pub hostel_name: String,
    pub room_number: String,
    pub amount_due: i64,
    pub due_date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeeStatus {
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeListParams {
    pub hostel_name: Option<String>,
    pub status: Option<String>,
}

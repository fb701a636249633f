//! Complaint entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hostelgate_core::types::{DbId, Timestamp};

/// Complaint statuses form a short linear lifecycle.
pub const COMPLAINT_OPEN: &str = "open";
pub const COMPLAINT_IN_PROGRESS: &str = "in-progress";
pub const COMPLAINT_RESOLVED: &str = "resolved";

/// Validate a status move along `open -> in-progress -> resolved`.
/// Reopening or skipping backwards is refused.
pub fn validate_status_move(current: &str, next: &str) -> Result<(), String> {
    let rank = |s: &str| match s {
        COMPLAINT_OPEN => Some(0),
        COMPLAINT_IN_PROGRESS => Some(1),
        COMPLAINT_RESOLVED => Some(2),
        _ => None,
    };
    match (rank(current), rank(next)) {
        (None, _) | (_, None) => Err(format!("Invalid complaint status '{next}'")),
        (Some(a), Some(b)) if b > a => Ok(()),
        _ => Err(format!(
            "Cannot move complaint from '{current}' to '{next}'"
        )),
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: DbId,
    pub student_id: String,
    pub student_name: String,
    pub hostel_name: String,
    pub room_number: String,
    pub category: String,
    pub description: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaint {
    pub category: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComplaintStatus {
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintListParams {
    pub hostel_name: Option<String>,
    pub status: Option<String>,
}

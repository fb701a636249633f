//! Outpass entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hostelgate_core::outpass::{OutpassStatus, UnknownStatus};
use hostelgate_core::types::{OutpassId, Timestamp};

/// Full outpass row from the `outpasses` table.
///
/// `status` is stored as TEXT; use [`Outpass::status`] to get the typed
/// value. The check constraint keeps the column inside the closed set, so a
/// parse failure here means the schema and the enum have drifted.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outpass {
    pub id: OutpassId,
    pub student_id: String,
    pub student_name: String,
    pub hostel_name: String,
    pub college_name: String,
    pub room_number: String,
    pub year_and_dept: String,
    pub reason: String,
    /// Free-form calendar date, as entered by the student.
    pub from_date: String,
    pub to_date: String,
    pub status: String,
    pub created_at: Timestamp,
    /// Present iff the pass has ever reached `approved`.
    pub approved_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

impl Outpass {
    /// Typed view of the `status` column.
    pub fn status(&self) -> Result<OutpassStatus, UnknownStatus> {
        self.status.parse()
    }
}

/// DTO for creating a new outpass request. All fields are required.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutpass {
    pub student_id: String,
    pub student_name: String,
    pub hostel_name: String,
    pub college_name: String,
    pub room_number: String,
    pub year_and_dept: String,
    pub reason: String,
    pub from_date: String,
    pub to_date: String,
}

impl CreateOutpass {
    /// Reject creates with any blank required field.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("studentId", &self.student_id),
            ("studentName", &self.student_name),
            ("hostelName", &self.hostel_name),
            ("collegeName", &self.college_name),
            ("roomNumber", &self.room_number),
            ("yearAndDept", &self.year_and_dept),
            ("reason", &self.reason),
            ("fromDate", &self.from_date),
            ("toDate", &self.to_date),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(format!("Missing required field: {name}"));
            }
        }
        Ok(())
    }
}

/// Query filters for listing outpasses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutpassListParams {
    pub student_id: Option<String>,
    pub hostel_name: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Scope filters for the bulk clear endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutpassClearParams {
    pub hostel_name: Option<String>,
    pub student_id: Option<String>,
}

//! QR payload schema and boundary validation.
//!
//! The QR image encodes a JSON object describing the pass. Only the `id`
//! field is trusted at scan time -- the embedded `status` is informational
//! for the student's own screen and is always superseded by the
//! authoritative status fetched from the store.

use serde::{Deserialize, Serialize};

use crate::types::OutpassId;

/// Wire value of the `status` field embedded in every generated payload.
pub const QR_STATUS_APPROVED: &str = "APPROVED";

/// The JSON object embedded in a pass QR code.
///
/// Field names are camelCase on the wire (the scanner and the pass screen
/// share this schema with the web clients).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    /// The outpass id. The only field the scan workflow acts on.
    pub id: OutpassId,
    /// Student display name.
    pub student: String,
    pub college_name: String,
    pub hostel_name: String,
    pub room_number: String,
    pub year_and_dept: String,
    pub reason: String,
    /// Human-readable validity window: `"<fromDate> to <toDate>"`.
    pub valid: String,
    /// Informational only; ignored by the scan workflow.
    pub status: String,
}

impl QrPayload {
    /// Build the payload for an approved outpass.
    #[allow(clippy::too_many_arguments)]
    pub fn for_approved(
        id: OutpassId,
        student: &str,
        college_name: &str,
        hostel_name: &str,
        room_number: &str,
        year_and_dept: &str,
        reason: &str,
        from_date: &str,
        to_date: &str,
    ) -> Self {
        Self {
            id,
            student: student.to_string(),
            college_name: college_name.to_string(),
            hostel_name: hostel_name.to_string(),
            room_number: room_number.to_string(),
            year_and_dept: year_and_dept.to_string(),
            reason: reason.to_string(),
            valid: format!("{from_date} to {to_date}"),
            status: QR_STATUS_APPROVED.to_string(),
        }
    }
}

/// The scanned text was not a valid QR payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid QR Code Format")]
pub struct MalformedPayload;

/// Parse the decoded QR text into a typed payload.
///
/// Any parse failure -- not JSON, wrong shape, missing field, unparseable
/// id -- collapses to [`MalformedPayload`]; the scanner shows one uniform
/// "Invalid QR Code Format" denial and no store call is made.
pub fn parse_payload(decoded_text: &str) -> Result<QrPayload, MalformedPayload> {
    serde_json::from_str(decoded_text).map_err(|_| MalformedPayload)
}

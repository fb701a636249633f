//! Ledger reconciliation marker model.

use serde::Serialize;
use sqlx::FromRow;

use hostelgate_core::types::{DbId, OutpassId, Timestamp};

/// A pending status write: the external ledger accepted the scan but the
/// status update did not land. Swept by the reconciliation job.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerReconciliation {
    pub id: DbId,
    pub outpass_id: OutpassId,
    pub scan_type: String,
    pub expected_status: String,
    pub target_status: String,
    pub operator_id: String,
    pub created_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

/// Insert DTO for a new marker.
#[derive(Debug, Clone)]
pub struct CreateReconciliation {
    pub outpass_id: OutpassId,
    pub scan_type: String,
    pub expected_status: String,
    pub target_status: String,
    pub operator_id: String,
}

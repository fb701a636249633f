//! Handlers for the QR scan workflow.
//!
//! Two-step protocol at the gate:
//!
//! 1. `verify` turns a decoded QR payload into a verdict. It reads the
//!    authoritative status from the store (the payload's embedded status
//!    is never trusted) and persists nothing.
//! 2. `confirm` is the operator's explicit "push to sheets": the ledger
//!    row is written first, then the status moves via the conditional
//!    update. A ledger failure aborts with no status change; a status
//!    failure after a ledger success leaves a reconciliation marker for
//!    the background sweep.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use hostelgate_core::error::CoreError;
use hostelgate_core::outpass::transition;
use hostelgate_core::qr::parse_payload;
use hostelgate_core::scan::{evaluate_scan, DenialReason, ScanMode, ScanVerdict};
use hostelgate_core::types::OutpassId;
use hostelgate_db::models::outpass::Outpass;
use hostelgate_db::models::reconciliation::CreateReconciliation;
use hostelgate_db::repositories::{OutpassRepo, ReconciliationRepo};
use hostelgate_ledger::ExitRecord;

use crate::error::{AppError, AppResult};
use crate::handlers::outpass::{fetch_outpass, parse_status};
use crate::middleware::rbac::RequireSendOff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Operator-facing verdict strings.
const ACCESS_GRANTED: &str = "ACCESS GRANTED";
const ACCESS_DENIED: &str = "ACCESS DENIED";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyScanRequest {
    /// Raw text decoded from the QR image.
    pub decoded_text: String,
    pub scan_mode: ScanMode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutcome {
    /// `"ACCESS GRANTED"` or `"ACCESS DENIED"`.
    pub verdict: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenialReason>,
    /// The authoritative record, shown to the operator on the scan screen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outpass: Option<Outpass>,
}

impl ScanOutcome {
    fn granted(outpass: Outpass) -> Self {
        Self {
            verdict: ACCESS_GRANTED,
            reason: None,
            outpass: Some(outpass),
        }
    }

    fn denied(reason: DenialReason, outpass: Option<Outpass>) -> Self {
        Self {
            verdict: ACCESS_DENIED,
            reason: Some(reason),
            outpass,
        }
    }
}

// ---------------------------------------------------------------------------
// POST /scan/verify
// ---------------------------------------------------------------------------

/// Evaluate a scanned QR payload. Persists nothing.
///
/// Denials are successful responses, not errors -- the scanner renders
/// them distinctly from transport failures.
pub async fn verify_scan(
    RequireSendOff(_auth): RequireSendOff,
    State(state): State<AppState>,
    Json(input): Json<VerifyScanRequest>,
) -> AppResult<impl IntoResponse> {
    // Malformed payloads are decided before any store call.
    let Ok(payload) = parse_payload(&input.decoded_text) else {
        return Ok(Json(DataResponse {
            data: ScanOutcome::denied(DenialReason::MalformedPayload, None),
        }));
    };

    let outpass = fetch_outpass(&state.pool, payload.id).await?;
    let status = parse_status(&outpass)?;

    let outcome = match evaluate_scan(input.scan_mode, status) {
        ScanVerdict::Granted => ScanOutcome::granted(outpass),
        ScanVerdict::Denied { reason } => ScanOutcome::denied(reason, Some(outpass)),
    };

    tracing::info!(
        outpass_id = %payload.id,
        scan_mode = input.scan_mode.as_str(),
        verdict = outcome.verdict,
        reason = ?outcome.reason,
        "QR scan evaluated"
    );

    Ok(Json(DataResponse { data: outcome }))
}

// ---------------------------------------------------------------------------
// POST /scan/confirm
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmScanRequest {
    pub outpass_id: OutpassId,
    pub scan_mode: ScanMode,
}

/// Confirm a granted scan: write the ledger row, then move the status.
///
/// The verdict is re-evaluated against fresh store state, so a confirm
/// raced by another scanner (or an admin expiry) is refused rather than
/// double-logged.
pub async fn confirm_scan(
    RequireSendOff(auth): RequireSendOff,
    State(state): State<AppState>,
    Json(input): Json<ConfirmScanRequest>,
) -> AppResult<impl IntoResponse> {
    let outpass = fetch_outpass(&state.pool, input.outpass_id).await?;
    let current = parse_status(&outpass)?;

    if let ScanVerdict::Denied { reason } = evaluate_scan(input.scan_mode, current) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Scan denied: {}",
            reason.as_str()
        ))));
    }

    let event = input.scan_mode.event();
    let next = transition(current, event)
        .map_err(|e| AppError::Core(CoreError::Conflict(e.to_string())))?;

    // Ledger first. A failure here aborts the confirmation with the
    // status untouched.
    let now = Utc::now();
    match input.scan_mode {
        ScanMode::Exit => {
            let record = ExitRecord {
                outpass_id: outpass.id,
                student_id: outpass.student_id.clone(),
                student_name: outpass.student_name.clone(),
                hostel_name: outpass.hostel_name.clone(),
                college_name: outpass.college_name.clone(),
                room_number: outpass.room_number.clone(),
                year_and_dept: outpass.year_and_dept.clone(),
                reason: outpass.reason.clone(),
                from_date: outpass.from_date.clone(),
                to_date: outpass.to_date.clone(),
                exited_at: now,
                operator_id: auth.username.clone(),
            };
            state.ledger.record_exit(&record).await?;
        }
        ScanMode::Entry => {
            state
                .ledger
                .record_entry(outpass.id, &outpass.hostel_name, now)
                .await?;
        }
    }

    // Status second. From here the ledger row exists, so any failure must
    // leave a reconciliation marker for the sweep instead of vanishing.
    let swapped = OutpassRepo::update_status_if(&state.pool, outpass.id, current, next).await;
    let updated = match swapped {
        Ok(Some(updated)) => updated,
        Ok(None) => {
            file_reconciliation(&state, &input, current.as_str(), next.as_str(), &auth.username)
                .await;
            return Err(AppError::Core(CoreError::Conflict(
                "Outpass status changed during confirmation; ledger row kept, \
                 reconciliation scheduled"
                    .into(),
            )));
        }
        Err(e) => {
            file_reconciliation(&state, &input, current.as_str(), next.as_str(), &auth.username)
                .await;
            return Err(AppError::Database(e));
        }
    };

    tracing::info!(
        outpass_id = %outpass.id,
        scan_mode = input.scan_mode.as_str(),
        operator = %auth.username,
        from = %current,
        to = %next,
        "Scan confirmed and ledgered"
    );

    Ok(Json(DataResponse {
        data: ScanOutcome::granted(updated),
    }))
}

/// Best-effort marker write after a failed post-ledger status update.
async fn file_reconciliation(
    state: &AppState,
    input: &ConfirmScanRequest,
    expected_status: &str,
    target_status: &str,
    operator_id: &str,
) {
    let marker = CreateReconciliation {
        outpass_id: input.outpass_id,
        scan_type: input.scan_mode.as_str().to_string(),
        expected_status: expected_status.to_string(),
        target_status: target_status.to_string(),
        operator_id: operator_id.to_string(),
    };
    match ReconciliationRepo::create(&state.pool, &marker).await {
        Ok(row) => {
            tracing::warn!(
                outpass_id = %input.outpass_id,
                marker_id = row.id,
                "Status write failed after ledger success; reconciliation marker filed"
            );
        }
        Err(e) => {
            tracing::error!(
                outpass_id = %input.outpass_id,
                error = %e,
                "Could not file reconciliation marker; ledger and status are inconsistent"
            );
        }
    }
}

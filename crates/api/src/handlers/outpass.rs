//! Handlers for the outpass lifecycle.
//!
//! Every status write goes through `hostelgate_core::outpass::transition`
//! and the conditional repository update, so the transition table is
//! enforced here exactly as it is in the scan workflow.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use hostelgate_core::error::CoreError;
use hostelgate_core::outpass::{transition, OutpassEvent, OutpassStatus};
use hostelgate_core::qr::QrPayload;
use hostelgate_core::roles::{is_staff, ROLE_STUDENT};
use hostelgate_core::types::OutpassId;
use hostelgate_db::models::outpass::{
    CreateOutpass, Outpass, OutpassClearParams, OutpassListParams,
};
use hostelgate_db::repositories::OutpassRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuthority, RequireSendOff};
use crate::query::{clamp_limit, clamp_offset};
use crate::response::DataResponse;
use crate::state::AppState;

/// Fetch an outpass or fail with 404.
pub async fn fetch_outpass(
    pool: &hostelgate_db::DbPool,
    id: OutpassId,
) -> Result<Outpass, AppError> {
    OutpassRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Outpass",
            id: id.to_string(),
        })
    })
}

/// Typed status of a fetched row. A parse failure means the column and
/// the enum have drifted, which is an internal fault, not a client error.
pub fn parse_status(outpass: &Outpass) -> Result<OutpassStatus, AppError> {
    outpass
        .status()
        .map_err(|e| AppError::InternalError(e.to_string()))
}

// ---------------------------------------------------------------------------
// POST /outpasses
// ---------------------------------------------------------------------------

/// Create an outpass request in `pending` status.
///
/// Students can only file requests under their own student id.
pub async fn create_outpass(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateOutpass>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    if auth.role == ROLE_STUDENT && input.student_id != auth.username {
        return Err(AppError::Core(CoreError::Forbidden(
            "Students may only request outpasses for themselves".into(),
        )));
    }

    let outpass = OutpassRepo::create(&state.pool, &input).await?;

    tracing::info!(
        outpass_id = %outpass.id,
        student_id = %outpass.student_id,
        "Outpass requested"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: outpass })))
}

// ---------------------------------------------------------------------------
// GET /outpasses
// ---------------------------------------------------------------------------

/// List outpasses with optional filters.
///
/// Staff see everything; students are narrowed to their own records.
pub async fn list_outpasses(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<OutpassListParams>,
) -> AppResult<impl IntoResponse> {
    let status = params
        .status
        .as_deref()
        .map(|s| s.parse::<OutpassStatus>())
        .transpose()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let effective_student_id = if is_staff(&auth.role) {
        params.student_id
    } else {
        Some(auth.username.clone())
    };

    let limit = clamp_limit(params.limit, 50, 200);
    let offset = clamp_offset(params.offset);

    let outpasses = OutpassRepo::list_filtered(
        &state.pool,
        effective_student_id.as_deref(),
        params.hostel_name.as_deref(),
        status,
        limit,
        offset,
    )
    .await?;

    Ok(Json(DataResponse { data: outpasses }))
}

// ---------------------------------------------------------------------------
// GET /outpasses/:id
// ---------------------------------------------------------------------------

/// Point lookup. Students can only view their own passes.
pub async fn get_outpass(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<OutpassId>,
) -> AppResult<impl IntoResponse> {
    let outpass = fetch_outpass(&state.pool, id).await?;

    if !is_staff(&auth.role) && outpass.student_id != auth.username {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not your outpass".into(),
        )));
    }

    Ok(Json(DataResponse { data: outpass }))
}

// ---------------------------------------------------------------------------
// PATCH /outpasses/:id/status
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Decide an outpass request (or force-expire it).
///
/// Accepts the decision statuses only -- `exited`/`entered` belong to the
/// scan workflow, which is the sole path that keeps the external ledger
/// in step.
pub async fn update_status(
    RequireAuthority(auth): RequireAuthority,
    State(state): State<AppState>,
    Path(id): Path<OutpassId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let target: OutpassStatus = input
        .status
        .parse()
        .map_err(|e: hostelgate_core::outpass::UnknownStatus| {
            AppError::Core(CoreError::Validation(e.to_string()))
        })?;

    let event = match target {
        OutpassStatus::Approved => OutpassEvent::Approve,
        OutpassStatus::Rejected => OutpassEvent::Reject,
        OutpassStatus::Expired => OutpassEvent::ForceExpire,
        other => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Status '{other}' is set by the scan workflow, not by PATCH"
            ))))
        }
    };

    let outpass = fetch_outpass(&state.pool, id).await?;
    let current = parse_status(&outpass)?;
    let next =
        transition(current, event).map_err(|e| AppError::Core(CoreError::Conflict(e.to_string())))?;

    let updated = OutpassRepo::update_status_if(&state.pool, id, current, next)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Outpass was modified concurrently; re-read and retry".into(),
            ))
        })?;

    tracing::info!(
        outpass_id = %id,
        user_id = auth.user_id,
        from = %current,
        to = %next,
        "Outpass status updated"
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// GET /outpasses/:id/qr
// ---------------------------------------------------------------------------

/// The QR payload for an approved outpass.
///
/// The student's device renders this JSON as a QR image. Only approved
/// passes have one; any other status is a conflict.
pub async fn qr_payload(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<OutpassId>,
) -> AppResult<impl IntoResponse> {
    let outpass = fetch_outpass(&state.pool, id).await?;

    if !is_staff(&auth.role) && outpass.student_id != auth.username {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not your outpass".into(),
        )));
    }

    if parse_status(&outpass)? != OutpassStatus::Approved {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Outpass is '{}', QR codes exist only for approved passes",
            outpass.status
        ))));
    }

    let payload = QrPayload::for_approved(
        outpass.id,
        &outpass.student_name,
        &outpass.college_name,
        &outpass.hostel_name,
        &outpass.room_number,
        &outpass.year_and_dept,
        &outpass.reason,
        &outpass.from_date,
        &outpass.to_date,
    );

    Ok(Json(DataResponse { data: payload }))
}

// ---------------------------------------------------------------------------
// POST /outpasses/:id/expire
// ---------------------------------------------------------------------------

/// Force-expire a pass, invalidating its QR immediately.
///
/// Bypasses the ledger: expiry is an administrative act, not a physical
/// movement.
pub async fn force_expire(
    RequireSendOff(auth): RequireSendOff,
    State(state): State<AppState>,
    Path(id): Path<OutpassId>,
) -> AppResult<impl IntoResponse> {
    let outpass = fetch_outpass(&state.pool, id).await?;
    let current = parse_status(&outpass)?;
    let next = transition(current, OutpassEvent::ForceExpire)
        .map_err(|e| AppError::Core(CoreError::Conflict(e.to_string())))?;

    let updated = OutpassRepo::update_status_if(&state.pool, id, current, next)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Outpass was modified concurrently; re-read and retry".into(),
            ))
        })?;

    tracing::info!(
        outpass_id = %id,
        user_id = auth.user_id,
        from = %current,
        "Outpass force-expired"
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /outpasses
// ---------------------------------------------------------------------------

/// Bulk-clear outpass records, optionally scoped by hostel and/or student.
pub async fn clear_outpasses(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<OutpassClearParams>,
) -> AppResult<impl IntoResponse> {
    let deleted = OutpassRepo::delete_scoped(
        &state.pool,
        params.hostel_name.as_deref(),
        params.student_id.as_deref(),
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        hostel_name = ?params.hostel_name,
        student_id = ?params.student_id,
        deleted,
        "Outpasses bulk-cleared"
    );

    Ok(Json(DataResponse {
        data: serde_json::json!({ "deleted": deleted }),
    }))
}

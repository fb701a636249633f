//! Handlers for complaints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use hostelgate_core::error::CoreError;
use hostelgate_core::roles::is_staff;
use hostelgate_core::types::DbId;
use hostelgate_db::models::complaint::{
    validate_status_move, ComplaintListParams, CreateComplaint, UpdateComplaintStatus,
    COMPLAINT_IN_PROGRESS, COMPLAINT_OPEN, COMPLAINT_RESOLVED,
};
use hostelgate_db::repositories::{ComplaintRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuthority;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/complaints
///
/// File a complaint. The reporter's identity comes from the account
/// record, not the request body.
pub async fn create_complaint(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateComplaint>,
) -> AppResult<impl IntoResponse> {
    if input.category.trim().is_empty() || input.description.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "category and description are required".into(),
        )));
    }

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: auth.user_id.to_string(),
            })
        })?;

    let complaint = ComplaintRepo::create(
        &state.pool,
        &user.username,
        &user.name,
        &user.hostel_name,
        user.room_number.as_deref().unwrap_or(""),
        &input,
    )
    .await?;

    tracing::info!(
        complaint_id = complaint.id,
        student_id = %complaint.student_id,
        category = %complaint.category,
        "Complaint filed"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: complaint })))
}

/// GET /api/v1/complaints
///
/// Staff see complaints filtered by hostel/status; students see only
/// their own.
pub async fn list_complaints(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ComplaintListParams>,
) -> AppResult<impl IntoResponse> {
    let student_id = if is_staff(&auth.role) {
        None
    } else {
        Some(auth.username.clone())
    };

    let complaints = ComplaintRepo::list_filtered(
        &state.pool,
        student_id.as_deref(),
        params.hostel_name.as_deref(),
        params.status.as_deref(),
    )
    .await?;

    Ok(Json(DataResponse { data: complaints }))
}

/// PATCH /api/v1/complaints/:id/status
///
/// Advance a complaint along `open -> in-progress -> resolved`.
pub async fn update_complaint_status(
    RequireAuthority(auth): RequireAuthority,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComplaintStatus>,
) -> AppResult<impl IntoResponse> {
    if ![COMPLAINT_OPEN, COMPLAINT_IN_PROGRESS, COMPLAINT_RESOLVED]
        .contains(&input.status.as_str())
    {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid complaint status '{}'",
            input.status
        ))));
    }

    let complaint = ComplaintRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Complaint",
                id: id.to_string(),
            })
        })?;

    validate_status_move(&complaint.status, &input.status)
        .map_err(|e| AppError::Core(CoreError::Conflict(e)))?;

    let updated = ComplaintRepo::update_status(&state.pool, id, &input.status)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Complaint",
                id: id.to_string(),
            })
        })?;

    tracing::info!(
        complaint_id = id,
        user_id = auth.user_id,
        status = %input.status,
        "Complaint status updated"
    );

    Ok(Json(DataResponse { data: updated }))
}

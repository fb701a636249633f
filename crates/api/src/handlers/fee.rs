//! Handlers for fee tracking.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use hostelgate_core::error::CoreError;
use hostelgate_core::roles::is_staff;
use hostelgate_core::types::DbId;
use hostelgate_db::models::fee::{validate_fee_status, CreateFee, FeeListParams, UpdateFeeStatus};
use hostelgate_db::repositories::FeeRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/fees
///
/// Record a fee demand against a student.
pub async fn create_fee(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateFee>,
) -> AppResult<impl IntoResponse> {
    if input.amount_due <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "amountDue must be positive".into(),
        )));
    }

    let fee = FeeRepo::create(&state.pool, &input).await?;

    tracing::info!(
        fee_id = fee.id,
        student_id = %fee.student_id,
        amount_due = fee.amount_due,
        user_id = auth.user_id,
        "Fee record created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: fee })))
}

/// GET /api/v1/fees
///
/// Staff see fee records filtered by hostel/status; students see only
/// their own.
pub async fn list_fees(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<FeeListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = params.status {
        validate_fee_status(status).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let student_id = if is_staff(&auth.role) {
        None
    } else {
        Some(auth.username.clone())
    };

    let fees = FeeRepo::list_filtered(
        &state.pool,
        student_id.as_deref(),
        params.hostel_name.as_deref(),
        params.status.as_deref(),
    )
    .await?;

    Ok(Json(DataResponse { data: fees }))
}

/// PATCH /api/v1/fees/:id/status
pub async fn update_fee_status(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFeeStatus>,
) -> AppResult<impl IntoResponse> {
    validate_fee_status(&input.status).map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let updated = FeeRepo::update_status(&state.pool, id, &input.status)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "FeeStatus",
                id: id.to_string(),
            })
        })?;

    tracing::info!(
        fee_id = id,
        user_id = auth.user_id,
        status = %input.status,
        "Fee status updated"
    );

    Ok(Json(DataResponse { data: updated }))
}

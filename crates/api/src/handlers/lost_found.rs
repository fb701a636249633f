//! Handlers for the lost-and-found board.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use hostelgate_core::error::CoreError;
use hostelgate_core::types::DbId;
use hostelgate_db::models::lost_found::{
    validate_kind, CreateLostFoundItem, LostFoundListParams,
};
use hostelgate_db::repositories::{LostFoundRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/lost-found
///
/// Report a lost or found item.
pub async fn create_item(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateLostFoundItem>,
) -> AppResult<impl IntoResponse> {
    validate_kind(&input.kind).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    if input.item_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "itemName is required".into(),
        )));
    }

    let reporter = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: auth.user_id.to_string(),
            })
        })?;

    let item = LostFoundRepo::create(
        &state.pool,
        &reporter.username,
        &reporter.name,
        &reporter.hostel_name,
        &input,
    )
    .await?;

    tracing::info!(
        item_id = item.id,
        kind = %item.kind,
        reporter = %item.reporter_id,
        "Lost-and-found item reported"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/v1/lost-found
pub async fn list_items(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LostFoundListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref kind) = params.kind {
        validate_kind(kind).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let items = LostFoundRepo::list_filtered(
        &state.pool,
        params.hostel_name.as_deref(),
        params.kind.as_deref(),
    )
    .await?;

    Ok(Json(DataResponse { data: items }))
}

/// PATCH /api/v1/lost-found/:id/claim
///
/// Close an open item. A second claim is a conflict, not a no-op.
pub async fn claim_item(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    LostFoundRepo::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "LostFoundItem",
            id: id.to_string(),
        })
    })?;

    let claimed = LostFoundRepo::claim(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::Conflict("Item is already claimed".into()))
    })?;

    tracing::info!(item_id = id, user_id = auth.user_id, "Item claimed");

    Ok(Json(DataResponse { data: claimed }))
}

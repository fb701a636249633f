//! Handlers for mess menus.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use hostelgate_core::error::CoreError;
use hostelgate_core::types::DbId;
use hostelgate_db::models::mess_menu::{validate_day, UpsertMessMenu};
use hostelgate_db::repositories::MessMenuRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessMenuParams {
    pub hostel_name: String,
}

/// GET /api/v1/mess-menus?hostelName=
///
/// The weekly menu for one hostel, in weekday order.
pub async fn list_menus(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MessMenuParams>,
) -> AppResult<impl IntoResponse> {
    let menus = MessMenuRepo::list_for_hostel(&state.pool, &params.hostel_name).await?;
    Ok(Json(DataResponse { data: menus }))
}

/// PUT /api/v1/mess-menus
///
/// Insert or replace one hostel-day menu.
pub async fn upsert_menu(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpsertMessMenu>,
) -> AppResult<impl IntoResponse> {
    validate_day(&input.day_of_week).map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let menu = MessMenuRepo::upsert(&state.pool, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        hostel_name = %menu.hostel_name,
        day = %menu.day_of_week,
        "Mess menu upserted"
    );

    Ok(Json(DataResponse { data: menu }))
}

/// DELETE /api/v1/mess-menus/:id
pub async fn delete_menu(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !MessMenuRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "MessMenu",
            id: id.to_string(),
        }));
    }

    tracing::info!(user_id = auth.user_id, menu_id = id, "Mess menu deleted");

    Ok(Json(DataResponse {
        data: serde_json::json!({ "deleted": true }),
    }))
}

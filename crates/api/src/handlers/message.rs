//! Handlers for internal messaging.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use hostelgate_core::error::CoreError;
use hostelgate_core::roles::{is_staff, validate_role};
use hostelgate_core::types::DbId;
use hostelgate_db::models::message::CreateMessage;
use hostelgate_db::repositories::{MessageRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/messages
///
/// Send a notice, either to one user or broadcast to a role. Staff only.
pub async fn send_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateMessage>,
) -> AppResult<impl IntoResponse> {
    if !is_staff(&auth.role) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Staff role required to send messages".into(),
        )));
    }

    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    if let Some(ref role) = input.recipient_role {
        validate_role(role).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let sender = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: auth.user_id.to_string(),
            })
        })?;

    let message =
        MessageRepo::create(&state.pool, &sender.username, &sender.name, &input).await?;

    tracing::info!(
        message_id = message.id,
        sender = %message.sender_id,
        recipient_id = ?message.recipient_id,
        recipient_role = ?message.recipient_role,
        "Message sent"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// GET /api/v1/messages
///
/// The caller's inbox: direct messages plus broadcasts to their role.
pub async fn inbox(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let messages = MessageRepo::inbox(&state.pool, &auth.username, &auth.role).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// POST /api/v1/messages/:id/read
///
/// Mark a message read. Only an addressee may do this.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let message = MessageRepo::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Message",
            id: id.to_string(),
        })
    })?;

    let addressed_to_caller = message.recipient_id.as_deref() == Some(auth.username.as_str())
        || message.recipient_role.as_deref() == Some(auth.role.as_str());
    if !addressed_to_caller {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not a recipient of this message".into(),
        )));
    }

    let updated = MessageRepo::mark_read(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Message",
            id: id.to_string(),
        })
    })?;

    Ok(Json(DataResponse { data: updated }))
}

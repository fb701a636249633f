//! Handlers for registration, email verification, and login.
//!
//! Role assignment happens exactly once, at registration: privileged
//! roles require the matching shared code. Passwords are compared (and
//! stored) in the clear -- a known defect of this system, surfaced
//! deliberately by the devops credential listing.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use hostelgate_core::error::CoreError;
use hostelgate_core::roles::{validate_role, ROLE_STUDENT};
use hostelgate_db::models::user::{CreateUser, UserResponse};
use hostelgate_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: String,
    pub hostel_name: String,
    pub room_number: Option<String>,
    pub email: String,
    /// Shared secret gating privileged roles. Ignored for students.
    pub role_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    pub username: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// POST /api/v1/auth/register
///
/// Create an account and send a verification code to the given address.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    validate_role(&input.role).map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    for (name, value) in [
        ("username", &input.username),
        ("password", &input.password),
        ("name", &input.name),
        ("hostelName", &input.hostel_name),
        ("email", &input.email),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Missing required field: {name}"
            ))));
        }
    }

    // Privileged roles are gated by the shared per-role code.
    if input.role != ROLE_STUDENT {
        let expected = state.config.role_codes.code_for(&input.role);
        let presented = input.role_code.as_deref();
        if expected.is_none() || expected != presented {
            return Err(AppError::Core(CoreError::Forbidden(format!(
                "Invalid registration code for role '{}'",
                input.role
            ))));
        }
    }

    let create = CreateUser {
        username: input.username,
        password: input.password,
        name: input.name,
        role: input.role,
        hostel_name: input.hostel_name,
        room_number: input.room_number,
        email: input.email,
    };
    let user = UserRepo::create(&state.pool, &create).await?;

    let code = state.verification_codes.issue(user.id);
    state.mailer.send_verification_code(&user.email, &code).await;

    tracing::info!(
        user_id = user.id,
        username = %user.username,
        role = %user.role,
        "User registered, verification code issued"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}

/// POST /api/v1/auth/verify-email
///
/// Consume a verification code and activate the account.
pub async fn verify_email(
    State(state): State<AppState>,
    Json(input): Json<VerifyEmailRequest>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: input.username.clone(),
            })
        })?;

    if !state.verification_codes.verify(user.id, &input.code) {
        return Err(AppError::Core(CoreError::Validation(
            "Invalid or expired verification code".into(),
        )));
    }

    UserRepo::mark_email_verified(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, "Email verified");

    Ok(Json(DataResponse {
        data: serde_json::json!({ "verified": true }),
    }))
}

/// POST /api/v1/auth/login
///
/// Check credentials and issue an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .filter(|user| user.password == input.password)
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid credentials".into())))?;

    if !user.email_verified {
        return Err(AppError::Core(CoreError::Forbidden(
            "Email not verified".into(),
        )));
    }

    let token = generate_access_token(user.id, &user.username, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(Json(DataResponse {
        data: LoginResponse {
            token,
            user: UserResponse::from(user),
        },
    }))
}

/// GET /api/v1/auth/me
///
/// The caller's own account record.
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: auth.user_id.to_string(),
            })
        })?;

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

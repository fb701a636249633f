//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not meet the minimum requirement. Use these in route handlers to
//! enforce authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use hostelgate_core::error::CoreError;
use hostelgate_core::roles::{ROLE_ADMIN, ROLE_AUTHORITY, ROLE_DEVOPS, ROLE_SEND_OFF};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `authority` or `admin` role -- the roles that decide outpass
/// requests. Rejects with 403 Forbidden otherwise.
pub struct RequireAuthority(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuthority {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_AUTHORITY {
            return Err(AppError::Core(CoreError::Forbidden(
                "Authority or Admin role required".into(),
            )));
        }
        Ok(RequireAuthority(user))
    }
}

/// Requires `send-off` or `admin` role -- the roles that operate the gate
/// scanner. Rejects with 403 Forbidden otherwise.
pub struct RequireSendOff(pub AuthUser);

impl FromRequestParts<AppState> for RequireSendOff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_SEND_OFF {
            return Err(AppError::Core(CoreError::Forbidden(
                "Send-off or Admin role required".into(),
            )));
        }
        Ok(RequireSendOff(user))
    }
}

/// Requires the `devops` role. Rejects with 403 Forbidden otherwise.
pub struct RequireDevops(pub AuthUser);

impl FromRequestParts<AppState> for RequireDevops {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_DEVOPS {
            return Err(AppError::Core(CoreError::Forbidden(
                "Devops role required".into(),
            )));
        }
        Ok(RequireDevops(user))
    }
}

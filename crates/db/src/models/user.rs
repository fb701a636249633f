//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hostelgate_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the cleartext password column. Only the devops credential
/// listing serializes this struct directly; everything else goes through
/// [`UserResponse`].
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: String,
    pub hostel_name: String,
    pub room_number: Option<String>,
    pub email: String,
    pub email_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// User representation for ordinary API responses (no password).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub name: String,
    pub role: String,
    pub hostel_name: String,
    pub room_number: Option<String>,
    pub email: String,
    pub email_verified: bool,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            role: user.role,
            hostel_name: user.hostel_name,
            room_number: user.room_number,
            email: user.email,
            email_verified: user.email_verified,
            created_at: user.created_at,
        }
    }
}

/// DTO for inserting a new user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: String,
    pub hostel_name: String,
    pub room_number: Option<String>,
    pub email: String,
}

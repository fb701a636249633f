//! Well-known role name constants.
//!
//! These must match the role check constraint in
//! `20260801000002_create_users_table.sql`.

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_AUTHORITY: &str = "authority";
pub const ROLE_SEND_OFF: &str = "send-off";
pub const ROLE_DEVOPS: &str = "devops";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[
    ROLE_STUDENT,
    ROLE_ADMIN,
    ROLE_AUTHORITY,
    ROLE_SEND_OFF,
    ROLE_DEVOPS,
];

/// Roles that manage hostel records (everything except students).
pub fn is_staff(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_AUTHORITY || role == ROLE_SEND_OFF || role == ROLE_DEVOPS
}

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}

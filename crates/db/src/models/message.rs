//! Internal message entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use hostelgate_core::types::{DbId, Timestamp};

/// A notice, either direct (`recipient_id`) or broadcast to a role
/// (`recipient_role`). Exactly one of the two is set.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: DbId,
    pub sender_id: String,
    pub sender_name: String,
    pub recipient_id: Option<String>,
    pub recipient_role: Option<String>,
    pub subject: String,
    pub body: String,
    pub read: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessage {
    pub recipient_id: Option<String>,
    pub recipient_role: Option<String>,
    pub subject: String,
    pub body: String,
}

impl CreateMessage {
    /// A message needs exactly one addressing mode.
    pub fn validate(&self) -> Result<(), String> {
        match (&self.recipient_id, &self.recipient_role) {
            (None, None) => Err("Either recipientId or recipientRole is required".into()),
            (Some(_), Some(_)) => {
                Err("recipientId and recipientRole are mutually exclusive".into())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_to(id: Option<&str>, role: Option<&str>) -> CreateMessage {
        CreateMessage {
            recipient_id: id.map(String::from),
            recipient_role: role.map(String::from),
            subject: "curfew".into(),
            body: "gates close at 22:00 tonight".into(),
        }
    }

    #[test]
    fn test_exactly_one_addressing_mode() {
        assert!(message_to(Some("2021cs042"), None).validate().is_ok());
        assert!(message_to(None, Some("student")).validate().is_ok());
        assert!(message_to(None, None).validate().is_err());
        assert!(message_to(Some("2021cs042"), Some("student"))
            .validate()
            .is_err());
    }
}

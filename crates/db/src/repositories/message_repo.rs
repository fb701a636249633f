//! Repository for the `messages` table.

use sqlx::PgPool;

use hostelgate_core::types::DbId;

use crate::models::message::{CreateMessage, Message};

const COLUMNS: &str = "id, sender_id, sender_name, recipient_id, recipient_role, subject, \
                        body, read, created_at, updated_at";

/// Provides CRUD operations for internal messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Insert a new message. The sender's identity comes from the
    /// authenticated caller.
    pub async fn create(
        pool: &PgPool,
        sender_id: &str,
        sender_name: &str,
        input: &CreateMessage,
    ) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (sender_id, sender_name, recipient_id, recipient_role,
                                   subject, body)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(sender_id)
            .bind(sender_name)
            .bind(&input.recipient_id)
            .bind(&input.recipient_role)
            .bind(&input.subject)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM messages WHERE id = $1");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Inbox for a user: direct messages plus broadcasts to their role,
    /// newest first.
    pub async fn inbox(
        pool: &PgPool,
        recipient_id: &str,
        role: &str,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE recipient_id = $1 OR recipient_role = $2
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(recipient_id)
            .bind(role)
            .fetch_all(pool)
            .await
    }

    /// Mark a message read. Returns the updated row, or `None` if the id
    /// is unknown.
    pub async fn mark_read(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!(
            "UPDATE messages SET read = TRUE, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

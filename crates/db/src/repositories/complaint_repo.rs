//! Repository for the `complaints` table.

use sqlx::PgPool;

use hostelgate_core::types::DbId;

use crate::models::complaint::{Complaint, CreateComplaint};

const COLUMNS: &str = "id, student_id, student_name, hostel_name, room_number, category, \
                        description, status, created_at, updated_at";

/// Provides CRUD operations for complaints.
pub struct ComplaintRepo;

impl ComplaintRepo {
    /// Insert a new complaint in `open` status. The reporter's identity
    /// fields come from the authenticated caller, not the request body.
    pub async fn create(
        pool: &PgPool,
        student_id: &str,
        student_name: &str,
        hostel_name: &str,
        room_number: &str,
        input: &CreateComplaint,
    ) -> Result<Complaint, sqlx::Error> {
        let query = format!(
            "INSERT INTO complaints (student_id, student_name, hostel_name, room_number,
                                     category, description)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(student_id)
            .bind(student_name)
            .bind(hostel_name)
            .bind(room_number)
            .bind(&input.category)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complaints WHERE id = $1");
        sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List complaints, newest first, with optional filters.
    pub async fn list_filtered(
        pool: &PgPool,
        student_id: Option<&str>,
        hostel_name: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<Complaint>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM complaints
             WHERE ($1::TEXT IS NULL OR student_id = $1)
               AND ($2::TEXT IS NULL OR hostel_name = $2)
               AND ($3::TEXT IS NULL OR status = $3)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(student_id)
            .bind(hostel_name)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Set a complaint's status. Legality of the move is the caller's
    /// concern (checked against the linear lifecycle in the handler).
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!(
            "UPDATE complaints SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}

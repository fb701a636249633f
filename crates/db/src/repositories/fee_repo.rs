//! Repository for the `fees` table.

use sqlx::PgPool;

use hostelgate_core::types::DbId;

use crate::models::fee::{CreateFee, FeeStatus};

const COLUMNS: &str = "id, student_id, student_name, hostel_name, room_number, amount_due, \
                        due_date, status, created_at, updated_at";

/// Provides CRUD operations for fee records.
pub struct FeeRepo;

impl FeeRepo {
    /// Insert a new fee record in `due` status.
    pub async fn create(pool: &PgPool, input: &CreateFee) -> Result<FeeStatus, sqlx::Error> {
        let query = format!(
            "INSERT INTO fees (student_id, student_name, hostel_name, room_number,
                               amount_due, due_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FeeStatus>(&query)
            .bind(&input.student_id)
            .bind(&input.student_name)
            .bind(&input.hostel_name)
            .bind(&input.room_number)
            .bind(input.amount_due)
            .bind(&input.due_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FeeStatus>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fees WHERE id = $1");
        sqlx::query_as::<_, FeeStatus>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List fee records, newest first, with optional filters.
    pub async fn list_filtered(
        pool: &PgPool,
        student_id: Option<&str>,
        hostel_name: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<FeeStatus>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fees
             WHERE ($1::TEXT IS NULL OR student_id = $1)
               AND ($2::TEXT IS NULL OR hostel_name = $2)
               AND ($3::TEXT IS NULL OR status = $3)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, FeeStatus>(&query)
            .bind(student_id)
            .bind(hostel_name)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Set a fee record's status.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<FeeStatus>, sqlx::Error> {
        let query = format!(
            "UPDATE fees SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FeeStatus>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}

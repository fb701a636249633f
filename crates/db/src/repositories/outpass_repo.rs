//! Repository for the `outpasses` table.

use sqlx::PgPool;

use hostelgate_core::outpass::OutpassStatus;
use hostelgate_core::types::OutpassId;

use crate::models::outpass::{CreateOutpass, Outpass};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, student_name, hostel_name, college_name, room_number, \
                        year_and_dept, reason, from_date, to_date, status, created_at, \
                        approved_at, updated_at";

/// Provides CRUD operations for outpasses, plus the conditional status
/// write the lifecycle layer relies on.
pub struct OutpassRepo;

impl OutpassRepo {
    /// Insert a new outpass in `pending` status, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateOutpass) -> Result<Outpass, sqlx::Error> {
        let query = format!(
            "INSERT INTO outpasses (student_id, student_name, hostel_name, college_name,
                                    room_number, year_and_dept, reason, from_date, to_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Outpass>(&query)
            .bind(&input.student_id)
            .bind(&input.student_name)
            .bind(&input.hostel_name)
            .bind(&input.college_name)
            .bind(&input.room_number)
            .bind(&input.year_and_dept)
            .bind(&input.reason)
            .bind(&input.from_date)
            .bind(&input.to_date)
            .fetch_one(pool)
            .await
    }

    /// Find an outpass by id.
    pub async fn find_by_id(pool: &PgPool, id: OutpassId) -> Result<Option<Outpass>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM outpasses WHERE id = $1");
        sqlx::query_as::<_, Outpass>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List outpasses, newest first, with optional filters.
    pub async fn list_filtered(
        pool: &PgPool,
        student_id: Option<&str>,
        hostel_name: Option<&str>,
        status: Option<OutpassStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Outpass>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM outpasses
             WHERE ($1::TEXT IS NULL OR student_id = $1)
               AND ($2::TEXT IS NULL OR hostel_name = $2)
               AND ($3::TEXT IS NULL OR status = $3)
             ORDER BY created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Outpass>(&query)
            .bind(student_id)
            .bind(hostel_name)
            .bind(status.map(|s| s.as_str()))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Conditionally move an outpass from `expected` to `next`.
    ///
    /// The `WHERE status = expected` clause is the compare-and-swap guard:
    /// when two writers race, exactly one observes the expected status and
    /// wins; the loser gets `None`. `approved_at` is stamped only when the
    /// write lands on `approved` -- no other transition touches it.
    pub async fn update_status_if(
        pool: &PgPool,
        id: OutpassId,
        expected: OutpassStatus,
        next: OutpassStatus,
    ) -> Result<Option<Outpass>, sqlx::Error> {
        let query = format!(
            "UPDATE outpasses SET
                status = $3,
                approved_at = CASE WHEN $3 = 'approved' THEN NOW() ELSE approved_at END,
                updated_at = NOW()
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Outpass>(&query)
            .bind(id)
            .bind(expected.as_str())
            .bind(next.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Bulk-delete outpasses, optionally scoped to a hostel and/or student.
    ///
    /// With no filters this clears the whole table. Returns the number of
    /// rows removed.
    pub async fn delete_scoped(
        pool: &PgPool,
        hostel_name: Option<&str>,
        student_id: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM outpasses
             WHERE ($1::TEXT IS NULL OR hostel_name = $1)
               AND ($2::TEXT IS NULL OR student_id = $2)",
        )
        .bind(hostel_name)
        .bind(student_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}

//! Repository for the `lost_found_items` table.

use sqlx::PgPool;

use hostelgate_core::types::DbId;

use crate::models::lost_found::{CreateLostFoundItem, LostFoundItem};

const COLUMNS: &str = "id, reporter_id, reporter_name, item_name, description, location, \
                        kind, status, hostel_name, created_at, updated_at";

/// Provides CRUD operations for lost-and-found items.
pub struct LostFoundRepo;

impl LostFoundRepo {
    /// Insert a new item report in `open` status.
    pub async fn create(
        pool: &PgPool,
        reporter_id: &str,
        reporter_name: &str,
        hostel_name: &str,
        input: &CreateLostFoundItem,
    ) -> Result<LostFoundItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO lost_found_items (reporter_id, reporter_name, item_name,
                                           description, location, kind, hostel_name)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LostFoundItem>(&query)
            .bind(reporter_id)
            .bind(reporter_name)
            .bind(&input.item_name)
            .bind(&input.description)
            .bind(&input.location)
            .bind(&input.kind)
            .bind(hostel_name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LostFoundItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lost_found_items WHERE id = $1");
        sqlx::query_as::<_, LostFoundItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List items, newest first, with optional filters.
    pub async fn list_filtered(
        pool: &PgPool,
        hostel_name: Option<&str>,
        kind: Option<&str>,
    ) -> Result<Vec<LostFoundItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lost_found_items
             WHERE ($1::TEXT IS NULL OR hostel_name = $1)
               AND ($2::TEXT IS NULL OR kind = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, LostFoundItem>(&query)
            .bind(hostel_name)
            .bind(kind)
            .fetch_all(pool)
            .await
    }

    /// Claim an open item. The `status = 'open'` guard makes a second
    /// claim return `None`.
    pub async fn claim(pool: &PgPool, id: DbId) -> Result<Option<LostFoundItem>, sqlx::Error> {
        let query = format!(
            "UPDATE lost_found_items SET status = 'claimed', updated_at = NOW()
             WHERE id = $1 AND status = 'open'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LostFoundItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

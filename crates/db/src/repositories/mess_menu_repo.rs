//! Repository for the `mess_menus` table.

use sqlx::PgPool;

use hostelgate_core::types::DbId;

use crate::models::mess_menu::{MessMenu, UpsertMessMenu};

const COLUMNS: &str = "id, hostel_name, day_of_week, breakfast, lunch, snacks, dinner, \
                        created_at, updated_at";

/// Provides upsert/list operations for mess menus.
pub struct MessMenuRepo;

impl MessMenuRepo {
    /// Insert or replace the menu for one hostel-day.
    pub async fn upsert(pool: &PgPool, input: &UpsertMessMenu) -> Result<MessMenu, sqlx::Error> {
        let query = format!(
            "INSERT INTO mess_menus (hostel_name, day_of_week, breakfast, lunch, snacks, dinner)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT ON CONSTRAINT uq_mess_menus_hostel_day DO UPDATE SET
                breakfast = EXCLUDED.breakfast,
                lunch = EXCLUDED.lunch,
                snacks = EXCLUDED.snacks,
                dinner = EXCLUDED.dinner,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MessMenu>(&query)
            .bind(&input.hostel_name)
            .bind(&input.day_of_week)
            .bind(&input.breakfast)
            .bind(&input.lunch)
            .bind(&input.snacks)
            .bind(&input.dinner)
            .fetch_one(pool)
            .await
    }

    /// Weekly menu for one hostel, in weekday order.
    pub async fn list_for_hostel(
        pool: &PgPool,
        hostel_name: &str,
    ) -> Result<Vec<MessMenu>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mess_menus
             WHERE hostel_name = $1
             ORDER BY array_position(
                 ARRAY['monday','tuesday','wednesday','thursday','friday','saturday','sunday'],
                 day_of_week)"
        );
        sqlx::query_as::<_, MessMenu>(&query)
            .bind(hostel_name)
            .fetch_all(pool)
            .await
    }

    /// Delete one hostel-day row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM mess_menus WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

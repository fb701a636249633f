//! Repository for the `ledger_reconciliations` table.

use sqlx::PgPool;

use hostelgate_core::types::DbId;

use crate::models::reconciliation::{CreateReconciliation, LedgerReconciliation};

const COLUMNS: &str = "id, outpass_id, scan_type, expected_status, target_status, \
                        operator_id, created_at, resolved_at";

/// Provides operations for ledger reconciliation markers.
pub struct ReconciliationRepo;

impl ReconciliationRepo {
    /// Persist a marker for a status write that failed after the ledger
    /// accepted the scan.
    pub async fn create(
        pool: &PgPool,
        input: &CreateReconciliation,
    ) -> Result<LedgerReconciliation, sqlx::Error> {
        let query = format!(
            "INSERT INTO ledger_reconciliations (outpass_id, scan_type, expected_status,
                                                 target_status, operator_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LedgerReconciliation>(&query)
            .bind(input.outpass_id)
            .bind(&input.scan_type)
            .bind(&input.expected_status)
            .bind(&input.target_status)
            .bind(&input.operator_id)
            .fetch_one(pool)
            .await
    }

    /// Unresolved markers, oldest first.
    pub async fn list_unresolved(
        pool: &PgPool,
    ) -> Result<Vec<LedgerReconciliation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ledger_reconciliations
             WHERE resolved_at IS NULL
             ORDER BY created_at"
        );
        sqlx::query_as::<_, LedgerReconciliation>(&query)
            .fetch_all(pool)
            .await
    }

    /// Stamp a marker resolved. Returns `true` if the row changed.
    pub async fn resolve(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE ledger_reconciliations SET resolved_at = NOW()
             WHERE id = $1 AND resolved_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

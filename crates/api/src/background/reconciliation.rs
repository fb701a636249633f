//! Periodic retry of status writes that failed after a ledger success.
//!
//! The confirm workflow writes the ledger row first and the status second.
//! When the second write fails it files a marker; this sweep retries the
//! conditional update until it lands, or resolves the marker as stale once
//! the record has moved on without it.

use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use hostelgate_core::outpass::OutpassStatus;
use hostelgate_db::repositories::{OutpassRepo, ReconciliationRepo};

/// Outcome counts of one sweep pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Markers whose status write landed on retry.
    pub applied: u64,
    /// Markers resolved because the record had already moved on.
    pub stale: u64,
    /// Markers left for the next pass (record temporarily unreadable).
    pub skipped: u64,
}

/// Run one pass over all unresolved markers.
pub async fn sweep(pool: &PgPool) -> Result<SweepStats, sqlx::Error> {
    let mut stats = SweepStats::default();

    for marker in ReconciliationRepo::list_unresolved(pool).await? {
        let (Ok(expected), Ok(target)) = (
            marker.expected_status.parse::<OutpassStatus>(),
            marker.target_status.parse::<OutpassStatus>(),
        ) else {
            tracing::error!(
                marker_id = marker.id,
                expected = %marker.expected_status,
                target = %marker.target_status,
                "Unparseable reconciliation marker; resolving as stale"
            );
            ReconciliationRepo::resolve(pool, marker.id).await?;
            stats.stale += 1;
            continue;
        };

        match OutpassRepo::update_status_if(pool, marker.outpass_id, expected, target).await? {
            Some(_) => {
                ReconciliationRepo::resolve(pool, marker.id).await?;
                tracing::info!(
                    marker_id = marker.id,
                    outpass_id = %marker.outpass_id,
                    to = %target,
                    "Reconciled status write applied"
                );
                stats.applied += 1;
            }
            None => {
                // The expected status no longer holds. Either another
                // writer already applied an equivalent transition or the
                // record went elsewhere; both ways the marker is spent.
                match OutpassRepo::find_by_id(pool, marker.outpass_id).await? {
                    Some(current) => {
                        ReconciliationRepo::resolve(pool, marker.id).await?;
                        tracing::warn!(
                            marker_id = marker.id,
                            outpass_id = %marker.outpass_id,
                            current = %current.status,
                            target = %target,
                            "Reconciliation marker stale; record moved without it"
                        );
                        stats.stale += 1;
                    }
                    None => {
                        // Row gone mid-pass (bulk clear cascades markers);
                        // leave it for the cascade or the next pass.
                        stats.skipped += 1;
                    }
                }
            }
        }
    }

    Ok(stats)
}

/// Run the reconciliation sweep loop until `cancel` is triggered.
pub async fn run(pool: PgPool, interval_secs: u64, cancel: CancellationToken) {
    tracing::info!(interval_secs, "Reconciliation sweep started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Reconciliation sweep stopping");
                break;
            }
            _ = interval.tick() => {
                match sweep(&pool).await {
                    Ok(stats) if stats.applied > 0 || stats.stale > 0 => {
                        tracing::info!(
                            applied = stats.applied,
                            stale = stats.stale,
                            skipped = stats.skipped,
                            "Reconciliation sweep finished"
                        );
                    }
                    Ok(_) => {
                        tracing::debug!("Reconciliation sweep: nothing to do");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Reconciliation sweep failed");
                    }
                }
            }
        }
    }
}

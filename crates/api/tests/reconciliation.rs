//! Tests for the reconciliation sweep.

use sqlx::PgPool;

use hostelgate_api::background::reconciliation::{sweep, SweepStats};
use hostelgate_core::outpass::OutpassStatus;
use hostelgate_db::models::outpass::CreateOutpass;
use hostelgate_db::models::reconciliation::CreateReconciliation;
use hostelgate_db::repositories::{OutpassRepo, ReconciliationRepo};

async fn approved_outpass(pool: &PgPool) -> uuid::Uuid {
    let outpass = OutpassRepo::create(
        pool,
        &CreateOutpass {
            student_id: "2021cs042".to_string(),
            student_name: "Asha Rao".to_string(),
            hostel_name: "Kaveri Hostel".to_string(),
            college_name: "NIT Surathkal".to_string(),
            room_number: "B-214".to_string(),
            year_and_dept: "3rd Year CSE".to_string(),
            reason: "home visit".to_string(),
            from_date: "2024-01-10".to_string(),
            to_date: "2024-01-12".to_string(),
        },
    )
    .await
    .unwrap();
    OutpassRepo::update_status_if(
        pool,
        outpass.id,
        OutpassStatus::Pending,
        OutpassStatus::Approved,
    )
    .await
    .unwrap()
    .unwrap();
    outpass.id
}

fn marker_for(outpass_id: uuid::Uuid) -> CreateReconciliation {
    CreateReconciliation {
        outpass_id,
        scan_type: "EXIT".to_string(),
        expected_status: OutpassStatus::Approved.as_str().to_string(),
        target_status: OutpassStatus::Exited.as_str().to_string(),
        operator_id: "gate01".to_string(),
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sweep_applies_pending_status_writes(pool: PgPool) {
    let id = approved_outpass(&pool).await;
    ReconciliationRepo::create(&pool, &marker_for(id)).await.unwrap();

    let stats = sweep(&pool).await.unwrap();
    assert_eq!(
        stats,
        SweepStats {
            applied: 1,
            stale: 0,
            skipped: 0
        }
    );

    // The deferred exit landed and the marker is spent.
    let outpass = OutpassRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(outpass.status().unwrap(), OutpassStatus::Exited);
    assert!(ReconciliationRepo::list_unresolved(&pool).await.unwrap().is_empty());

    // A second pass has nothing to do.
    let stats = sweep(&pool).await.unwrap();
    assert_eq!(stats, SweepStats::default());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sweep_resolves_stale_markers_without_writing(pool: PgPool) {
    let id = approved_outpass(&pool).await;
    ReconciliationRepo::create(&pool, &marker_for(id)).await.unwrap();

    // The record moved on without the marker: an admin expired it.
    OutpassRepo::update_status_if(&pool, id, OutpassStatus::Approved, OutpassStatus::Expired)
        .await
        .unwrap()
        .unwrap();

    let stats = sweep(&pool).await.unwrap();
    assert_eq!(
        stats,
        SweepStats {
            applied: 0,
            stale: 1,
            skipped: 0
        }
    );

    // The stale marker did not clobber the expiry.
    let outpass = OutpassRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(outpass.status().unwrap(), OutpassStatus::Expired);
    assert!(ReconciliationRepo::list_unresolved(&pool).await.unwrap().is_empty());
}

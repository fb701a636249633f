//! Integration tests for users, mess menus, and reconciliation markers.

use sqlx::PgPool;

use hostelgate_core::outpass::OutpassStatus;
use hostelgate_core::roles::ROLE_STUDENT;
use hostelgate_db::models::mess_menu::UpsertMessMenu;
use hostelgate_db::models::outpass::CreateOutpass;
use hostelgate_db::models::reconciliation::CreateReconciliation;
use hostelgate_db::models::user::CreateUser;
use hostelgate_db::repositories::{MessMenuRepo, OutpassRepo, ReconciliationRepo, UserRepo};

fn new_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        password: "letmein".to_string(),
        name: "Asha Rao".to_string(),
        role: ROLE_STUDENT.to_string(),
        hostel_name: "Netravati Girls Hostel".to_string(),
        room_number: Some("B-214".to_string()),
        email: "asha@example.edu".to_string(),
    }
}

fn menu_for(day: &str) -> UpsertMessMenu {
    UpsertMessMenu {
        hostel_name: "Kaveri Hostel".to_string(),
        day_of_week: day.to_string(),
        breakfast: "idli, sambar".to_string(),
        lunch: "rice, rasam, curd".to_string(),
        snacks: "tea, biscuits".to_string(),
        dinner: "chapati, paneer".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn duplicate_username_violates_unique_constraint(pool: PgPool) {
    UserRepo::create(&pool, &new_user("2021cs042")).await.unwrap();

    let err = UserRepo::create(&pool, &new_user("2021cs042"))
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_users_username"));
        }
        other => panic!("expected database error, got {other:?}"),
    }
}

#[sqlx::test]
async fn email_verification_flips_once(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("2021cs042")).await.unwrap();
    assert!(!user.email_verified);

    assert!(UserRepo::mark_email_verified(&pool, user.id).await.unwrap());
    // Second call is a no-op.
    assert!(!UserRepo::mark_email_verified(&pool, user.id).await.unwrap());

    let user = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(user.email_verified);
}

// ---------------------------------------------------------------------------
// Mess menus
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn mess_menu_upsert_replaces_existing_day(pool: PgPool) {
    let first = MessMenuRepo::upsert(&pool, &menu_for("monday")).await.unwrap();

    let mut replacement = menu_for("monday");
    replacement.dinner = "biryani".to_string();
    let second = MessMenuRepo::upsert(&pool, &replacement).await.unwrap();

    // Same row, new contents.
    assert_eq!(second.id, first.id);
    assert_eq!(second.dinner, "biryani");

    let menus = MessMenuRepo::list_for_hostel(&pool, "Kaveri Hostel").await.unwrap();
    assert_eq!(menus.len(), 1);
}

#[sqlx::test]
async fn mess_menus_list_in_weekday_order(pool: PgPool) {
    MessMenuRepo::upsert(&pool, &menu_for("sunday")).await.unwrap();
    MessMenuRepo::upsert(&pool, &menu_for("tuesday")).await.unwrap();
    MessMenuRepo::upsert(&pool, &menu_for("monday")).await.unwrap();

    let menus = MessMenuRepo::list_for_hostel(&pool, "Kaveri Hostel").await.unwrap();
    let days: Vec<&str> = menus.iter().map(|m| m.day_of_week.as_str()).collect();
    assert_eq!(days, vec!["monday", "tuesday", "sunday"]);
}

// ---------------------------------------------------------------------------
// Reconciliation markers
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn reconciliation_markers_resolve_once(pool: PgPool) {
    let outpass = OutpassRepo::create(
        &pool,
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

    let marker = ReconciliationRepo::create(
        &pool,
        &CreateReconciliation {
            outpass_id: outpass.id,
            scan_type: "EXIT".to_string(),
            expected_status: OutpassStatus::Approved.as_str().to_string(),
            target_status: OutpassStatus::Exited.as_str().to_string(),
            operator_id: "gate01".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(marker.resolved_at.is_none());

    let unresolved = ReconciliationRepo::list_unresolved(&pool).await.unwrap();
    assert_eq!(unresolved.len(), 1);

    assert!(ReconciliationRepo::resolve(&pool, marker.id).await.unwrap());
    assert!(!ReconciliationRepo::resolve(&pool, marker.id).await.unwrap());

    let unresolved = ReconciliationRepo::list_unresolved(&pool).await.unwrap();
    assert!(unresolved.is_empty());
}

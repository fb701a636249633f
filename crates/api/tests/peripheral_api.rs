//! Tests for the peripheral CRUD surfaces: complaints, mess menus,
//! messages, fees, and lost-and-found.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

// ---------------------------------------------------------------------------
// Complaints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn complaint_lifecycle_is_linear(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let (_, student) = app.seed_user("2021cs042", "student").await;
    let (_, authority) = app.seed_user("warden01", "authority").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/complaints",
            Some(&student),
            Some(json!({ "category": "plumbing", "description": "tap leaks all night" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "open");
    // Reporter identity comes from the account, not the body.
    assert_eq!(body["data"]["studentId"], "2021cs042");
    assert_eq!(body["data"]["hostelName"], "Kaveri Hostel");
    let id = body["data"]["id"].as_i64().unwrap();

    // Students cannot move complaint statuses.
    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/complaints/{id}/status"),
            Some(&student),
            Some(json!({ "status": "resolved" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/complaints/{id}/status"),
            Some(&authority),
            Some(json!({ "status": "in-progress" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Backwards moves are conflicts, unknown statuses are validation
    // errors.
    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/complaints/{id}/status"),
            Some(&authority),
            Some(json!({ "status": "open" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/complaints/{id}/status"),
            Some(&authority),
            Some(json!({ "status": "escalated" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn students_see_only_their_own_complaints(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let (_, asha) = app.seed_user("2021cs042", "student").await;
    let (_, ravi) = app.seed_user("2022me007", "student").await;

    app.request(
        Method::POST,
        "/api/v1/complaints",
        Some(&asha),
        Some(json!({ "category": "mess", "description": "cold food" })),
    )
    .await;

    let (_, body) = app
        .request(Method::GET, "/api/v1/complaints", Some(&ravi), None)
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let (_, body) = app
        .request(Method::GET, "/api/v1/complaints", Some(&asha), None)
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Mess menus
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn mess_menu_upsert_is_admin_only(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let (_, student) = app.seed_user("2021cs042", "student").await;
    let (_, admin) = app.seed_user("admin01", "admin").await;

    let menu = json!({
        "hostelName": "Kaveri Hostel",
        "dayOfWeek": "monday",
        "breakfast": "idli, sambar",
        "lunch": "rice, rasam, curd",
        "snacks": "tea, biscuits",
        "dinner": "chapati, paneer"
    });

    let (status, _) = app
        .request(Method::PUT, "/api/v1/mess-menus", Some(&student), Some(menu.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request(Method::PUT, "/api/v1/mess-menus", Some(&admin), Some(menu))
        .await;
    assert_eq!(status, StatusCode::OK);

    let bad_day = json!({
        "hostelName": "Kaveri Hostel",
        "dayOfWeek": "funday",
        "breakfast": "-", "lunch": "-", "snacks": "-", "dinner": "-"
    });
    let (status, _) = app
        .request(Method::PUT, "/api/v1/mess-menus", Some(&admin), Some(bad_day))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Any authenticated resident can read the menu.
    let (status, body) = app
        .request(
            Method::GET,
            "/api/v1/mess-menus?hostelName=Kaveri%20Hostel",
            Some(&student),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn broadcasts_reach_the_role_and_direct_messages_one_user(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let (_, student) = app.seed_user("2021cs042", "student").await;
    let (_, other) = app.seed_user("2022me007", "student").await;
    let (_, admin) = app.seed_user("admin01", "admin").await;

    // Students cannot send.
    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/messages",
            Some(&student),
            Some(json!({ "recipientRole": "student", "subject": "x", "body": "y" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Broadcast to all students.
    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/messages",
            Some(&admin),
            Some(json!({
                "recipientRole": "student",
                "subject": "curfew",
                "body": "gates close at 22:00 tonight"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Direct message to one student.
    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/messages",
            Some(&admin),
            Some(json!({
                "recipientId": "2021cs042",
                "subject": "parcel",
                "body": "collect your parcel from the office"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let direct_id = body["data"]["id"].as_i64().unwrap();

    // Addressing both ways at once is invalid.
    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/messages",
            Some(&admin),
            Some(json!({
                "recipientId": "2021cs042",
                "recipientRole": "student",
                "subject": "x",
                "body": "y"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Asha sees broadcast + direct; the other student only the broadcast.
    let (_, body) = app
        .request(Method::GET, "/api/v1/messages", Some(&student), None)
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, body) = app
        .request(Method::GET, "/api/v1/messages", Some(&other), None)
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Only an addressee can mark a message read.
    let (status, _) = app
        .request(
            Method::POST,
            &format!("/api/v1/messages/{direct_id}/read"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .request(
            Method::POST,
            &format!("/api/v1/messages/{direct_id}/read"),
            Some(&student),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["read"], true);
}

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn fee_records_are_admin_written_and_student_scoped(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let (_, student) = app.seed_user("2021cs042", "student").await;
    let (_, admin) = app.seed_user("admin01", "admin").await;

    let fee = json!({
        "studentId": "2021cs042",
        "studentName": "Asha Rao",
        "hostelName": "Kaveri Hostel",
        "roomNumber": "B-214",
        "amountDue": 1250000,
        "dueDate": "2024-02-01"
    });

    let (status, _) = app
        .request(Method::POST, "/api/v1/fees", Some(&student), Some(fee.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .request(Method::POST, "/api/v1/fees", Some(&admin), Some(fee))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "due");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/fees/{id}/status"),
            Some(&admin),
            Some(json!({ "status": "paid" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "paid");

    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/fees/{id}/status"),
            Some(&admin),
            Some(json!({ "status": "waived" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The student sees their own record without filters.
    let (_, body) = app
        .request(Method::GET, "/api/v1/fees", Some(&student), None)
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Lost and found
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn lost_items_can_be_claimed_exactly_once(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let (_, student) = app.seed_user("2021cs042", "student").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/lost-found",
            Some(&student),
            Some(json!({
                "itemName": "blue water bottle",
                "description": "steel, dented near the cap",
                "location": "mess hall",
                "kind": "found"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "open");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/lost-found/{id}/claim"),
            Some(&student),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "claimed");

    // A second claim conflicts.
    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/api/v1/lost-found/{id}/claim"),
            Some(&student),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Kind filter is validated.
    let (status, _) = app
        .request(Method::GET, "/api/v1/lost-found?kind=stolen", Some(&student), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .request(Method::GET, "/api/v1/lost-found?kind=found", Some(&student), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

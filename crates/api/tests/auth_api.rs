//! Tests for registration, verification, login, and the credential
//! surfaces.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use hostelgate_db::repositories::UserRepo;

fn register_body(username: &str, role: &str, role_code: Option<&str>) -> serde_json::Value {
    json!({
        "username": username,
        "password": "letmein",
        "name": "Asha Rao",
        "role": role,
        "hostelName": "Netravati Girls Hostel",
        "roomNumber": "B-214",
        "email": format!("{username}@example.edu"),
        "roleCode": role_code,
    })
}

// ---------------------------------------------------------------------------
// Registration + verification + login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn register_verify_login_round_trip(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(register_body("2021cs042", "student", None)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "student");
    // Credentials never leak through the ordinary response shape.
    assert!(body["data"].get("password").is_none());
    let user_id = body["data"]["id"].as_i64().unwrap();

    // Login before verification is refused.
    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "2021cs042", "password": "letmein" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Mint a known code through the injected store and verify with it.
    let code = app.state.verification_codes.issue(user_id);
    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/verify-email",
            None,
            Some(json!({ "username": "2021cs042", "code": code })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["verified"], true);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "2021cs042", "password": "letmein" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = app
        .request(Method::GET, "/api/v1/auth/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "2021cs042");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_verification_code_is_rejected(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);

    let (_, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(register_body("2021cs042", "student", None)),
        )
        .await;
    let user_id = body["data"]["id"].as_i64().unwrap();
    let _code = app.state.verification_codes.issue(user_id);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/verify-email",
            None,
            Some(json!({ "username": "2021cs042", "code": "0000000" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_is_unauthorized(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    app.seed_user("2021cs042", "student").await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "2021cs042", "password": "guess" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_username_registration_conflicts(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(register_body("2021cs042", "student", None)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(register_body("2021cs042", "student", None)),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Role codes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn privileged_roles_require_the_shared_code(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);

    // No code, wrong code: refused.
    for code in [None, Some("wrong-code")] {
        let (status, _) = app
            .request(
                Method::POST,
                "/api/v1/auth/register",
                None,
                Some(register_body("admin01", "admin", code)),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    // Matching code: accepted.
    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(register_body("admin01", "admin", Some(common::TEST_ROLE_CODE))),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "admin");

    // Unknown roles never get past validation.
    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(register_body("w1", "warden", None)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Credential surfaces
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn devops_listing_exposes_cleartext_passwords_to_devops_only(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let (_, admin) = app.seed_user("admin01", "admin").await;
    let (_, devops) = app.seed_user("ops01", "devops").await;

    // Admin listing has no password column.
    let (status, body) = app
        .request(Method::GET, "/api/v1/admin/users", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let users = body["data"].as_array().unwrap();
    assert!(users.iter().all(|u| u.get("password").is_none()));

    // The devops surface returns the stored cleartext credentials.
    let (status, body) = app
        .request(Method::GET, "/api/v1/devops/users", Some(&devops), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let users = body["data"].as_array().unwrap();
    assert!(users.iter().any(|u| u["password"] == "letmein"));

    // Nobody else can reach it, not even admin.
    let (status, _) = app
        .request(Method::GET, "/api/v1/devops/users", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_can_delete_accounts(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let (student, _) = app.seed_user("2021cs042", "student").await;
    let (_, admin) = app.seed_user("admin01", "admin").await;

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/admin/users/{}", student.id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    assert!(UserRepo::find_by_id(&app.state.pool, student.id)
        .await
        .unwrap()
        .is_none());

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/admin/users/{}", student.id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

//! Shared helpers for API integration tests.
//!
//! Builds the full application router with the production middleware stack,
//! an in-memory ledger, and a log-only mailer, so tests exercise the same
//! request path production uses minus the external collaborators.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::util::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use hostelgate_api::auth::jwt::{generate_access_token, JwtConfig};
use hostelgate_api::auth::mailer::Mailer;
use hostelgate_api::auth::verification::VerificationCodes;
use hostelgate_api::config::{RoleCodes, ServerConfig};
use hostelgate_api::routes;
use hostelgate_api::state::AppState;
use hostelgate_db::models::user::{CreateUser, User};
use hostelgate_db::repositories::UserRepo;
use hostelgate_ledger::MemoryLedger;

/// Shared role code used for privileged registration in tests.
pub const TEST_ROLE_CODE: &str = "warden-code-123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
        role_codes: RoleCodes {
            admin: Some(TEST_ROLE_CODE.to_string()),
            authority: Some(TEST_ROLE_CODE.to_string()),
            send_off: Some(TEST_ROLE_CODE.to_string()),
            devops: Some(TEST_ROLE_CODE.to_string()),
        },
        verification_code_ttl_mins: 10,
        reconciliation_interval_secs: 60,
    }
}

/// A fully wired test application plus handles to its injected state.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub ledger: Arc<MemoryLedger>,
}

/// Build the full application router with all middleware layers, using the
/// given database pool and an in-memory ledger.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let ledger = Arc::new(MemoryLedger::new());
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
        ledger: ledger.clone(),
        verification_codes: Arc::new(VerificationCodes::new(10)),
        mailer: Arc::new(Mailer::disabled()),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    let router = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state.clone());

    TestApp {
        router,
        state,
        ledger,
    }
}

impl TestApp {
    /// Fire one request at the router and return (status, parsed JSON body).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, json)
    }

    /// Seed a verified user directly through the repository and mint an
    /// access token for them.
    pub async fn seed_user(&self, username: &str, role: &str) -> (User, String) {
        let user = UserRepo::create(
            &self.state.pool,
            &CreateUser {
                username: username.to_string(),
                password: "letmein".to_string(),
                name: format!("Test {role}"),
                role: role.to_string(),
                hostel_name: "Kaveri Hostel".to_string(),
                room_number: Some("B-214".to_string()),
                email: format!("{username}@example.edu"),
            },
        )
        .await
        .unwrap();
        UserRepo::mark_email_verified(&self.state.pool, user.id)
            .await
            .unwrap();

        let token =
            generate_access_token(user.id, username, role, &self.state.config.jwt).unwrap();
        (user, token)
    }
}

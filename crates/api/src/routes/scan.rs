use axum::routing::post;
use axum::Router;

use crate::handlers::scan;
use crate::state::AppState;

/// ```text
/// POST /verify     verify_scan (send-off/admin)
/// POST /confirm    confirm_scan (send-off/admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/verify", post(scan::verify_scan))
        .route("/confirm", post(scan::confirm_scan))
}

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::message;
use crate::state::AppState;

/// ```text
/// POST /              send_message (staff)
/// GET  /              inbox
/// POST /{id}/read     mark_read (recipient)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(message::inbox).post(message::send_message))
        .route("/{id}/read", post(message::mark_read))
}

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::complaint;
use crate::state::AppState;

/// ```text
/// POST  /               create_complaint
/// GET   /               list_complaints
/// PATCH /{id}/status    update_complaint_status (admin/authority)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(complaint::list_complaints).post(complaint::create_complaint),
        )
        .route("/{id}/status", patch(complaint::update_complaint_status))
}

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::fee;
use crate::state::AppState;

/// ```text
/// POST  /               create_fee (admin)
/// GET   /               list_fees
/// PATCH /{id}/status    update_fee_status (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fee::list_fees).post(fee::create_fee))
        .route("/{id}/status", patch(fee::update_fee_status))
}

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::lost_found;
use crate::state::AppState;

/// ```text
/// POST  /              create_item
/// GET   /              list_items
/// PATCH /{id}/claim    claim_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(lost_found::list_items).post(lost_found::create_item),
        )
        .route("/{id}/claim", patch(lost_found::claim_item))
}

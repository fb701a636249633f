use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::outpass;
use crate::state::AppState;

/// ```text
/// POST   /                 create_outpass
/// GET    /                 list_outpasses
/// DELETE /                 clear_outpasses (admin)
/// GET    /{id}             get_outpass
/// PATCH  /{id}/status      update_status (admin/authority)
/// GET    /{id}/qr          qr_payload
/// POST   /{id}/expire      force_expire (admin/send-off)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(outpass::create_outpass)
                .get(outpass::list_outpasses)
                .delete(outpass::clear_outpasses),
        )
        .route("/{id}", get(outpass::get_outpass))
        .route("/{id}/status", patch(outpass::update_status))
        .route("/{id}/qr", get(outpass::qr_payload))
        .route("/{id}/expire", post(outpass::force_expire))
}

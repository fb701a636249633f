use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::mess;
use crate::state::AppState;

/// ```text
/// GET    /        list_menus
/// PUT    /        upsert_menu (admin)
/// DELETE /{id}    delete_menu (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(mess::list_menus).put(mess::upsert_menu))
        .route("/{id}", delete(mess::delete_menu))
}

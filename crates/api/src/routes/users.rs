use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// ```text
/// GET    /admin/users         list_users (admin)
/// DELETE /admin/users/{id}    delete_user (admin)
/// GET    /devops/users        list_credentials (devops)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(users::list_users))
        .route("/admin/users/{id}", delete(users::delete_user))
        .route("/devops/users", get(users::list_credentials))
}

pub mod auth;
pub mod complaint;
pub mod fee;
pub mod health;
pub mod lost_found;
pub mod mess;
pub mod message;
pub mod outpass;
pub mod scan;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                    register (public)
/// /auth/verify-email                consume a verification code (public)
/// /auth/login                       login (public)
/// /auth/me                          own account (requires auth)
///
/// /outpasses                        list (auth), create (auth), bulk clear (admin)
/// /outpasses/{id}                   point lookup (owner or staff)
/// /outpasses/{id}/status            decide request (admin/authority, PATCH)
/// /outpasses/{id}/qr                QR payload of an approved pass
/// /outpasses/{id}/expire            force-expire (admin/send-off, POST)
///
/// /scan/verify                      evaluate a decoded QR (send-off/admin)
/// /scan/confirm                     push to ledger + move status (send-off/admin)
///
/// /mess-menus                       weekly menu (auth), upsert (admin, PUT)
/// /mess-menus/{id}                  delete one hostel-day (admin)
///
/// /complaints                       list (scoped), create
/// /complaints/{id}/status           advance lifecycle (admin/authority, PATCH)
///
/// /fees                             list (scoped), create (admin)
/// /fees/{id}/status                 set status (admin, PATCH)
///
/// /messages                         inbox (auth), send (staff)
/// /messages/{id}/read               mark read (recipient, POST)
///
/// /lost-found                       list, report
/// /lost-found/{id}/claim            close an open item (PATCH)
///
/// /admin/users                      list accounts (admin)
/// /admin/users/{id}                 delete account (admin)
/// /devops/users                     cleartext credential listing (devops)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/outpasses", outpass::router())
        .nest("/scan", scan::router())
        .nest("/mess-menus", mess::router())
        .nest("/complaints", complaint::router())
        .nest("/fees", fee::router())
        .nest("/messages", message::router())
        .nest("/lost-found", lost_found::router())
        .merge(users::router())
}

//! Liveness probe.

use axum::Json;
use serde_json::{json, Value};

/// GET /health
///
/// Returns 200 with a static body once the server is accepting requests.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

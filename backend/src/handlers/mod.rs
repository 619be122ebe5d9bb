pub mod auth;
pub mod blog;
pub mod follow;

use axum::Json;
use serde_json::{json, Value};

/// Root banner route, also used as a liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "message": "BlogServer is running" }))
}

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Liveness only; the record store is not contacted.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

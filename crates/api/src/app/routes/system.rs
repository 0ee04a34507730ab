use axum::Json;
use serde_json::{Value, json};

/// GET /health: unauthenticated liveness probe, outside the resource table.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

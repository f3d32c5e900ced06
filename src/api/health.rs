use axum::response::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// Liveness probe
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now(),
    }))
}

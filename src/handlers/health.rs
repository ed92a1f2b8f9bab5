use axum::Json;
use serde_json::{json, Value};

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "Health Chat AI Backend",
    }))
}

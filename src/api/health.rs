use axum::Json;
use serde_json::{json, Value};

/// Liveness probe. No database round-trip; a serving process answers.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "gym-catalog",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
/// Liveness descriptor.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": "AI Visibility Scanner",
        "status": "running"
    }))
}

/// GET /health
/// Reports whether a Gemini key is configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "gemini_configured": state.config.gemini_configured()
    }))
}

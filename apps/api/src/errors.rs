use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Everything past auth and body validation collapses to a 500; callers only
/// see the message text.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Misconfigured(String),

    #[error("Model call failed: {0}")]
    Upstream(String),

    #[error("Could not parse model output: {0}")]
    Parse(String),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Upstream(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, code) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            AppError::Misconfigured(msg) => {
                tracing::error!("Service misconfigured: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "MISCONFIGURED")
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream model error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR")
            }
            AppError::Parse(msg) => {
                tracing::error!("Model output parse error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "PARSE_ERROR")
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

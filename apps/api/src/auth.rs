//! Bearer token authentication middleware.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::errors::AppError;
use crate::state::AppState;

/// Strict check: the header must be exactly `Bearer <secret>`. No trimming,
/// no case folding, no alternative schemes.
pub fn is_authorized(header: Option<&str>, secret: &str) -> bool {
    match header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token == secret,
        None => false,
    }
}

/// Middleware guarding the scan endpoint. Runs before the body is read, so a
/// rejected request never reaches the model.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if !is_authorized(auth_header, &state.config.api_secret) {
        tracing::debug!("missing or invalid bearer token");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

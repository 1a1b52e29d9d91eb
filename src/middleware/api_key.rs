use crate::common::response::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects the request with 401 unless `X-API-Key` matches the configured secret.
/// With no secret configured every request passes.
pub async fn api_key_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(expected) = state.config.api_key.as_deref() {
        let provided = req
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());

        if provided != Some(expected) {
            warn!("Unauthorized access attempt due to invalid API Key.");
            return Err(ApiError::unauthorized("Unauthorized: Invalid API Key"));
        }
    }

    Ok(next.run(req).await)
}

use crate::state::AppState;
use axum::middleware;
use axum::routing::post;
use axum::Router;

pub mod dto;
pub mod error;
pub mod handler;
pub mod job;
pub mod model;
pub mod qualities;
pub mod selector;
pub mod service;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/download_youtube_data", post(handler::download_youtube_data))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::api_key::api_key_middleware,
        ))
}

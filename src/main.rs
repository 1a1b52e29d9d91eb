use crate::config::settings::AppConfig;
use crate::infrastructure::media::ffmpeg::FfmpegMuxer;
use crate::infrastructure::platform::ytdlp::YtDlpClient;
use crate::infrastructure::storage::ObjectStore;
use crate::infrastructure::storage::s3::S3Storage;
use crate::state::AppState;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app;
mod common;
mod config;
mod docs;
mod infrastructure;
mod middleware;
mod modules;
mod routes;
mod state;
#[cfg(test)]
mod testing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    info!("Starting server...");

    let config = AppConfig::new();

    let storage: Option<Arc<dyn ObjectStore>> = match &config.storage {
        Some(settings) => Some(Arc::new(S3Storage::new(settings))),
        None => {
            error!("Missing one or more AWS S3 environment variables! S3 operations will be disabled.");
            None
        }
    };

    if config.api_key.is_none() {
        info!("API_KEY not set; requests are accepted without an X-API-Key header");
    }

    let platform = Arc::new(YtDlpClient::new(&config.ytdlp_path)?);
    let muxer = Arc::new(FfmpegMuxer::new(&config.ffmpeg_path));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let state = AppState::new(config, storage, platform, muxer);
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

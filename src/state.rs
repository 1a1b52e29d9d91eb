use crate::config::settings::AppConfig;
use crate::infrastructure::media::Muxer;
use crate::infrastructure::platform::VideoPlatform;
use crate::infrastructure::storage::ObjectStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// `None` when S3 was not configured at start-up; every download then fails fast.
    pub storage: Option<Arc<dyn ObjectStore>>,
    pub platform: Arc<dyn VideoPlatform>,
    pub muxer: Arc<dyn Muxer>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        storage: Option<Arc<dyn ObjectStore>>,
        platform: Arc<dyn VideoPlatform>,
        muxer: Arc<dyn Muxer>,
    ) -> Self {
        Self {
            config,
            storage,
            platform,
            muxer,
        }
    }
}

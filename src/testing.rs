//! In-memory collaborators for pipeline and router tests.

use crate::config::settings::AppConfig;
use crate::infrastructure::media::{MuxError, Muxer};
use crate::infrastructure::platform::{PlatformError, VideoPlatform};
use crate::infrastructure::storage::{ObjectStore, StorageError, StorageResult};
use crate::modules::download::model::{StreamDescriptor, StreamKind, VideoSource};
use crate::state::AppState;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use time::{Date, Month};

fn stream(format_id: &str, kind: StreamKind, resolution: Option<&str>, bitrate: Option<&str>) -> StreamDescriptor {
    StreamDescriptor {
        format_id: format_id.to_string(),
        extension: "mp4".to_string(),
        resolution: resolution.map(str::to_string),
        bitrate: bitrate.map(str::to_string),
        kind,
        url: format!("https://media.example/{}", format_id),
        http_headers: BTreeMap::new(),
    }
}

pub fn progressive(format_id: &str, resolution: &str) -> StreamDescriptor {
    stream(format_id, StreamKind::Progressive, Some(resolution), Some("96kbps"))
}

pub fn video_only(format_id: &str, resolution: &str) -> StreamDescriptor {
    stream(format_id, StreamKind::VideoOnly, Some(resolution), None)
}

pub fn audio_only(format_id: &str, bitrate: &str) -> StreamDescriptor {
    stream(format_id, StreamKind::AudioOnly, None, Some(bitrate))
}

pub fn sample_video(streams: Vec<StreamDescriptor>) -> VideoSource {
    VideoSource {
        id: "abc123".to_string(),
        title: "Sample Video".to_string(),
        thumbnail_url: Some("https://i.ytimg.com/vi/abc123/hqdefault.jpg".to_string()),
        description: Some("A sample".to_string()),
        length_seconds: 212,
        views: 1_000,
        author: "Sample Channel".to_string(),
        publish_date: Date::from_calendar_date(2024, Month::March, 9).ok(),
        keywords: vec!["sample".to_string(), "video".to_string()],
        streams,
    }
}

#[derive(Default)]
pub struct FakePlatform {
    pub video: Option<VideoSource>,
    pub fail_downloads: bool,
    pub fetches: AtomicUsize,
    downloads: Mutex<Vec<String>>,
}

impl FakePlatform {
    pub fn with_video(video: VideoSource) -> Self {
        Self {
            video: Some(video),
            ..Self::default()
        }
    }

    pub fn downloaded(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoPlatform for FakePlatform {
    async fn fetch(&self, _url: &str) -> Result<VideoSource, PlatformError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.video
            .clone()
            .ok_or_else(|| PlatformError::Lookup("ERROR: Video unavailable".to_string()))
    }

    async fn download(&self, stream: &StreamDescriptor, dest: &Path) -> Result<(), PlatformError> {
        if self.fail_downloads {
            return Err(PlatformError::Http("HTTP status client error (403 Forbidden)".to_string()));
        }
        self.downloads.lock().unwrap().push(stream.format_id.clone());
        tokio::fs::write(dest, format!("stream-{}", stream.format_id)).await?;
        Ok(())
    }
}

#[derive(Default, Clone, Copy, PartialEq)]
enum MuxMode {
    #[default]
    Concat,
    Fail,
    /// Reports success without producing a file.
    Silent,
}

#[derive(Default)]
pub struct FakeMuxer {
    pub merges: AtomicUsize,
    mode: MuxMode,
}

impl FakeMuxer {
    pub fn failing() -> Self {
        Self {
            mode: MuxMode::Fail,
            ..Self::default()
        }
    }

    pub fn silent() -> Self {
        Self {
            mode: MuxMode::Silent,
            ..Self::default()
        }
    }
}

#[async_trait]
impl Muxer for FakeMuxer {
    async fn merge(&self, video: &Path, audio: &Path, output: &Path) -> Result<(), MuxError> {
        self.merges.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            MuxMode::Fail => Err(MuxError::Failed {
                status: "exit status: 1".to_string(),
                stderr: "Invalid data found when processing input".to_string(),
            }),
            MuxMode::Silent => Ok(()),
            MuxMode::Concat => {
                let mut merged = std::fs::read(video).map_err(MuxError::Spawn)?;
                merged.push(b'+');
                merged.extend(std::fs::read(audio).map_err(MuxError::Spawn)?);
                std::fs::write(output, merged).map_err(MuxError::Spawn)?;
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub key: String,
    pub file_name: String,
    pub contents: Vec<u8>,
    /// Files present next to the uploaded one, sorted.
    pub siblings: Vec<String>,
}

#[derive(Default)]
pub struct FakeStore {
    fail: bool,
    uploads: Mutex<Vec<RecordedUpload>>,
    expiries: Mutex<Vec<Duration>>,
}

impl FakeStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn expiries(&self) -> Vec<Duration> {
        self.expiries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    fn bucket(&self) -> &str {
        "test-bucket"
    }

    async fn upload_file(&self, key: &str, path: &Path, _content_type: &str) -> StorageResult<()> {
        if self.fail {
            return Err(StorageError::UploadFailed("AccessDenied".to_string()));
        }
        let mut siblings: Vec<String> = std::fs::read_dir(path.parent().unwrap())?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        siblings.sort();

        self.uploads.lock().unwrap().push(RecordedUpload {
            key: key.to_string(),
            file_name: path.file_name().unwrap().to_string_lossy().into_owned(),
            contents: std::fs::read(path)?,
            siblings,
        });
        Ok(())
    }

    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        self.expiries.lock().unwrap().push(expires_in);
        Ok(format!("https://signed.example/{}?expires={}", key, expires_in.as_secs()))
    }
}

pub fn test_state(
    platform: Arc<FakePlatform>,
    store: Option<Arc<FakeStore>>,
    muxer: Arc<FakeMuxer>,
    api_key: Option<&str>,
    tmp_dir: &Path,
) -> AppState {
    let mut config = AppConfig::from_lookup(|_| None);
    config.api_key = api_key.map(str::to_string);
    config.download_tmp_dir = tmp_dir.to_path_buf();

    AppState::new(
        config,
        store.map(|s| s as Arc<dyn ObjectStore>),
        platform,
        muxer,
    )
}

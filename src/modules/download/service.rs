use super::dto::VideoDataResponse;
use super::error::PipelineError;
use super::job::DownloadJob;
use super::model::VideoSource;
use super::qualities::available_qualities;
use super::selector::{select_streams, StreamSelection};
use crate::infrastructure::storage::ObjectStore;
use crate::state::AppState;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::info;

/// Validity window of the returned download link.
pub const DOWNLOAD_LINK_TTL: Duration = Duration::from_secs(3600);
pub const OBJECT_KEY_PREFIX: &str = "youtube_downloads";

static TITLE_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid title pattern"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

pub fn sanitize_title(title: &str) -> String {
    let stripped = TITLE_STRIP.replace_all(title, "");
    WHITESPACE.replace_all(&stripped, "_").into_owned()
}

pub fn object_key(title: &str, video_id: &str) -> String {
    format!("{}/{}_{}.mp4", OBJECT_KEY_PREFIX, sanitize_title(title), video_id)
}

pub struct DownloadService;

impl DownloadService {
    /// Runs the whole pipeline for one URL. The scratch directory is gone when this returns.
    pub async fn process(state: &AppState, youtube_url: &str) -> Result<VideoDataResponse, PipelineError> {
        let storage = state
            .storage
            .as_deref()
            .ok_or(PipelineError::StorageUnavailable)?;

        let video = state.platform.fetch(youtube_url).await?;
        let key = object_key(&video.title, &video.id);
        info!("Attempting to download for S3 object key: {}", key);

        let job = DownloadJob::new(&state.config.download_tmp_dir)?;
        let outcome = Self::run_job(state, storage, &video, &job, &key).await;
        job.cleanup();
        let download_link = outcome?;

        Ok(VideoDataResponse::new(
            &video,
            available_qualities(&video.streams),
            download_link,
        ))
    }

    async fn run_job(
        state: &AppState,
        storage: &dyn ObjectStore,
        video: &VideoSource,
        job: &DownloadJob,
        key: &str,
    ) -> Result<String, PipelineError> {
        let local_file = Self::fetch_media(state, video, job).await?;

        if !tokio::fs::try_exists(&local_file).await.unwrap_or(false) {
            return Err(PipelineError::MissingOutput);
        }

        info!(
            "Uploading {} to S3 bucket {} as {}",
            file_name(&local_file),
            storage.bucket(),
            key
        );
        storage.upload_file(key, &local_file, "video/mp4").await?;
        info!("Upload complete.");

        let link = storage.presigned_get_url(key, DOWNLOAD_LINK_TTL).await?;
        info!("Generated pre-signed URL successfully.");

        Ok(link)
    }

    /// Downloads the selected stream(s) into the job directory and returns the file to upload.
    async fn fetch_media(
        state: &AppState,
        video: &VideoSource,
        job: &DownloadJob,
    ) -> Result<PathBuf, PipelineError> {
        match select_streams(&video.streams)? {
            StreamSelection::Progressive(stream) => {
                info!(
                    "Downloading combined stream ({})...",
                    stream.resolution.as_deref().unwrap_or("unknown")
                );
                let target = job.file(&format!("{}_combined.mp4", video.id));
                state
                    .platform
                    .download(stream, &target)
                    .await
                    .map_err(PipelineError::Download)?;
                Ok(target)
            }
            StreamSelection::Split { video: video_stream, audio } => {
                info!("Falling back to separate video/audio download for higher quality (requires FFmpeg).");
                let video_file = job.file(&format!("{}_video.mp4", video.id));
                let audio_file = job.file(&format!("{}_audio.mp4", video.id));
                let merged_file = job.file(&format!("{}_merged.mp4", video.id));

                info!("Downloading video stream to: {}", file_name(&video_file));
                state
                    .platform
                    .download(video_stream, &video_file)
                    .await
                    .map_err(PipelineError::Download)?;
                info!("Downloading audio stream to: {}", file_name(&audio_file));
                state
                    .platform
                    .download(audio, &audio_file)
                    .await
                    .map_err(PipelineError::Download)?;

                info!("Merging video and audio with FFmpeg to: {}", file_name(&merged_file));
                state.muxer.merge(&video_file, &audio_file, &merged_file).await?;

                tokio::fs::remove_file(&video_file).await?;
                tokio::fs::remove_file(&audio_file).await?;
                info!("Temporary video and audio files removed after merging.");

                Ok(merged_file)
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

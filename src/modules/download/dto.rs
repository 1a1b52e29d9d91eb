use super::model::VideoSource;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;
use validator::Validate;

pub static YOUTUBE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?(youtube|youtu|youtube-nocookie)\.(com|be)/.+")
        .expect("valid YouTube URL pattern")
});

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DownloadRequest {
    #[validate(regex(path = *YOUTUBE_URL, message = "Invalid YouTube URL format."))]
    #[schema(example = "https://www.youtube.com/watch?v=dQw4w9WgXcQ")]
    pub youtube_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VideoDataResponse {
    pub video_title: String,
    pub video_thumbnail_url: Option<String>,
    pub video_description: Option<String>,
    pub video_length_seconds: u64,
    pub video_views: u64,
    pub author: String,
    pub publish_date: String,
    pub keywords: Vec<String>,
    pub available_qualities: Vec<String>,
    pub download_link: String,
}

impl VideoDataResponse {
    pub fn new(video: &VideoSource, available_qualities: Vec<String>, download_link: String) -> Self {
        Self {
            video_title: video.title.clone(),
            video_thumbnail_url: video.thumbnail_url.clone(),
            video_description: video.description.clone(),
            video_length_seconds: video.length_seconds,
            video_views: video.views,
            author: video.author.clone(),
            publish_date: video.publish_date_label(),
            keywords: video.keywords.clone(),
            available_qualities,
            download_link,
        }
    }
}

use super::{BROWSER_USER_AGENT, PlatformError, VideoPlatform};
use crate::modules::download::model::{StreamDescriptor, StreamKind, VideoSource};
use async_trait::async_trait;
use futures_util::StreamExt;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Stdio;
use std::sync::LazyLock;
use std::time::Duration;
use time::{Date, Month};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

pub const LOOKUP_TIMEOUT_SECS: u64 = 120;

static QUALITY_NOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)p").expect("valid quality note pattern"));

/// Metadata lookups go through the `yt-dlp` binary; stream bodies are fetched
/// directly over HTTP with the headers yt-dlp reports for each format.
pub struct YtDlpClient {
    binary: String,
    http: reqwest::Client,
}

impl YtDlpClient {
    pub fn new(binary: &str) -> Result<Self, PlatformError> {
        let http = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|e| PlatformError::Http(e.to_string()))?;

        Ok(Self {
            binary: binary.to_string(),
            http,
        })
    }
}

#[async_trait]
impl VideoPlatform for YtDlpClient {
    async fn fetch(&self, url: &str) -> Result<VideoSource, PlatformError> {
        let mut command = Command::new(&self.binary);
        command
            .args([
                "--dump-json",
                "--no-playlist",
                "--no-warnings",
                "--user-agent",
                BROWSER_USER_AGENT,
                "--",
            ])
            .arg(url)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        debug!("Running {} --dump-json for {}", self.binary, url);

        let output = timeout(Duration::from_secs(LOOKUP_TIMEOUT_SECS), command.output())
            .await
            .map_err(|_| PlatformError::Timeout(LOOKUP_TIMEOUT_SECS))?
            .map_err(PlatformError::Spawn)?;

        if !output.status.success() {
            return Err(PlatformError::Lookup(last_stderr_line(&output.stderr)));
        }

        parse_video(&output.stdout)
    }

    async fn download(&self, stream: &StreamDescriptor, dest: &Path) -> Result<(), PlatformError> {
        let response = self
            .http
            .get(&stream.url)
            .headers(header_map(&stream.http_headers))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| PlatformError::Http(e.to_string()))?;

        let mut file = tokio::fs::File::create(dest).await?;
        let mut body = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| PlatformError::Http(e.to_string()))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        info!(
            format_id = %stream.format_id,
            bytes = written,
            "Downloaded stream to {}",
            dest.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
        );

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RawVideo {
    id: String,
    title: String,
    thumbnail: Option<String>,
    description: Option<String>,
    duration: Option<f64>,
    view_count: Option<u64>,
    uploader: Option<String>,
    channel: Option<String>,
    upload_date: Option<String>,
    tags: Option<Vec<String>>,
    #[serde(default)]
    formats: Vec<RawFormat>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    format_id: String,
    ext: String,
    url: Option<String>,
    protocol: Option<String>,
    vcodec: Option<String>,
    acodec: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    format_note: Option<String>,
    abr: Option<f64>,
    http_headers: Option<BTreeMap<String, String>>,
}

fn parse_video(stdout: &[u8]) -> Result<VideoSource, PlatformError> {
    let raw: RawVideo =
        serde_json::from_slice(stdout).map_err(|e| PlatformError::Parse(e.to_string()))?;

    let streams = raw.formats.into_iter().filter_map(to_stream).collect();

    Ok(VideoSource {
        id: raw.id,
        title: raw.title,
        thumbnail_url: raw.thumbnail,
        description: raw.description,
        length_seconds: raw.duration.map(|d| d as u64).unwrap_or(0),
        views: raw.view_count.unwrap_or(0),
        author: raw.uploader.or(raw.channel).unwrap_or_else(|| "unknown".to_string()),
        publish_date: raw.upload_date.as_deref().and_then(parse_upload_date),
        keywords: raw.tags.unwrap_or_default(),
        streams,
    })
}

/// Only plain HTTP(S) formats can be fetched in one request; manifests and storyboards are dropped.
fn to_stream(format: RawFormat) -> Option<StreamDescriptor> {
    match format.protocol.as_deref() {
        Some("https") | Some("http") => {}
        _ => return None,
    }
    let url = format.url?;
    let kind = stream_kind(format.vcodec.as_deref(), format.acodec.as_deref())?;

    let resolution = match kind {
        StreamKind::AudioOnly => None,
        _ => quality_label(format.format_note.as_deref(), format.width, format.height),
    };
    let bitrate = match kind {
        StreamKind::VideoOnly => None,
        _ => format
            .abr
            .filter(|abr| *abr > 0.0)
            .map(|abr| format!("{}kbps", abr.round() as u32)),
    };

    // m4a is an mp4 container holding audio only
    let extension = if format.ext == "m4a" {
        "mp4".to_string()
    } else {
        format.ext
    };

    Some(StreamDescriptor {
        format_id: format.format_id,
        extension,
        resolution,
        bitrate,
        kind,
        url,
        http_headers: format.http_headers.unwrap_or_default(),
    })
}

/// YouTube's nominal label (`"1080p"`) names the short side, so vertical
/// videos keep the same labels as landscape ones. The frame rate suffix of
/// `"1080p60"` is dropped.
fn quality_label(note: Option<&str>, width: Option<u32>, height: Option<u32>) -> Option<String> {
    if let Some(caps) = note.and_then(|n| QUALITY_NOTE.captures(n)) {
        return Some(format!("{}p", &caps[1]));
    }
    let short_side = match (width, height) {
        (Some(w), Some(h)) => w.min(h),
        (None, Some(h)) => h,
        (Some(w), None) => w,
        (None, None) => return None,
    };
    Some(format!("{}p", short_side))
}

fn stream_kind(vcodec: Option<&str>, acodec: Option<&str>) -> Option<StreamKind> {
    let has_video = vcodec.is_some_and(|v| v != "none");
    let has_audio = acodec.is_some_and(|a| a != "none");

    match (has_video, has_audio) {
        (true, true) => Some(StreamKind::Progressive),
        (true, false) => Some(StreamKind::VideoOnly),
        (false, true) => Some(StreamKind::AudioOnly),
        (false, false) => None,
    }
}

/// yt-dlp reports `YYYYMMDD`.
fn parse_upload_date(raw: &str) -> Option<Date> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = raw[0..4].parse().ok()?;
    let month: u8 = raw[4..6].parse().ok()?;
    let day: u8 = raw[6..8].parse().ok()?;

    Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()
}

/// The client already sends the browser user agent, so the per-format one is skipped.
fn header_map(headers: &BTreeMap<String, String>) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| !name.eq_ignore_ascii_case("user-agent"))
        .filter_map(|(name, value)| {
            Some((
                HeaderName::from_bytes(name.as_bytes()).ok()?,
                HeaderValue::from_str(value).ok()?,
            ))
        })
        .collect()
}

fn last_stderr_line(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .next_back()
        .unwrap_or("yt-dlp exited with an error")
        .to_string()
}

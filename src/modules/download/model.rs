use std::collections::BTreeMap;
use time::Date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// Audio and video in one file.
    Progressive,
    VideoOnly,
    AudioOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamDescriptor {
    pub format_id: String,
    /// Container extension, e.g. `mp4` or `webm`.
    pub extension: String,
    /// e.g. `720p`
    pub resolution: Option<String>,
    /// e.g. `128kbps`
    pub bitrate: Option<String>,
    pub kind: StreamKind,
    pub url: String,
    pub http_headers: BTreeMap<String, String>,
}

impl StreamDescriptor {
    pub fn is_progressive(&self) -> bool {
        self.kind == StreamKind::Progressive
    }

    pub fn is_video_only(&self) -> bool {
        self.kind == StreamKind::VideoOnly
    }

    pub fn is_audio_only(&self) -> bool {
        self.kind == StreamKind::AudioOnly
    }

    pub fn is_mp4(&self) -> bool {
        self.extension == "mp4"
    }

    /// `"1080p"` -> `1080`
    pub fn resolution_value(&self) -> Option<u32> {
        self.resolution
            .as_deref()
            .and_then(|res| res.trim_end_matches(|c: char| c.is_ascii_alphabetic()).parse().ok())
    }

    /// `"128kbps"` -> `128`
    pub fn bitrate_value(&self) -> Option<u32> {
        self.bitrate.as_deref().and_then(first_number)
    }
}

#[derive(Debug, Clone)]
pub struct VideoSource {
    pub id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub length_seconds: u64,
    pub views: u64,
    pub author: String,
    pub publish_date: Option<Date>,
    pub keywords: Vec<String>,
    pub streams: Vec<StreamDescriptor>,
}

impl VideoSource {
    /// Rendered as a midnight timestamp, or `"None"` when the platform has no date.
    pub fn publish_date_label(&self) -> String {
        match self.publish_date {
            Some(date) => format!("{} 00:00:00", date),
            None => "None".to_string(),
        }
    }
}

/// First run of ASCII digits in `text`.
pub fn first_number(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

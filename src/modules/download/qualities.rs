use super::model::{first_number, StreamDescriptor, StreamKind};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// Declaration order is sort order: combined ranks above video-only, which ranks above audio-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum QualityKind {
    AudioOnly,
    VideoOnly,
    Combined,
}

impl QualityKind {
    fn suffix(&self) -> &'static str {
        match self {
            QualityKind::Combined => "(combined)",
            QualityKind::VideoOnly => "(video only)",
            QualityKind::AudioOnly => "(audio only)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityLabel {
    pub value: u32,
    pub kind: QualityKind,
    pub text: String,
}

impl QualityLabel {
    pub fn new(text: &str, kind: QualityKind) -> Self {
        Self {
            value: first_number(text).unwrap_or(0),
            kind,
            text: text.to_string(),
        }
    }
}

impl Ord for QualityLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then(self.kind.cmp(&other.kind))
            .then_with(|| self.text.cmp(&other.text))
    }
}

impl PartialOrd for QualityLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.text, self.kind.suffix())
    }
}

/// Deduplicated mp4 quality labels, highest first.
pub fn available_qualities(streams: &[StreamDescriptor]) -> Vec<String> {
    let labels: BTreeSet<QualityLabel> = streams
        .iter()
        .filter(|s| s.is_mp4())
        .filter_map(|s| match s.kind {
            StreamKind::Progressive => s
                .resolution
                .as_deref()
                .map(|res| QualityLabel::new(res, QualityKind::Combined)),
            StreamKind::VideoOnly => s
                .resolution
                .as_deref()
                .map(|res| QualityLabel::new(res, QualityKind::VideoOnly)),
            StreamKind::AudioOnly => s
                .bitrate
                .as_deref()
                .map(|abr| QualityLabel::new(abr, QualityKind::AudioOnly)),
        })
        .collect();

    labels.iter().rev().map(ToString::to_string).collect()
}

use super::error::PipelineError;
use super::model::StreamDescriptor;

/// Progressive streams below this height are skipped in favour of a merged 1080p download.
pub const MIN_PROGRESSIVE_HEIGHT: u32 = 360;
pub const SPLIT_VIDEO_RESOLUTION: &str = "1080p";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StreamSelection<'a> {
    Progressive(&'a StreamDescriptor),
    Split {
        video: &'a StreamDescriptor,
        audio: &'a StreamDescriptor,
    },
}

pub fn select_streams(streams: &[StreamDescriptor]) -> Result<StreamSelection<'_>, PipelineError> {
    let best_progressive = streams
        .iter()
        .filter(|s| s.is_progressive() && s.is_mp4())
        .filter_map(|s| s.resolution_value().map(|height| (height, s)))
        .max_by_key(|(height, _)| *height);

    if let Some((height, stream)) = best_progressive {
        if height >= MIN_PROGRESSIVE_HEIGHT {
            return Ok(StreamSelection::Progressive(stream));
        }
    }

    let video = streams.iter().find(|s| {
        s.is_video_only() && s.is_mp4() && s.resolution.as_deref() == Some(SPLIT_VIDEO_RESOLUTION)
    });

    let audio = streams
        .iter()
        .filter(|s| s.is_audio_only() && s.is_mp4())
        .filter_map(|s| s.bitrate_value().map(|abr| (abr, s)))
        .max_by_key(|(abr, _)| *abr)
        .map(|(_, s)| s);

    match (video, audio) {
        (Some(video), Some(audio)) => Ok(StreamSelection::Split { video, audio }),
        _ => Err(PipelineError::NoSuitableStream),
    }
}

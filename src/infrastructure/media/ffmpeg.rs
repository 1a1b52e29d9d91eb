use super::{MuxError, Muxer};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{error, info};

const STDERR_TAIL_LINES: usize = 5;

pub struct FfmpegMuxer {
    binary: String,
}

impl FfmpegMuxer {
    pub fn new(binary: &str) -> Self {
        Self {
            binary: binary.to_string(),
        }
    }
}

/// Video is copied as-is, audio is encoded to AAC.
fn merge_args(video: &Path, audio: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-i".into(),
        video.into(),
        "-i".into(),
        audio.into(),
        "-c:v".into(),
        "copy".into(),
        "-c:a".into(),
        "aac".into(),
        output.into(),
    ]
}

#[async_trait]
impl Muxer for FfmpegMuxer {
    async fn merge(&self, video: &Path, audio: &Path, output: &Path) -> Result<(), MuxError> {
        let result = Command::new(&self.binary)
            .args(merge_args(video, audio, output))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(MuxError::Spawn)?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
            let tail = lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join("\n");
            error!("FFmpeg failed ({}):\n{}", result.status, tail);
            return Err(MuxError::Failed {
                status: result.status.to_string(),
                stderr: lines.last().copied().unwrap_or_default().to_string(),
            });
        }

        info!(
            "FFmpeg merged into {}",
            output.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_copies_video_and_encodes_audio() {
        let args = merge_args(
            Path::new("/tmp/x/abc_video.mp4"),
            Path::new("/tmp/x/abc_audio.mp4"),
            Path::new("/tmp/x/abc_merged.mp4"),
        );
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();

        assert_eq!(
            args,
            vec![
                "-y",
                "-i",
                "/tmp/x/abc_video.mp4",
                "-i",
                "/tmp/x/abc_audio.mp4",
                "-c:v",
                "copy",
                "-c:a",
                "aac",
                "/tmp/x/abc_merged.mp4",
            ]
        );
    }

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let muxer = FfmpegMuxer::new("/nonexistent/ffmpeg-binary");
        let dir = tempfile::tempdir().unwrap();

        let result = muxer
            .merge(&dir.path().join("v.mp4"), &dir.path().join("a.mp4"), &dir.path().join("o.mp4"))
            .await;

        assert!(matches!(result, Err(MuxError::Spawn(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_a_merge_failure() {
        let muxer = FfmpegMuxer::new("false");
        let dir = tempfile::tempdir().unwrap();

        let result = muxer
            .merge(&dir.path().join("v.mp4"), &dir.path().join("a.mp4"), &dir.path().join("o.mp4"))
            .await;

        match result {
            Err(MuxError::Failed { status, .. }) => assert!(status.contains('1'), "status was {status}"),
            other => panic!("expected a merge failure, got {other:?}"),
        }
    }
}

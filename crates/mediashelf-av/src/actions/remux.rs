//! Metadata-rewriting remux operations.

use crate::{tools, Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

/// Container metadata written during a remux.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemuxMetadata {
    /// Episode or movie title.
    pub title: String,
    /// Show name (episodes only).
    pub show: Option<String>,
    /// Episode number within the season (episodes only).
    pub episode_id: Option<u32>,
    /// Release year (movies only).
    pub year: Option<String>,
}

impl RemuxMetadata {
    /// Metadata for a TV episode.
    pub fn episode(title: impl Into<String>, show: impl Into<String>, episode_id: u32) -> Self {
        Self {
            title: title.into(),
            show: Some(show.into()),
            episode_id: Some(episode_id),
            year: None,
        }
    }

    /// Metadata for a movie.
    pub fn movie(title: impl Into<String>, year: Option<String>) -> Self {
        Self {
            title: title.into(),
            show: None,
            episode_id: None,
            year,
        }
    }

    /// Render as `key=value` pairs in ffmpeg `-metadata` order.
    pub fn pairs(&self) -> Vec<String> {
        let mut pairs = vec![format!("title={}", self.title)];
        if let Some(ref show) = self.show {
            pairs.push(format!("show={}", show));
        }
        if let Some(episode_id) = self.episode_id {
            pairs.push(format!("episode_id={}", episode_id));
        }
        if let Some(ref year) = self.year {
            pairs.push(format!("year={}", year));
        }
        pairs
    }
}

/// Something that can rewrite a media file's container metadata.
///
/// Implementations write the complete output to `output`; they never touch
/// `input`. Replacing the source is the caller's job (see
/// [`Workspace`](crate::Workspace)).
#[async_trait]
pub trait Remuxer: Send + Sync {
    /// Copy every stream of `input` into `output`, applying `metadata`.
    async fn remux(&self, input: &Path, output: &Path, metadata: &RemuxMetadata) -> Result<()>;
}

/// Remuxer backed by the ffmpeg command-line tool.
#[derive(Debug, Clone)]
pub struct FfmpegRemuxer {
    ffmpeg: PathBuf,
    timeout: Duration,
}

impl FfmpegRemuxer {
    /// Use an explicit ffmpeg binary.
    pub fn new(ffmpeg: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            timeout,
        }
    }

    /// Find ffmpeg, preferring a configured path over `PATH`.
    pub fn locate(configured: Option<&Path>, timeout: Duration) -> Result<Self> {
        let ffmpeg = tools::locate(tools::FFMPEG, configured)?;
        Ok(Self::new(ffmpeg, timeout))
    }

    /// Path of the ffmpeg binary in use.
    pub fn ffmpeg(&self) -> &Path {
        &self.ffmpeg
    }

    /// Build the argument vector for one remux.
    fn args(input: &Path, output: &Path, metadata: &RemuxMetadata) -> Vec<std::ffi::OsString> {
        let mut args: Vec<std::ffi::OsString> = vec![
            "-y".into(),
            "-loglevel".into(),
            "error".into(),
            "-i".into(),
            input.as_os_str().to_owned(),
            "-map".into(),
            "0".into(),
            "-c".into(),
            "copy".into(),
        ];
        for pair in metadata.pairs() {
            args.push("-metadata".into());
            args.push(pair.into());
        }
        args.push(output.as_os_str().to_owned());
        args
    }
}

#[async_trait]
impl Remuxer for FfmpegRemuxer {
    async fn remux(&self, input: &Path, output: &Path, metadata: &RemuxMetadata) -> Result<()> {
        if !input.exists() {
            return Err(Error::file_not_found(input));
        }

        tracing::debug!("Remuxing with ffmpeg: {:?} -> {:?}", input, output);

        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(Self::args(input, output, metadata))
            .stdin(std::process::Stdio::null())
            .kill_on_drop(true);

        let result = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(result) => result.map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found("ffmpeg")
                } else {
                    Error::Io(e)
                }
            })?,
            Err(_) => return Err(Error::timeout("ffmpeg", self.timeout)),
        };

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::tool_failed(
                "ffmpeg",
                format!("{} ({})", stderr.trim(), result.status),
            ));
        }

        tracing::info!("Remux complete: {:?}", output);
        Ok(())
    }
}

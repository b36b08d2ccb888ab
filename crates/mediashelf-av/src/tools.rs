//! Locating the external binaries the remuxer drives.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Name of the ffmpeg binary on `PATH`.
pub const FFMPEG: &str = "ffmpeg";

/// What we learned about an installed tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub path: PathBuf,
    /// First line of `-version` output, when the tool ran successfully.
    pub version: Option<String>,
}

impl ToolInfo {
    /// Whether the binary answered a version query.
    pub fn is_runnable(&self) -> bool {
        self.version.is_some()
    }
}

/// Resolve a tool binary.
///
/// A configured path wins when it exists; otherwise `PATH` is searched.
///
/// ```no_run
/// use mediashelf_av::tools::{locate, FFMPEG};
///
/// let ffmpeg = locate(FFMPEG, None)?;
/// # Ok::<(), mediashelf_av::Error>(())
/// ```
pub fn locate(name: &str, configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        tracing::warn!(
            tool = name,
            path = %path.display(),
            "Configured tool path does not exist, searching PATH"
        );
    }

    which::which(name).map_err(|_| Error::tool_not_found(name))
}

/// Ask the binary at `path` for its version.
pub fn inspect(path: &Path) -> ToolInfo {
    let version = Command::new(path)
        .arg("-version")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| {
            String::from_utf8_lossy(&out.stdout)
                .lines()
                .next()
                .map(|line| line.trim().to_string())
        });

    ToolInfo {
        path: path.to_path_buf(),
        version,
    }
}

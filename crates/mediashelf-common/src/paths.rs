//! Path utilities for detecting video files by extension.
//!
//! Only the four container extensions the library manager understands are
//! recognised. Matching is case-sensitive against the lowercase extension,
//! so `Episode.MKV` is not treated as a video file.

use std::path::Path;

/// Video file extensions that take part in classification and renaming.
const VIDEO_EXTENSIONS: &[&str] = &["mkv", "mov", "wmv", "mp4"];

/// Check if a path has a recognised video file extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use mediashelf_common::paths::is_video_file;
///
/// assert!(is_video_file(Path::new("movie.mkv")));
/// assert!(is_video_file(Path::new("/path/to/video.mp4")));
/// assert!(!is_video_file(Path::new("movie.avi")));
/// assert!(!is_video_file(Path::new("subtitle.srt")));
/// ```
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Return the extension of `path` with its leading dot, or an empty string.
///
/// ```
/// use std::path::Path;
/// use mediashelf_common::paths::dotted_extension;
///
/// assert_eq!(dotted_extension(Path::new("a.mkv")), ".mkv");
/// assert_eq!(dotted_extension(Path::new("README")), "");
/// ```
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

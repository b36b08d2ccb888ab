//! Directory classification by video file count.
//!
//! A directory with no video files is skipped, one video file is a movie,
//! and two or more are episodes of a series. The count is taken either from
//! the directory's immediate files or from its whole subtree, see
//! [`WalkDepth`].

use mediashelf_common::{paths::is_video_file, MediaKind};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How far the classifier looks when counting video files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkDepth {
    /// Only the directory's own files, the same set the processors rename.
    #[default]
    TopLevel,
    /// Every file in the subtree. Nested directories can push a directory
    /// into `Series` even though their files are never processed with it.
    Recursive,
}

impl WalkDepth {
    /// Map the `scan.recursive_classification` setting to a depth.
    pub fn from_recursive(recursive: bool) -> Self {
        if recursive {
            Self::Recursive
        } else {
            Self::TopLevel
        }
    }
}

/// Classifies directories as movie, series, or empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    depth: WalkDepth,
}

impl Classifier {
    pub fn new(depth: WalkDepth) -> Self {
        Self { depth }
    }

    /// Count qualifying video files under `dir`.
    ///
    /// Hidden files and hidden subdirectories are ignored at either depth,
    /// matching [`list_videos`].
    pub fn count_videos(&self, dir: &Path) -> usize {
        let walker = match self.depth {
            WalkDepth::TopLevel => WalkDir::new(dir).min_depth(1).max_depth(1),
            WalkDepth::Recursive => WalkDir::new(dir).min_depth(1),
        };

        walker
            .into_iter()
            .filter_entry(|e| !super::is_hidden(e.path()))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_video_file(e.path()))
            .count()
    }

    /// Classify `dir` by its video file count.
    pub fn classify(&self, dir: &Path) -> MediaKind {
        MediaKind::from_count(self.count_videos(dir))
    }
}

/// Immediate, non-hidden video files of `dir`, sorted by file name.
///
/// The position of a file in this list is its episode index.
pub fn list_videos(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if super::is_hidden(&path) || !is_video_file(&path) {
            continue;
        }
        files.push(path);
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

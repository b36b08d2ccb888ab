//! Library scanning.
//!
//! The walker enumerates every candidate directory below the library root;
//! the [`classifier`] decides what each one holds and the [`identifier`]
//! turns a series directory name into a search title and season.

pub mod classifier;
pub mod identifier;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

pub use classifier::{list_videos, Classifier, WalkDepth};
pub use identifier::SeriesIdentity;

/// Enumerates candidate media directories below a library root.
#[derive(Debug, Clone, Default)]
pub struct LibraryWalker {
    ignore: Vec<String>,
}

impl LibraryWalker {
    /// Create a walker that prunes directories whose name contains any of
    /// `ignore`.
    pub fn new(ignore: Vec<String>) -> Self {
        Self { ignore }
    }

    /// Every subdirectory of `root` at any depth, in sorted walk order.
    ///
    /// Hidden and ignored directories are skipped together with their
    /// subtrees. The root itself is never returned.
    pub fn walk(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            anyhow::bail!("Library root is not a directory: {:?}", root);
        }

        let mut dirs = Vec::new();
        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.file_type().is_dir() && !self.is_excluded(e));

        for entry in walker {
            let entry = entry.with_context(|| format!("Failed to walk {:?}", root))?;
            debug!(directory = %entry.path().display(), "Found candidate directory");
            dirs.push(entry.into_path());
        }

        Ok(dirs)
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        if is_hidden(entry.path()) {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        self.ignore.iter().any(|pattern| name.contains(pattern.as_str()))
    }
}

/// Whether the final path component starts with a dot.
pub(crate) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// File name of `path` as an owned string.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(root: &Path, dirs: &[PathBuf]) -> Vec<String> {
        dirs.iter()
            .map(|d| d.strip_prefix(root).unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_walk_recurses_sorted() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("Show/Season 2")).unwrap();
        fs::create_dir_all(root.path().join("Show/Season 1")).unwrap();
        fs::create_dir_all(root.path().join("Heat")).unwrap();
        fs::write(root.path().join("loose.mkv"), b"x").unwrap();

        let walker = LibraryWalker::default();
        let dirs = walker.walk(root.path()).unwrap();
        assert_eq!(
            names(root.path(), &dirs),
            vec!["Heat", "Show", "Show/Season 1", "Show/Season 2"]
        );
    }

    #[test]
    fn test_walk_skips_hidden_and_ignored() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join(".git/objects")).unwrap();
        fs::create_dir_all(root.path().join("librarymanager-venv/lib")).unwrap();
        fs::create_dir_all(root.path().join("Film")).unwrap();

        let walker = LibraryWalker::new(vec!["librarymanager".to_string()]);
        let dirs = walker.walk(root.path()).unwrap();
        assert_eq!(names(root.path(), &dirs), vec!["Film"]);
    }

    #[test]
    fn test_walk_empty_root() {
        let root = TempDir::new().unwrap();
        assert!(LibraryWalker::default().walk(root.path()).unwrap().is_empty());
    }

    #[test]
    fn test_walk_rejects_file_root() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("a.mkv");
        fs::write(&file, b"x").unwrap();
        assert!(LibraryWalker::default().walk(&file).is_err());
    }

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(Path::new("/lib/.cache")));
        assert!(!is_hidden(Path::new("/lib/Show")));
    }
}

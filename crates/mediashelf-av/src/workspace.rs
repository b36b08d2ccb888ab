//! Scoped output handling for in-place remuxing.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// Workspace for remuxing one file to a new name in the same directory.
///
/// The remux writes into a hidden temporary file next to the destination.
/// Nothing visible changes until [`finalize`](Self::finalize) is called:
/// the temporary output is atomically renamed onto the destination and only
/// then is the source removed. Dropping the workspace without finalizing
/// deletes the temporary output and leaves the source untouched.
///
/// A destination that already exists and is not the source itself is never
/// overwritten: [`new`](Self::new) refuses it up front and
/// [`finalize`](Self::finalize) refuses it if it appeared during the remux.
///
/// # Example
///
/// ```no_run
/// use mediashelf_av::Workspace;
///
/// let workspace = Workspace::new("/tv/Foo/a.mkv", "/tv/Foo/(Foo) [S1E1] Pilot.mkv")?;
/// // ... write the remuxed stream to workspace.output() ...
/// workspace.finalize()?;
/// # Ok::<(), mediashelf_av::Error>(())
/// ```
#[derive(Debug)]
pub struct Workspace {
    temp_path: TempPath,
    input_path: PathBuf,
    destination: PathBuf,
}

impl Workspace {
    /// Create a workspace that will turn `input` into `destination`.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(input: P, destination: Q) -> Result<Self> {
        let input = input.as_ref();
        let destination = destination.as_ref();

        if !input.is_file() {
            return Err(Error::file_not_found(input));
        }
        if destination != input && destination.exists() {
            return Err(Error::destination_exists(destination));
        }

        let dir = destination
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        // Keep the destination extension so ffmpeg picks the same muxer.
        let suffix = destination
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let temp_path = tempfile::Builder::new()
            .prefix(".mediashelf-")
            .suffix(&suffix)
            .tempfile_in(dir)
            .map_err(|e| Error::Workspace(format!("Failed to create temp output: {}", e)))?
            .into_temp_path();

        Ok(Self {
            temp_path,
            input_path: input.to_path_buf(),
            destination: destination.to_path_buf(),
        })
    }

    /// Get the input file path.
    pub fn input(&self) -> &Path {
        &self.input_path
    }

    /// Get the temporary output path the remux should write to.
    pub fn output(&self) -> &Path {
        &self.temp_path
    }

    /// Get the final destination path.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Whether finalizing will replace the source in place.
    pub fn replaces_input(&self) -> bool {
        self.input_path == self.destination
    }

    /// Move the output onto the destination, then remove the source.
    ///
    /// The source is deleted only when the output is non-empty, the rename
    /// succeeded, and the destination is a different path from the source.
    pub fn finalize(self) -> Result<PathBuf> {
        let size = std::fs::metadata(&self.temp_path)
            .map_err(|e| Error::Workspace(format!("Output file missing: {}", e)))?
            .len();
        if size == 0 {
            return Err(Error::Workspace(format!(
                "Remux produced an empty output for {:?}",
                self.input_path
            )));
        }

        let replaces_input = self.replaces_input();
        let Self {
            temp_path,
            input_path,
            destination,
        } = self;

        let persisted = if replaces_input {
            temp_path.persist(&destination)
        } else {
            temp_path.persist_noclobber(&destination)
        };
        persisted.map_err(|e| match e.error.kind() {
            std::io::ErrorKind::AlreadyExists => Error::destination_exists(&destination),
            _ => Error::Workspace(format!("Failed to move output to destination: {}", e.error)),
        })?;

        if !replaces_input {
            std::fs::remove_file(&input_path)?;
            tracing::debug!(source = %input_path.display(), "Removed original after remux");
        }

        Ok(destination)
    }

    /// Discard the output without touching the source.
    pub fn discard(self) {
        drop(self.temp_path);
    }
}

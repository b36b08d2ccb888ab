//! # mediashelf-av
//!
//! External media tool integration for mediashelf.
//!
//! This crate provides:
//! - Detection of the external tools the library manager shells out to
//! - Stream-copy remuxing through ffmpeg with rewritten container metadata
//! - A scoped [`Workspace`] that only replaces the source file once a remux
//!   has actually produced output
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//! use mediashelf_av::{FfmpegRemuxer, RemuxMetadata, Remuxer, Workspace};
//!
//! # async fn run() -> mediashelf_av::Result<()> {
//! let remuxer = FfmpegRemuxer::locate(None, Duration::from_secs(3600))?;
//! let workspace = Workspace::new("/tv/Foo/a.mkv", "/tv/Foo/(Foo) [S1E1] Pilot.mkv")?;
//! let metadata = RemuxMetadata::episode("Pilot", "Foo", 1);
//!
//! remuxer.remux(workspace.input(), workspace.output(), &metadata).await?;
//! workspace.finalize()?;
//! # Ok(())
//! # }
//! ```

mod error;
pub mod actions;
pub mod tools;
pub mod workspace;

// Re-exports
pub use actions::{FfmpegRemuxer, RemuxMetadata, Remuxer};
pub use error::{Error, Result};
pub use tools::ToolInfo;
pub use workspace::Workspace;

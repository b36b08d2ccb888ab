//! Mediashelf-Common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across mediashelf:
//!
//! - **Core Types**: run modes, ledger tables, and directory classifications
//! - **Path Utilities**: Functions to detect video files by extension
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use mediashelf_common::{RunMode, LedgerTable, Error, Result};
//! use mediashelf_common::paths::is_video_file;
//! use std::path::Path;
//!
//! let mode = RunMode::from_flags(true, false);
//! assert_eq!(mode, RunMode::Hash);
//! assert_eq!(LedgerTable::Series.table_name(), "tvhashes");
//!
//! assert!(is_video_file(Path::new("episode.mkv")));
//!
//! fn example() -> Result<()> {
//!     Err(Error::duplicate("tvhashes: a.mkv"))
//! }
//! ```

pub mod error;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use types::*;

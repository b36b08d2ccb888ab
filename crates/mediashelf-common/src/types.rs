//! Core type definitions for run modes, ledger tables, and directory kinds.
//!
//! All enums serialize in lowercase so they read naturally in config files
//! and log output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a library run does to each media file.
///
/// Exactly one mode is active per run. It is derived once from the command
/// line and passed by value into every processor call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Remux with corrected metadata, rename, and delete the originals.
    #[default]
    Rename,
    /// Everything `Rename` does, then record fingerprints in a freshly
    /// rebuilt ledger.
    Hash,
    /// Leave files untouched and compare their fingerprints against the
    /// ledger written by an earlier `Hash` run.
    Check,
}

impl RunMode {
    /// Build the mode from the two command-line switches.
    ///
    /// `check` takes precedence over `hash` when both are set.
    pub fn from_flags(hash: bool, check: bool) -> Self {
        match (hash, check) {
            (_, true) => Self::Check,
            (true, false) => Self::Hash,
            (false, false) => Self::Rename,
        }
    }

    /// Whether files are remuxed, renamed, and their originals removed.
    pub fn remuxes(self) -> bool {
        matches!(self, Self::Rename | Self::Hash)
    }

    /// Whether fingerprints are written to the ledger.
    pub fn records_fingerprints(self) -> bool {
        matches!(self, Self::Hash)
    }

    /// Whether fingerprints are compared against the ledger.
    pub fn verifies(self) -> bool {
        matches!(self, Self::Check)
    }

    /// Whether the run needs an open ledger at all.
    pub fn uses_ledger(self) -> bool {
        !matches!(self, Self::Rename)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rename => write!(f, "rename"),
            Self::Hash => write!(f, "hash"),
            Self::Check => write!(f, "check"),
        }
    }
}

/// One of the two independent fingerprint tables in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerTable {
    /// Episodes of TV series.
    Series,
    /// Single-file movies.
    Movies,
}

impl LedgerTable {
    /// Both tables, in a stable order.
    pub const ALL: [LedgerTable; 2] = [LedgerTable::Series, LedgerTable::Movies];

    /// SQL table name backing this ledger partition.
    pub fn table_name(self) -> &'static str {
        match self {
            Self::Series => "tvhashes",
            Self::Movies => "moviehashes",
        }
    }
}

impl fmt::Display for LedgerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Classification of a library directory by the number of video files it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// No video files; the directory is skipped.
    Empty,
    /// Exactly one video file.
    Movie,
    /// Two or more video files, treated as episodes of one season.
    Series,
}

impl MediaKind {
    /// Classify from a video file count.
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Self::Empty,
            1 => Self::Movie,
            _ => Self::Series,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Movie => write!(f, "movie"),
            Self::Series => write!(f, "series"),
        }
    }
}

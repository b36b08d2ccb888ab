//! Per-directory processing and whole-library runs.
//!
//! [`series`] and [`movie`] each handle one classified directory: look the
//! title up in the catalog, synthesize new filenames, then remux, record, or
//! verify each file according to the [`RunMode`]. [`run::LibraryRun`] walks
//! a library root and dispatches directories to them.

pub mod movie;
pub mod naming;
pub mod run;
pub mod series;

use std::path::{Path, PathBuf};

use mediashelf_av::{RemuxMetadata, Remuxer, Workspace};
use mediashelf_common::{LedgerTable, MediaKind, RunMode};
use mediashelf_db::queries::hashes;
use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::hasher;
use crate::metadata::{CatalogError, MetadataProvider};
use crate::scanner::file_name;

pub use movie::process_movie;
pub use run::{LibraryRun, RunSummary};
pub use series::process_series;

/// Why a directory or a single file could not be processed.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The catalog has no match for the title. The directory is skipped.
    #[error("{kind} '{}' not found (searched for '{title}')", .directory.display())]
    NotFound {
        kind: &'static str,
        directory: PathBuf,
        title: String,
    },

    /// More files than the catalog has episodes for the season.
    #[error(
        "season {season} of '{show}' lists {episodes} episodes, no episode for: {}",
        .unmatched.join(", ")
    )]
    SeasonMismatch {
        show: String,
        season: u32,
        episodes: usize,
        unmatched: Vec<String>,
    },

    /// Check mode found no fingerprint recorded for the file.
    #[error("no fingerprint recorded for '{filename}' in {table}")]
    LedgerMiss { table: LedgerTable, filename: String },

    /// Check mode found a different fingerprint than the one recorded.
    #[error("'{filename}' failed hash check (expected {expected}, found {actual})")]
    HashMismatch {
        filename: String,
        expected: String,
        actual: String,
    },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The remux did not produce a usable output. The source is untouched.
    #[error("remux of {path:?} failed: {source}")]
    Remux {
        path: PathBuf,
        #[source]
        source: mediashelf_av::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("ledger error: {0}")]
    Ledger(#[from] mediashelf_common::Error),
}

impl ProcessError {
    /// Whether this only means "skip the directory", not a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// What happened to one file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Remuxed under its new name (Rename mode).
    Renamed,
    /// Remuxed under its new name and fingerprinted (Hash mode).
    Recorded { fingerprint: String },
    /// Fingerprint matched the ledger (Check mode).
    Verified,
    /// This file failed; the rest of the directory carries on.
    Failed(ProcessError),
}

/// Result of processing one file.
#[derive(Debug)]
pub struct FileReport {
    /// Filename before processing.
    pub source: String,
    /// Synthesized filename.
    pub target: String,
    pub outcome: FileOutcome,
}

/// Result of processing one directory.
#[derive(Debug)]
pub struct DirectoryReport {
    pub directory: PathBuf,
    pub kind: MediaKind,
    pub files: Vec<FileReport>,
}

impl DirectoryReport {
    fn new(directory: &Path, kind: MediaKind) -> Self {
        Self {
            directory: directory.to_path_buf(),
            kind,
            files: Vec::new(),
        }
    }
}

/// Collaborators and mode shared by every directory of a run.
pub struct ProcessContext<'a> {
    pub mode: RunMode,
    pub catalog: &'a dyn MetadataProvider,
    /// Required when the mode remuxes.
    pub remuxer: Option<&'a dyn Remuxer>,
    /// Required when the mode uses the ledger. Scoped to one directory.
    pub ledger: Option<&'a Connection>,
}

impl ProcessContext<'_> {
    fn ledger(&self) -> Result<&Connection, ProcessError> {
        self.ledger.ok_or_else(|| {
            ProcessError::Ledger(mediashelf_common::Error::internal(format!(
                "{} mode requires an open ledger",
                self.mode
            )))
        })
    }

    fn remuxer(&self) -> Result<&dyn Remuxer, ProcessError> {
        self.remuxer.ok_or_else(|| ProcessError::Remux {
            path: PathBuf::new(),
            source: mediashelf_av::Error::tool_not_found("ffmpeg"),
        })
    }
}

/// One file paired with its new name and metadata.
#[derive(Debug, Clone)]
pub(crate) struct FileJob {
    pub source: PathBuf,
    pub target: String,
    pub metadata: RemuxMetadata,
}

impl FileJob {
    fn source_name(&self) -> String {
        file_name(&self.source)
    }

    fn destination(&self) -> PathBuf {
        self.source.with_file_name(&self.target)
    }
}

/// Apply the run mode to one file and report what happened.
pub(crate) async fn apply(job: &FileJob, table: LedgerTable, ctx: &ProcessContext<'_>) -> FileReport {
    let source = job.source_name();
    println!("{} -> {}", source, job.target);

    let outcome = match ctx.mode {
        RunMode::Rename => remux(job, ctx).await.map(|_| FileOutcome::Renamed),
        RunMode::Hash => record(job, table, ctx).await,
        RunMode::Check => verify(job, table, ctx),
    };

    let outcome = outcome.unwrap_or_else(|e| {
        warn!(file = %source, error = %e, "File processing failed");
        FileOutcome::Failed(e)
    });

    FileReport {
        source,
        target: job.target.clone(),
        outcome,
    }
}

/// Remux into a hidden temp file, then move it onto the new name.
async fn remux(job: &FileJob, ctx: &ProcessContext<'_>) -> Result<PathBuf, ProcessError> {
    let remuxer = ctx.remuxer()?;
    let remux_err = |source| ProcessError::Remux {
        path: job.source.clone(),
        source,
    };

    let workspace = Workspace::new(&job.source, job.destination()).map_err(remux_err)?;
    debug!(
        input = %workspace.input().display(),
        output = %workspace.output().display(),
        "Remuxing"
    );

    if let Err(e) = remuxer
        .remux(workspace.input(), workspace.output(), &job.metadata)
        .await
    {
        workspace.discard();
        return Err(remux_err(e));
    }

    let destination = workspace.finalize().map_err(remux_err)?;
    info!(file = %job.target, "Renamed");
    Ok(destination)
}

/// Remux, then fingerprint the renamed file and add it to the ledger.
async fn record(
    job: &FileJob,
    table: LedgerTable,
    ctx: &ProcessContext<'_>,
) -> Result<FileOutcome, ProcessError> {
    let conn = ctx.ledger()?;
    // A name already recorded by another directory is refused before the
    // file is touched.
    if hashes::lookup(conn, table, &job.target)?.is_some() {
        return Err(ProcessError::Ledger(mediashelf_common::Error::duplicate(
            format!("{}: {}", table, job.target),
        )));
    }
    let destination = remux(job, ctx).await?;

    println!("Hashing {}", job.target);
    let fingerprint = fingerprint(&destination)?;
    hashes::insert(conn, table, &job.target, &fingerprint)?;
    debug!(file = %job.target, %fingerprint, %table, "Recorded fingerprint");

    Ok(FileOutcome::Recorded { fingerprint })
}

/// Fingerprint the file as it is now and compare with the ledger.
fn verify(job: &FileJob, table: LedgerTable, ctx: &ProcessContext<'_>) -> Result<FileOutcome, ProcessError> {
    let conn = ctx.ledger()?;
    let filename = job.source_name();

    println!("Checking hash for {}", filename);
    let expected = hashes::lookup(conn, table, &filename)?.ok_or_else(|| {
        println!("{} has no recorded hash!", filename);
        ProcessError::LedgerMiss {
            table,
            filename: filename.clone(),
        }
    })?;
    let actual = fingerprint(&job.source)?;

    if actual == expected {
        println!("\t{} passed hash check!", filename);
        Ok(FileOutcome::Verified)
    } else {
        println!("{} failed hash check!", filename);
        Err(ProcessError::HashMismatch {
            filename,
            expected,
            actual,
        })
    }
}

fn fingerprint(path: &Path) -> Result<String, ProcessError> {
    hasher::fingerprint(path).map_err(|source| ProcessError::Io {
        path: path.to_path_buf(),
        source,
    })
}

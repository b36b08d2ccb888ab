//! Whole-library runs: walk, classify, dispatch, summarize.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mediashelf_av::Remuxer;
use mediashelf_common::{MediaKind, RunMode};
use mediashelf_db::pool::{get_conn, DbPool};
use mediashelf_db::queries::hashes;
use tracing::{error, info, warn};

use super::{
    process_movie, process_series, DirectoryReport, FileOutcome, ProcessContext, ProcessError,
};
use crate::config::ScanConfig;
use crate::metadata::MetadataProvider;
use crate::scanner::{Classifier, LibraryWalker, WalkDepth};

/// Counters for one library run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub directories_processed: usize,
    /// Empty directories and catalog misses.
    pub directories_skipped: usize,
    pub directories_failed: usize,
    pub files_renamed: usize,
    pub files_recorded: usize,
    pub files_failed: usize,
    pub checks_passed: usize,
    pub checks_failed: usize,
}

impl RunSummary {
    /// Fold one directory's report into the totals.
    pub fn add(&mut self, mode: RunMode, report: &DirectoryReport) {
        self.directories_processed += 1;
        for file in &report.files {
            match (&file.outcome, mode) {
                (FileOutcome::Renamed, _) => self.files_renamed += 1,
                (FileOutcome::Recorded { .. }, _) => {
                    self.files_renamed += 1;
                    self.files_recorded += 1;
                }
                (FileOutcome::Verified, _) => self.checks_passed += 1,
                (FileOutcome::Failed(_), RunMode::Check) => self.checks_failed += 1,
                (FileOutcome::Failed(_), _) => self.files_failed += 1,
            }
        }
    }

    /// Whether a Check run found any file that did not match the ledger.
    pub fn has_check_failures(&self) -> bool {
        self.checks_failed > 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} directories processed, {} skipped, {} failed; \
             {} files renamed, {} hashed, {} failed; \
             {} checks passed, {} failed",
            self.directories_processed,
            self.directories_skipped,
            self.directories_failed,
            self.files_renamed,
            self.files_recorded,
            self.files_failed,
            self.checks_passed,
            self.checks_failed
        )
    }
}

/// One pass over a media library in a single [`RunMode`].
pub struct LibraryRun {
    root: PathBuf,
    mode: RunMode,
    walker: LibraryWalker,
    classifier: Classifier,
    catalog: Box<dyn MetadataProvider>,
    remuxer: Option<Box<dyn Remuxer>>,
    ledger: Option<DbPool>,
}

impl LibraryRun {
    pub fn new(
        root: impl Into<PathBuf>,
        mode: RunMode,
        scan: &ScanConfig,
        catalog: Box<dyn MetadataProvider>,
    ) -> Self {
        Self {
            root: root.into(),
            mode,
            walker: LibraryWalker::new(scan.ignore.clone()),
            classifier: Classifier::new(WalkDepth::from_recursive(scan.recursive_classification)),
            catalog,
            remuxer: None,
            ledger: None,
        }
    }

    /// Remuxer used by `Rename` and `Hash` runs.
    pub fn with_remuxer(mut self, remuxer: Box<dyn Remuxer>) -> Self {
        self.remuxer = Some(remuxer);
        self
    }

    /// Ledger used by `Hash` and `Check` runs.
    pub fn with_ledger(mut self, pool: DbPool) -> Self {
        self.ledger = Some(pool);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate directories below the root, in processing order.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        self.walker.walk(&self.root)
    }

    /// Process `dirs` one at a time and return the totals.
    ///
    /// A `Hash` run rebuilds the ledger tables once before the first
    /// directory. Failures inside a directory are logged and counted; only
    /// setup problems (missing collaborators, ledger reset) end the run.
    pub async fn process(&self, dirs: &[PathBuf]) -> Result<RunSummary> {
        self.ensure_collaborators()?;

        if self.mode.records_fingerprints() {
            let pool = self.ledger.as_ref().context("ledger not open")?;
            let conn = get_conn(pool)?;
            hashes::reset_tables(&conn).context("Failed to reset ledger tables")?;
        }

        let mut summary = RunSummary::default();
        for dir in dirs {
            match self.process_directory(dir).await {
                Ok(Some(report)) => summary.add(self.mode, &report),
                Ok(None) => summary.directories_skipped += 1,
                Err(e) if e.is_not_found() => {
                    println!("{}", e);
                    warn!(directory = %dir.display(), "{}", e);
                    summary.directories_skipped += 1;
                }
                Err(e) => {
                    error!(directory = %dir.display(), error = %e, "Directory failed");
                    summary.directories_failed += 1;
                }
            }
        }

        info!(mode = %self.mode, "{}", summary);
        Ok(summary)
    }

    /// Discover and process the whole library.
    pub async fn run(&self) -> Result<RunSummary> {
        let dirs = self.discover()?;
        self.process(&dirs).await
    }

    /// Classify and dispatch one directory. `Ok(None)` means nothing to do.
    async fn process_directory(&self, dir: &Path) -> Result<Option<DirectoryReport>, ProcessError> {
        println!("{}", dir.display());

        let kind = self.classifier.classify(dir);
        if kind == MediaKind::Empty {
            return Ok(None);
        }
        info!(directory = %dir.display(), kind = ?kind, "Processing directory");

        // One connection per directory, returned to the pool on every exit path.
        let conn = match (&self.ledger, self.mode.uses_ledger()) {
            (Some(pool), true) => Some(get_conn(pool)?),
            _ => None,
        };

        let ctx = ProcessContext {
            mode: self.mode,
            catalog: self.catalog.as_ref(),
            remuxer: self.remuxer.as_deref(),
            ledger: conn.as_deref(),
        };

        let report = match kind {
            MediaKind::Series => process_series(dir, &ctx).await?,
            MediaKind::Movie => process_movie(dir, &ctx).await?,
            MediaKind::Empty => return Ok(None),
        };

        if report.files.is_empty() {
            return Ok(None);
        }
        Ok(Some(report))
    }

    fn ensure_collaborators(&self) -> Result<()> {
        if !self.catalog.is_available() {
            anyhow::bail!("Metadata provider '{}' is not configured", self.catalog.name());
        }
        if self.mode.remuxes() && self.remuxer.is_none() {
            anyhow::bail!("{} mode requires a remuxer", self.mode);
        }
        if self.mode.uses_ledger() && self.ledger.is_none() {
            anyhow::bail!("{} mode requires a ledger", self.mode);
        }
        Ok(())
    }
}

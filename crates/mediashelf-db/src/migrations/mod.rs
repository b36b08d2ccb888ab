//! Ledger schema versioning.
//!
//! The schema version lives in SQLite's `PRAGMA user_version`, so a ledger
//! written by an older tool (same tables, version 0) is adopted in place.
//! Each step is plain DDL embedded in the binary and applied in order.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration to version {version} failed: {source}")]
    Failed {
        version: u32,
        #[source]
        source: rusqlite::Error,
    },
}

/// DDL for both fingerprint tables. Also replayed by a ledger reset.
pub(crate) const LEDGER_TABLES_SQL: &str = include_str!("001_ledger.sql");

/// Schema steps; entry `i` upgrades version `i` to `i + 1`.
const STEPS: &[&str] = &[LEDGER_TABLES_SQL];

/// Version the ledger is at, `0` for a fresh or legacy file.
pub fn current_version(conn: &Connection) -> Result<u32, MigrationError> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Version this build writes.
pub fn latest_version() -> u32 {
    STEPS.len() as u32
}

/// Bring the schema up to [`latest_version`].
///
/// Every step runs in its own transaction together with the version bump.
/// Returns how many steps were applied.
pub fn run_migrations(conn: &Connection) -> Result<usize, MigrationError> {
    let from = current_version(conn)?;
    let mut applied = 0;

    for (index, sql) in STEPS.iter().enumerate().skip(from as usize) {
        let version = index as u32 + 1;
        let failed = |source| MigrationError::Failed { version, source };

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql).map_err(failed)?;
        tx.pragma_update(None, "user_version", version)
            .map_err(failed)?;
        tx.commit().map_err(failed)?;

        tracing::debug!(version, "Applied ledger schema step");
        applied += 1;
    }

    Ok(applied)
}

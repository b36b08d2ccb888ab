//! Fingerprint ledger queries.
//!
//! The ledger holds one `(filename, hash)` row per processed file in either
//! `tvhashes` or `moviehashes`. A hash run rebuilds both tables from scratch
//! with [`reset_tables`]; a check run only ever calls [`lookup`].

use mediashelf_common::{Error, LedgerTable, Result};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use crate::migrations::LEDGER_TABLES_SQL;
use crate::models::LedgerEntry;

/// Drop both fingerprint tables and recreate them empty.
///
/// Runs in a single transaction so a failure leaves the previous ledger intact.
pub fn reset_tables(conn: &Connection) -> Result<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| Error::database(e.to_string()))?;

    for table in LedgerTable::ALL {
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {}", table.table_name()))
            .map_err(|e| Error::database(e.to_string()))?;
    }
    tx.execute_batch(LEDGER_TABLES_SQL)
        .map_err(|e| Error::database(e.to_string()))?;

    tx.commit().map_err(|e| Error::database(e.to_string()))?;
    tracing::info!("Ledger tables reset");
    Ok(())
}

/// Record the fingerprint of `filename`.
///
/// A filename may appear at most once per table; a second insert for the same
/// name within one run returns [`Error::Duplicate`].
pub fn insert(conn: &Connection, table: LedgerTable, filename: &str, fingerprint: &str) -> Result<()> {
    let sql = format!(
        "INSERT INTO {} (filename, hash) VALUES (?1, ?2)",
        table.table_name()
    );

    match conn.execute(&sql, params![filename, fingerprint]) {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.code == ErrorCode::ConstraintViolation =>
        {
            Err(Error::duplicate(format!("{}: {}", table, filename)))
        }
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Look up the stored fingerprint of `filename`, if any.
pub fn lookup(conn: &Connection, table: LedgerTable, filename: &str) -> Result<Option<String>> {
    let sql = format!(
        "SELECT hash FROM {} WHERE filename = ?1",
        table.table_name()
    );

    conn.query_row(&sql, params![filename], |row| row.get::<_, String>(0))
        .optional()
        .map_err(|e| Error::database(e.to_string()))
}

/// List every row of a table, ordered by filename.
pub fn list(conn: &Connection, table: LedgerTable) -> Result<Vec<LedgerEntry>> {
    let sql = format!(
        "SELECT filename, hash FROM {} ORDER BY filename",
        table.table_name()
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| Error::database(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(LedgerEntry {
                table,
                filename: row.get(0)?,
                fingerprint: row.get(1)?,
            })
        })
        .map_err(|e| Error::database(e.to_string()))?;

    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| Error::database(e.to_string()))
}

/// Count the rows in a table.
pub fn count(conn: &Connection, table: LedgerTable) -> Result<usize> {
    let sql = format!("SELECT COUNT(*) FROM {}", table.table_name());

    conn.query_row(&sql, [], |row| row.get::<_, i64>(0))
        .map(|n| n as usize)
        .map_err(|e| Error::database(e.to_string()))
}

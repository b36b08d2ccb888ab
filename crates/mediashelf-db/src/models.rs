//! Rust models matching the ledger schema.

use mediashelf_common::LedgerTable;
use serde::{Deserialize, Serialize};

/// One row of a fingerprint table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Table the row lives in.
    pub table: LedgerTable,
    /// Bare filename (no directory component) the fingerprint was taken from.
    pub filename: String,
    /// Hex-encoded content fingerprint.
    pub fingerprint: String,
}

//! Database query modules.
//!
//! - hashes: fingerprint ledger reset, insert, and lookup
//!
//! Every value supplied by the caller is bound as a statement parameter.
//! Table names are interpolated only from the closed
//! [`LedgerTable`](mediashelf_common::LedgerTable) enum.

pub mod hashes;

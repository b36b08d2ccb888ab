//! Mediashelf-DB: fingerprint ledger schema, migrations, and queries
//!
//! This crate stores one content fingerprint per processed media file in
//! SQLite, using rusqlite with r2d2 connection pooling.
//!
//! # Modules
//!
//! - `migrations` - Ledger schema migrations
//! - `pool` - Connection pool management
//! - `models` - Rust models matching the ledger tables
//! - `queries` - Parameterized ledger operations
//!
//! # Example
//!
//! ```no_run
//! use mediashelf_common::LedgerTable;
//! use mediashelf_db::pool::{init_pool, get_conn};
//! use mediashelf_db::queries::hashes;
//!
//! let pool = init_pool("MediaLibrary.db").unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! hashes::insert(&conn, LedgerTable::Movies, "Heat.mkv", "9f86d081").unwrap();
//! let stored = hashes::lookup(&conn, LedgerTable::Movies, "Heat.mkv").unwrap();
//! assert_eq!(stored.as_deref(), Some("9f86d081"));
//! ```

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;

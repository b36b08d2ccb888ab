//! Error type shared by the ledger and the processors.

/// Failures reported by the ledger layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// SQLite or the connection pool failed.
    #[error("Database error: {0}")]
    Database(String),

    /// The filename already has a fingerprint in this table.
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A caller broke an invariant (e.g. asked for a ledger that was never opened).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn database<S: Into<String>>(msg: S) -> Self {
        Self::Database(msg.into())
    }

    pub fn duplicate<S: Into<String>>(msg: S) -> Self {
        Self::Duplicate(msg.into())
    }

    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for rn-source.

use thiserror::Error;

/// Errors raised while reading roads from storage.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid geometry: {0}")]
    Geometry(String),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Alias for `Result<T, SourceError>`.
pub type SourceResult<T> = Result<T, SourceError>;

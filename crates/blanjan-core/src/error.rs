//! Error types for blanjan-core

use thiserror::Error;

/// Result type alias using blanjan-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in blanjan-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// `SQLite` error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Item text was empty after trimming
    #[error("Item text cannot be empty")]
    EmptyText,
}

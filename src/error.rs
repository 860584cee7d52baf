//! Error types shared across the generator and its sinks.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type ForgeResult<T> = Result<T, ForgeError>;

#[derive(Error, Debug)]
pub enum ForgeError {
    /// A caller-supplied parameter was rejected before any work started.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A reference pool was loaded but contained no usable rows.
    #[error("reference pool '{0}' is empty")]
    EmptyPool(&'static str),

    /// A reference pool file could not be parsed.
    #[error("malformed pool file {file} (line {line}): {message}")]
    PoolFormat {
        file: String,
        line: usize,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

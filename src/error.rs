//! Crate-wide error type.
//!
//! Every failure is local and recoverable by the caller. The binary maps each
//! variant to a process exit code:
//!
//! - `2`: invalid input or arguments
//! - `3`: unknown shape id
//! - `4`: I/O or JSON failures during export/import

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Samples handed to the curve fit are unusable (too few, or non-finite).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Unknown shape id.
    #[error("shape not found: {id}")]
    NotFound { id: String },

    /// An argument outside its domain (`steps < 1`, unknown tag, duplicate id, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Error::NotFound { id: id.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Error::InvalidInput(_) | Error::InvalidArgument(_) => 2,
            Error::NotFound { .. } => 3,
            Error::Io { .. } | Error::Json(_) => 4,
        }
    }
}

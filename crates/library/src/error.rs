// FILE: crates/library/src/error.rs

use readtrack_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("'{prefix}' matches {count} books, use more of the id")]
    AmbiguousId { prefix: String, count: usize },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Value under '{0}' is not valid UTF-8")]
    NotText(String),

    #[error("Storage error for '{key}': {source}")]
    Storage {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LibraryError {
    /// True when the input was rejected and nothing changed
    pub fn is_rejection(&self) -> bool {
        match self {
            LibraryError::App(e) => e.is_validation(),
            LibraryError::BookNotFound(_) | LibraryError::AmbiguousId { .. } => true,
            _ => false,
        }
    }
}

// Both type aliases for convenience
pub type Result<T> = std::result::Result<T, LibraryError>;
pub type LibraryResult<T> = std::result::Result<T, LibraryError>;

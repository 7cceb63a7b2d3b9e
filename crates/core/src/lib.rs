//! Core domain model for ReadTrack
//!
//! Holds the [`Book`] entity with its reading calculations, the stored
//! [`BookRecord`] shape, catalog [`BookMetadata`] and the shared error type.

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, ErrorSeverity, RecoveryAction, Result};
pub use types::{
    parse_date, today, Book, BookDraft, BookId, BookMetadata, BookRecord, ReadingStats,
    ReadingTotals, Validator, DATE_FORMAT,
};

//! Error types and recovery strategies for ReadTrack
//!
//! Errors are classified into three severity tiers:
//! - **Recoverable**: The operation resolves itself (catalog lookups fall back to defaults)
//! - **Degraded**: The session continues with reduced guarantees (snapshot not saved)
//! - **Fatal**: Something ReadTrack cannot explain happened; the user has to look
//!
//! Each error carries a recovery action describing how callers are expected to react.

use std::fmt;
use thiserror::Error;

/// Recovery actions that can be taken when an error occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Substitute the fallback metadata record and continue
    UseFallback,
    /// Discard the unreadable snapshot and start from an empty list
    ResetToEmpty,
    /// Keep the in-memory list authoritative and warn the user
    KeepInMemory,
    /// Reject the submission and leave the list unchanged
    RejectInput,
    /// No automatic recovery - user intervention required
    UserIntervention,
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UseFallback => write!(f, "Using fallback metadata"),
            Self::ResetToEmpty => write!(f, "Starting with an empty reading list"),
            Self::KeepInMemory => write!(f, "Keeping unsaved changes in memory"),
            Self::RejectInput => write!(f, "Rejecting input"),
            Self::UserIntervention => write!(f, "User intervention required"),
        }
    }
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Error is resolved without the user noticing
    Recoverable,
    /// Session continues but something was lost or skipped
    Degraded,
    /// Critical error requiring user action
    Fatal,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recoverable => write!(f, "Recoverable"),
            Self::Degraded => write!(f, "Degraded"),
            Self::Fatal => write!(f, "Fatal"),
        }
    }
}

/// Main error type for ReadTrack
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Input Validation Errors =====
    /// A required field was empty
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A page count could not be parsed as a non-negative integer
    #[error("Invalid page number for {field}: '{value}'")]
    InvalidPageNumber { field: String, value: String },

    /// A date could not be parsed as YYYY-MM-DD
    #[error("Invalid date for {field}: '{value}'")]
    InvalidDate { field: String, value: String },

    /// Current page exceeds the known page count
    #[error("Current page {current_page} exceeds total pages {total_pages}")]
    PageOutOfRange { current_page: u32, total_pages: u32 },

    /// Invalid argument provided
    #[error("Invalid argument: {argument} - {reason}")]
    InvalidArgument { argument: String, reason: String },

    // ===== Catalog Errors =====
    /// Catalog service could not be reached
    #[error("Catalog '{provider}' unavailable: {reason}")]
    CatalogUnavailable { provider: String, reason: String },

    /// Catalog answered with something we could not read
    #[error("Invalid response from {provider}: {details}")]
    InvalidCatalogResponse { provider: String, details: String },

    // ===== Storage Errors =====
    /// Stored snapshot could not be decoded
    #[error("Snapshot '{key}' is corrupted: {reason}")]
    SnapshotCorrupted { key: String, reason: String },

    /// Snapshot could not be written
    #[error("Failed to write snapshot '{key}': {reason}")]
    StorageWriteFailed { key: String, reason: String },

    /// A record could not be encoded for storage
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl AppError {
    /// Returns the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CatalogUnavailable { .. } | Self::InvalidCatalogResponse { .. } => {
                ErrorSeverity::Recoverable
            }

            Self::InternalError { .. } => ErrorSeverity::Fatal,

            // Rejected input leaves the list untouched
            _ => ErrorSeverity::Degraded,
        }
    }

    /// Returns the recommended recovery action for this error
    pub fn recovery_action(&self) -> RecoveryAction {
        match self {
            Self::CatalogUnavailable { .. } | Self::InvalidCatalogResponse { .. } => {
                RecoveryAction::UseFallback
            }

            Self::SnapshotCorrupted { .. } => RecoveryAction::ResetToEmpty,

            Self::StorageWriteFailed { .. } => RecoveryAction::KeepInMemory,

            Self::MissingField { .. }
            | Self::InvalidPageNumber { .. }
            | Self::InvalidDate { .. }
            | Self::PageOutOfRange { .. }
            | Self::InvalidArgument { .. } => RecoveryAction::RejectInput,

            Self::InternalError { .. } => RecoveryAction::UserIntervention,
        }
    }

    /// Returns a user-friendly error message suitable for display
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingField { field } => {
                format!("Please fill in the {} field.", field)
            }
            Self::InvalidPageNumber { field, .. } => {
                format!("The {} must be a whole number.", field)
            }
            Self::InvalidDate { .. } => "Dates must be written as YYYY-MM-DD.".to_string(),
            Self::PageOutOfRange { .. } => {
                "Current page cannot be greater than total pages.".to_string()
            }
            Self::InvalidArgument { .. } => "Invalid input provided.".to_string(),

            Self::CatalogUnavailable { provider, .. } => {
                format!("{} is currently unavailable. Book details were left blank.", provider)
            }
            Self::InvalidCatalogResponse { .. } => {
                "Received invalid data from the catalog. Book details were left blank.".to_string()
            }

            Self::SnapshotCorrupted { .. } => {
                "Your saved reading list could not be read. Starting with an empty list."
                    .to_string()
            }
            Self::StorageWriteFailed { .. } => {
                "Your reading list could not be saved. Changes are kept for this session only."
                    .to_string()
            }

            Self::InternalError { .. } => {
                "An unexpected error occurred. Please try again.".to_string()
            }
        }
    }

    /// Returns true if this error should be logged at ERROR level
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Fatal
    }

    /// Returns true if this error rejects user input rather than a system failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::InvalidPageNumber { .. }
                | Self::InvalidDate { .. }
                | Self::PageOutOfRange { .. }
                | Self::InvalidArgument { .. }
        )
    }

    /// Helper to create a missing-field error
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;

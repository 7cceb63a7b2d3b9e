// FILE: crates/catalog/src/lib.rs

//! Book metadata lookup against an external catalog
//!
//! [`MetadataEnricher`] is the entry point: it asks a [`CatalogSource`] for
//! the best match and always hands back a [`readtrack_core::BookMetadata`],
//! substituting the fallback record when anything goes wrong.

mod enricher;
mod google_books;
mod offline;
mod traits;
mod volume;

pub use enricher::MetadataEnricher;
pub use google_books::GoogleBooksSource;
pub use offline::OfflineSource;
use readtrack_core::AppError;
use std::fmt;
pub use traits::{CatalogQuery, CatalogSource, SourceMetadata};
pub use volume::{
    parse_publish_year, parse_volumes_response, ImageLinks, IndustryIdentifier, VolumeInfo,
};

/// Result type for catalog source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors from catalog sources
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// Transport failure or non-success HTTP status
    NetworkError(String),
    /// Response body was not the expected shape
    ParseError(String),
    /// Query had nothing to search for
    InvalidQuery(String),
    /// HTTP 429
    RateLimited,
    /// Source cannot be used (no client, disabled)
    Unavailable(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::NetworkError(e) => write!(f, "Network error: {}", e),
            SourceError::ParseError(e) => write!(f, "Parse error: {}", e),
            SourceError::InvalidQuery(e) => write!(f, "Invalid query: {}", e),
            SourceError::RateLimited => write!(f, "Rate limited"),
            SourceError::Unavailable(e) => write!(f, "Source unavailable: {}", e),
        }
    }
}

impl std::error::Error for SourceError {}

impl SourceError {
    /// Classifies a failed lookup against `provider` for the core error model
    pub fn into_app_error(self, provider: &str) -> AppError {
        match self {
            SourceError::ParseError(details) => AppError::InvalidCatalogResponse {
                provider: provider.to_string(),
                details,
            },
            other => AppError::CatalogUnavailable {
                provider: provider.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(SourceError::RateLimited.to_string(), "Rate limited");
        assert!(SourceError::ParseError("bad json".to_string())
            .to_string()
            .contains("bad json"));
    }

    #[test]
    fn test_failures_classify_as_fallback() {
        use readtrack_core::RecoveryAction;

        let parse = SourceError::ParseError("truncated".to_string()).into_app_error("Google Books");
        assert!(matches!(parse, AppError::InvalidCatalogResponse { .. }));

        let limited = SourceError::RateLimited.into_app_error("Google Books");
        assert_eq!(
            limited.to_string(),
            "Catalog 'Google Books' unavailable: Rate limited"
        );

        for err in [parse, limited] {
            assert_eq!(err.recovery_action(), RecoveryAction::UseFallback);
        }
    }

    #[test]
    fn test_all_sources_exported() {
        let _ = OfflineSource::new();
        let _ = GoogleBooksSource::new();
        let _ = MetadataEnricher::offline();
    }
}

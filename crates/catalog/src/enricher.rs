// FILE: crates/catalog/src/enricher.rs

use crate::{CatalogQuery, CatalogSource, GoogleBooksSource, OfflineSource};
use readtrack_config::CatalogConfig;
use readtrack_core::BookMetadata;

/// Turns a title/author pair into catalog metadata
///
/// `enrich` cannot fail. Lookup errors, empty results and an unavailable
/// source all produce [`BookMetadata::fallback`].
pub struct MetadataEnricher {
    source: Box<dyn CatalogSource>,
}

impl MetadataEnricher {
    pub fn new(source: Box<dyn CatalogSource>) -> Self {
        Self { source }
    }

    /// Google Books when `config.enabled`, offline otherwise
    pub fn from_config(config: &CatalogConfig) -> Self {
        if config.enabled {
            Self::new(Box::new(GoogleBooksSource::from_config(config)))
        } else {
            Self::offline()
        }
    }

    pub fn offline() -> Self {
        Self::new(Box::new(OfflineSource::new()))
    }

    pub fn source_name(&self) -> String {
        self.source.metadata().name
    }

    pub fn enrich(&self, title: &str, author: &str) -> BookMetadata {
        if !self.source.is_available() {
            log::debug!(
                "Catalog source {} unavailable, skipping lookup for '{}'",
                self.source_name(),
                title
            );
            return BookMetadata::fallback();
        }

        let query = CatalogQuery::new(title, author);
        match self.source.lookup(&query) {
            Ok(Some(volume)) => {
                let metadata = volume.into_metadata();
                log::info!(
                    "Catalog match for '{}' by {}: {} pages",
                    title,
                    author,
                    metadata.total_pages
                );
                metadata
            }
            Ok(None) => {
                log::warn!("No catalog data found for '{}' by {}", title, author);
                BookMetadata::fallback()
            }
            Err(e) => {
                let err = e.into_app_error(&self.source_name());
                log::warn!(
                    "Lookup for '{}' by {}: {}. {}",
                    title,
                    author,
                    err,
                    err.recovery_action()
                );
                BookMetadata::fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SourceError, SourceMetadata, SourceResult, VolumeInfo};

    struct FailingSource;

    impl CatalogSource for FailingSource {
        fn lookup(&self, _query: &CatalogQuery) -> SourceResult<Option<VolumeInfo>> {
            Err(SourceError::RateLimited)
        }

        fn metadata(&self) -> SourceMetadata {
            SourceMetadata {
                name: "Failing".to_string(),
                description: String::new(),
                base_url: String::new(),
                requires_auth: false,
            }
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_error_yields_fallback() {
        let enricher = MetadataEnricher::new(Box::new(FailingSource));
        assert_eq!(enricher.enrich("Dune", "Herbert"), BookMetadata::fallback());
    }

    #[test]
    fn test_offline_yields_fallback() {
        let enricher = MetadataEnricher::offline();
        assert_eq!(enricher.source_name(), "Offline");
        assert!(enricher.enrich("Dune", "Herbert").is_fallback());
    }

    #[test]
    fn test_from_config_disabled() {
        let config = CatalogConfig {
            enabled: false,
            ..CatalogConfig::default()
        };
        assert_eq!(MetadataEnricher::from_config(&config).source_name(), "Offline");
        assert_eq!(
            MetadataEnricher::from_config(&CatalogConfig::default()).source_name(),
            "Google Books"
        );
    }
}

//! Metadata catalog configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Google Books volumes endpoint
pub const DEFAULT_CATALOG_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Image shown for books without a cover
pub const DEFAULT_PLACEHOLDER_COVER: &str = "https://via.placeholder.com/120x180?text=No+Cover";

/// Catalog lookup settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Look books up in the catalog when adding them
    pub enabled: bool,

    /// Volumes search endpoint
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Cover shown when a book has none
    pub placeholder_cover_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: DEFAULT_CATALOG_URL.to_string(),
            timeout_secs: 10,
            placeholder_cover_url: DEFAULT_PLACEHOLDER_COVER.to_string(),
        }
    }
}

impl ConfigSection for CatalogConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::gather([
            Validator::http_url("catalog.base_url", &self.base_url),
            Validator::range("catalog.timeout_secs", self.timeout_secs, 1, 120),
            Validator::non_empty("catalog.placeholder_cover_url", &self.placeholder_cover_url),
        ])
    }

    fn merge(&mut self, other: Self) {
        self.enabled = other.enabled;
        self.base_url = other.base_url;
        self.timeout_secs = other.timeout_secs;
        self.placeholder_cover_url = other.placeholder_cover_url;
    }
}

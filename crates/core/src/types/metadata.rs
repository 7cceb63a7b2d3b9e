//! Catalog metadata attached to a book during enrichment

use serde::{Deserialize, Serialize};

/// Descriptive fields filled in from an external catalog lookup
///
/// A record is either built from a real catalog hit or is the fallback
/// returned by [`BookMetadata::fallback`]. Books take every field at once
/// (see `Book::apply_metadata`), so a book is never half-enriched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookMetadata {
    /// Thumbnail image locator
    pub cover_url: Option<String>,
    /// Page count, 0 when unknown
    pub total_pages: u32,
    /// Calendar year of publication
    pub publish_year: Option<i32>,
    pub publisher: Option<String>,
    /// ISBN-13 when available, otherwise ISBN-10
    pub isbn: Option<String>,
    pub description: Option<String>,
    /// Categories in catalog order
    #[serde(default)]
    pub categories: Vec<String>,
}

impl BookMetadata {
    /// The record used when the catalog lookup fails for any reason
    pub fn fallback() -> Self {
        Self::default()
    }

    /// Returns true if this record carries no catalog data at all
    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }

    /// Returns true if the page count is known
    pub fn has_page_count(&self) -> bool {
        self.total_pages > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_empty() {
        let meta = BookMetadata::fallback();
        assert_eq!(meta.total_pages, 0);
        assert!(meta.cover_url.is_none());
        assert!(meta.publish_year.is_none());
        assert!(meta.publisher.is_none());
        assert!(meta.isbn.is_none());
        assert!(meta.description.is_none());
        assert!(meta.categories.is_empty());
        assert!(meta.is_fallback());
        assert!(!meta.has_page_count());
    }

    #[test]
    fn test_populated_is_not_fallback() {
        let meta = BookMetadata {
            total_pages: 320,
            ..BookMetadata::fallback()
        };
        assert!(!meta.is_fallback());
        assert!(meta.has_page_count());
    }
}

// FILE: src/traits.rs
// ============================================================================

use crate::{SourceResult, VolumeInfo};

/// A catalog that can look books up by title and author
pub trait CatalogSource: Send + Sync {
    /// Best match for the query, `None` when the catalog has no result
    fn lookup(&self, query: &CatalogQuery) -> SourceResult<Option<VolumeInfo>>;

    /// Get metadata about the source
    fn metadata(&self) -> SourceMetadata;

    /// Check if source can be queried at all
    fn is_available(&self) -> bool;
}

/// Title/author lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub title: String,
    pub author: String,
    pub max_results: usize,
}

impl CatalogQuery {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            max_results: 1,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    /// Title then author, every whitespace run collapsed to one space
    pub fn search_terms(&self) -> String {
        self.title
            .split_whitespace()
            .chain(self.author.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.author.trim().is_empty()
    }
}

/// Source metadata
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    pub name: String,
    pub description: String,
    pub base_url: String,
    pub requires_auth: bool,
}

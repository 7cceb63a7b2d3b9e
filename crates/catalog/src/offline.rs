// FILE: crates/catalog/src/offline.rs

use crate::{CatalogQuery, CatalogSource, SourceMetadata, SourceResult, VolumeInfo};

/// Source used when catalog lookups are switched off
#[derive(Debug, Clone, Default)]
pub struct OfflineSource;

impl OfflineSource {
    pub fn new() -> Self {
        Self
    }
}

impl CatalogSource for OfflineSource {
    fn lookup(&self, _query: &CatalogQuery) -> SourceResult<Option<VolumeInfo>> {
        Ok(None)
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Offline".to_string(),
            description: "No catalog lookups".to_string(),
            base_url: String::new(),
            requires_auth: false,
        }
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_never_finds_anything() {
        let source = OfflineSource::new();
        assert!(!source.is_available());
        assert_eq!(source.lookup(&CatalogQuery::new("Dune", "Herbert")), Ok(None));
        assert_eq!(source.metadata().name, "Offline");
    }
}

// FILE: crates/catalog/src/volume.rs

//! Google Books `volumes` response shapes and their mapping onto
//! [`BookMetadata`].

use crate::{SourceError, SourceResult};
use readtrack_core::BookMetadata;
use serde::{Deserialize, Serialize};

/// Top level of a volumes search response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumesResponse {
    #[serde(default)]
    total_items: u64,
    #[serde(default)]
    items: Vec<VolumeItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeItem {
    volume_info: VolumeInfo,
}

/// Descriptive part of a catalog volume
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub industry_identifiers: Vec<IndustryIdentifier>,
    pub page_count: Option<u32>,
    pub categories: Vec<String>,
    pub image_links: Option<ImageLinks>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
}

impl VolumeInfo {
    /// Identifier of the given type (`ISBN_13`, `ISBN_10`, ...)
    pub fn identifier(&self, kind: &str) -> Option<&str> {
        self.industry_identifiers
            .iter()
            .find(|id| id.kind == kind)
            .map(|id| id.identifier.as_str())
    }

    /// ISBN-13 when listed, otherwise ISBN-10
    pub fn isbn(&self) -> Option<&str> {
        self.identifier("ISBN_13")
            .or_else(|| self.identifier("ISBN_10"))
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.image_links
            .as_ref()
            .and_then(|links| links.thumbnail.as_deref())
    }

    /// Maps the volume onto the fields a book accepts
    pub fn into_metadata(self) -> BookMetadata {
        let cover_url = self.thumbnail().map(str::to_string);
        let isbn = self.isbn().map(str::to_string);
        let publish_year = self.published_date.as_deref().and_then(parse_publish_year);

        BookMetadata {
            cover_url,
            total_pages: self.page_count.unwrap_or(0),
            publish_year,
            publisher: self.publisher,
            isbn,
            description: self.description,
            categories: self.categories,
        }
    }
}

/// Calendar year from a `YYYY`, `YYYY-MM` or `YYYY-MM-DD` date
pub fn parse_publish_year(published_date: &str) -> Option<i32> {
    let year = published_date.trim().split('-').next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    year.parse().ok()
}

/// First volume of a search response body
///
/// A response without items yields `Ok(None)`.
pub fn parse_volumes_response(body: &str) -> SourceResult<Option<VolumeInfo>> {
    let response: VolumesResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::ParseError(format!("JSON parse error: {}", e)))?;

    if response.items.is_empty() {
        log::debug!(
            "Catalog returned no items (totalItems={})",
            response.total_items
        );
    }

    Ok(response.items.into_iter().next().map(|item| item.volume_info))
}

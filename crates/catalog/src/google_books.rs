// FILE: crates/catalog/src/google_books.rs

use crate::{
    parse_volumes_response, CatalogQuery, CatalogSource, SourceError, SourceMetadata,
    SourceResult, VolumeInfo,
};
use readtrack_config::{CatalogConfig, DEFAULT_CATALOG_URL};
use reqwest::{StatusCode, Url};
use std::time::Duration as StdDuration;

/// Google Books volumes search
pub struct GoogleBooksSource {
    base_url: String,
    client: Option<reqwest::blocking::Client>,
}

impl GoogleBooksSource {
    const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Source pointed at the public endpoint
    pub fn new() -> Self {
        Self::with_settings(
            DEFAULT_CATALOG_URL,
            StdDuration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::with_settings(
            &config.base_url,
            StdDuration::from_secs(config.timeout_secs),
        )
    }

    pub fn with_settings(base_url: &str, timeout: StdDuration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION"),
            ))
            .build()
            .map_err(|e| log::warn!("Could not build HTTP client: {}", e))
            .ok();

        Self {
            base_url: base_url.to_string(),
            client,
        }
    }

    /// `{base_url}?q=<terms>&maxResults=<n>`, spaces encoded as `+`
    pub fn request_url(&self, query: &CatalogQuery) -> SourceResult<Url> {
        if query.is_empty() {
            return Err(SourceError::InvalidQuery("Empty title and author".to_string()));
        }

        let terms = query.search_terms();
        let max_results = query.max_results.to_string();

        Url::parse_with_params(
            &self.base_url,
            &[("q", terms.as_str()), ("maxResults", max_results.as_str())],
        )
        .map_err(|e| SourceError::InvalidQuery(format!("Bad catalog URL {}: {}", self.base_url, e)))
    }
}

impl Default for GoogleBooksSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogSource for GoogleBooksSource {
    fn lookup(&self, query: &CatalogQuery) -> SourceResult<Option<VolumeInfo>> {
        let url = self.request_url(query)?;

        let client = self
            .client
            .as_ref()
            .ok_or_else(|| SourceError::Unavailable("HTTP client not available".to_string()))?;

        log::debug!("Catalog request: {}", url);

        let response = client
            .get(url)
            .send()
            .map_err(|e| SourceError::NetworkError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimited);
        }
        if !status.is_success() {
            return Err(SourceError::NetworkError(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response
            .text()
            .map_err(|e| SourceError::NetworkError(format!("Failed to read body: {}", e)))?;

        parse_volumes_response(&body)
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Google Books".to_string(),
            description: "Google Books volumes search".to_string(),
            base_url: self.base_url.clone(),
            requires_auth: false,
        }
    }

    fn is_available(&self) -> bool {
        self.client.is_some()
    }
}

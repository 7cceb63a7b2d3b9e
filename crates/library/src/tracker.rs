// FILE: crates/library/src/tracker.rs

use crate::error::Result;
use crate::reading_list::{ReadingList, SaveStatus};
use crate::storage::FileStore;
use log::info;
use readtrack_catalog::MetadataEnricher;
use readtrack_config::CatalogConfig;
use readtrack_core::{AppError, Book, BookDraft, ReadingStats, Validator};
use std::path::Path;

/// A book that made it into the list
#[derive(Debug, Clone)]
pub struct Submission {
    pub book: Book,
    pub save: SaveStatus,
}

/// Adds books to a reading list, enriching them from the catalog first
///
/// `submit` takes `&mut self`, so a submission runs to completion before
/// the next one starts.
pub struct ReadingTracker {
    list: ReadingList,
    enricher: MetadataEnricher,
}

impl ReadingTracker {
    pub fn new(list: ReadingList, enricher: MetadataEnricher) -> Self {
        Self { list, enricher }
    }

    /// File-backed list under `data_dir` with the configured catalog
    pub fn open(data_dir: &Path, catalog: &CatalogConfig) -> Self {
        info!(
            "Opening reading list in {} (catalog: {})",
            data_dir.display(),
            if catalog.enabled { catalog.base_url.as_str() } else { "off" }
        );

        let list = ReadingList::open(Box::new(FileStore::new(data_dir)));
        Self::new(list, MetadataEnricher::from_config(catalog))
    }

    /// Creates, enriches and appends a book
    ///
    /// Rejected drafts and books past their page count leave the list
    /// unchanged. A catalog failure is not an error.
    pub fn submit(&mut self, draft: BookDraft) -> Result<Submission> {
        if let Err(errors) = draft.validate() {
            return Err(AppError::InvalidArgument {
                argument: "book".to_string(),
                reason: errors.join("; "),
            }
            .into());
        }

        let mut book = draft.into_book();
        let metadata = self.enricher.enrich(&book.title, &book.author);
        book.apply_metadata(metadata);

        let save = self.list.append(book.clone())?;
        Ok(Submission { book, save })
    }

    pub fn list(&self) -> &ReadingList {
        &self.list
    }

    pub fn stats(&self) -> ReadingStats {
        self.list.stats()
    }
}

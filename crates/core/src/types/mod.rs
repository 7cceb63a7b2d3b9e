//! Domain types for ReadTrack
//!
//! - `book`: Book entity and its identifier
//! - `record`: Stored shape of a book
//! - `metadata`: Catalog fields filled in by enrichment
//! - `draft`: Reader-supplied input for a new book
//! - `stats`: Reading totals and statistics
//! - `common`: Shared traits and date helpers

mod book;
mod common;
mod draft;
mod metadata;
mod record;
mod stats;

pub use book::{Book, BookId};
pub use common::{parse_date, today, Validator, DATE_FORMAT};
pub use draft::BookDraft;
pub use metadata::BookMetadata;
pub use record::BookRecord;
pub use stats::{ReadingStats, ReadingTotals};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_types_are_exported() {
        let _book_id: BookId = BookId::new();
        let _meta: BookMetadata = BookMetadata::fallback();
        let _totals: ReadingTotals = ReadingTotals::empty();
        let _draft: BookDraft = BookDraft::new("T", "A", 0);
    }

    #[test]
    fn test_today_is_parseable() {
        let formatted = today().format(DATE_FORMAT).to_string();
        assert_eq!(parse_date(&formatted), Some(today()));
    }
}

//! Book domain model and its derived reading calculations

use crate::error::{AppError, Result};
use crate::types::{BookMetadata, BookRecord, Validator};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(Uuid);

impl BookId {
    /// Creates a new random BookId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a BookId from a UUID string
    pub fn from_string(s: &str) -> std::result::Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Returns the BookId as a string
    pub fn as_string(&self) -> String {
        self.0.to_string()
    }

    /// Returns true if `prefix` is a prefix of this id's string form
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.as_string().starts_with(&prefix.to_ascii_lowercase())
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One tracked reading item
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub current_page: u32,
    /// 0 means the page count is unknown
    pub total_pages: u32,
    pub target_page: Option<u32>,
    pub target_date: Option<NaiveDate>,
    pub cover_url: Option<String>,
    pub publish_year: Option<i32>,
    pub publisher: Option<String>,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub categories: Vec<String>,
}

impl Book {
    /// Creates a new book from the fields a reader supplies
    ///
    /// Catalog fields start out empty; callers are responsible for
    /// non-empty title and author.
    pub fn create(
        title: impl Into<String>,
        author: impl Into<String>,
        current_page: u32,
        target_page: Option<u32>,
        target_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: BookId::new(),
            title: title.into(),
            author: author.into(),
            current_page,
            total_pages: 0,
            target_page,
            target_date,
            cover_url: None,
            publish_year: None,
            publisher: None,
            isbn: None,
            description: None,
            categories: Vec::new(),
        }
    }

    /// Replaces every catalog field with the values in `metadata`
    pub fn apply_metadata(&mut self, metadata: BookMetadata) {
        self.cover_url = metadata.cover_url;
        self.total_pages = metadata.total_pages;
        self.publish_year = metadata.publish_year;
        self.publisher = metadata.publisher;
        self.isbn = metadata.isbn;
        self.description = metadata.description;
        self.categories = metadata.categories;
    }

    /// Returns true if the page count is known
    pub fn has_known_length(&self) -> bool {
        self.total_pages > 0
    }

    /// Returns true once the current page reaches a known page count
    pub fn is_finished(&self) -> bool {
        self.has_known_length() && self.current_page >= self.total_pages
    }

    /// Percentage of the book read
    ///
    /// None when the page count is unknown. The value is not clamped, so a
    /// stale page count can yield more than 100.
    pub fn progress_percent(&self) -> Option<f64> {
        if !self.has_known_length() {
            return None;
        }
        Some(self.current_page as f64 / self.total_pages as f64 * 100.0)
    }

    /// Pages per day needed to reach the target page by the target date
    ///
    /// None when either target is unset or the target date is not after
    /// `as_of`. Zero or negative results mean the target is already met.
    pub fn daily_pages_needed(&self, as_of: NaiveDate) -> Option<i64> {
        let target_page = self.target_page?;
        let target_date = self.target_date?;

        let days_left = (target_date - as_of).num_days();
        if days_left <= 0 {
            return None;
        }

        let remaining = i64::from(target_page) - i64::from(self.current_page);
        Some((remaining as f64 / days_left as f64).ceil() as i64)
    }

    /// Checks the page invariant enforced when a book enters a collection
    pub fn check_page_bounds(&self) -> Result<()> {
        if self.has_known_length() && self.current_page > self.total_pages {
            return Err(AppError::PageOutOfRange {
                current_page: self.current_page,
                total_pages: self.total_pages,
            });
        }
        Ok(())
    }

    /// Serializable snapshot of every field
    pub fn to_record(&self) -> BookRecord {
        BookRecord {
            id: self.id,
            title: self.title.clone(),
            author: self.author.clone(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            target_page: self.target_page,
            target_date: self.target_date,
            cover_url: self.cover_url.clone(),
            publish_year: self.publish_year,
            publisher: self.publisher.clone(),
            isbn: self.isbn.clone(),
            description: self.description.clone(),
            categories: self.categories.clone(),
        }
    }

    /// Rebuilds a book from a stored record without validating it
    pub fn from_record(record: BookRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            author: record.author,
            current_page: record.current_page,
            total_pages: record.total_pages,
            target_page: record.target_page,
            target_date: record.target_date,
            cover_url: record.cover_url,
            publish_year: record.publish_year,
            publisher: record.publisher,
            isbn: record.isbn,
            description: record.description,
            categories: record.categories,
        }
    }
}

impl From<BookRecord> for Book {
    fn from(record: BookRecord) -> Self {
        Self::from_record(record)
    }
}

impl From<&Book> for BookRecord {
    fn from(book: &Book) -> Self {
        book.to_record()
    }
}

impl Validator for Book {
    fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("Title cannot be empty".to_string());
        }

        if self.author.trim().is_empty() {
            errors.push("Author cannot be empty".to_string());
        }

        if let Err(e) = self.check_page_bounds() {
            errors.push(e.to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_book(current_page: u32, total_pages: u32) -> Book {
        let mut book = Book::create("Dune", "Frank Herbert", current_page, None, None);
        book.total_pages = total_pages;
        book
    }

    #[test]
    fn test_book_id_creation() {
        let id1 = BookId::new();
        let id2 = BookId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_book_id_from_string() {
        let id = BookId::new();
        let s = id.as_string();
        let parsed = BookId::from_string(&s).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_book_id_prefix() {
        let id = BookId::new();
        let s = id.as_string();
        assert!(id.matches_prefix(&s[..8]));
        assert!(id.matches_prefix(&s[..8].to_uppercase()));
        assert!(!id.matches_prefix(""));
    }

    #[test]
    fn test_create_leaves_catalog_fields_empty() {
        let book = Book::create("Dune", "Frank Herbert", 12, Some(300), None);
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.current_page, 12);
        assert_eq!(book.target_page, Some(300));
        assert_eq!(book.total_pages, 0);
        assert!(book.cover_url.is_none());
        assert!(book.categories.is_empty());
        assert!(!book.has_known_length());
    }

    #[test]
    fn test_apply_metadata_replaces_all_fields() {
        let mut book = sample_book(10, 0);
        book.publisher = Some("Stale".to_string());

        book.apply_metadata(BookMetadata {
            cover_url: Some("http://books.example/cover.jpg".to_string()),
            total_pages: 412,
            publish_year: Some(1965),
            publisher: None,
            isbn: Some("9780441013593".to_string()),
            description: Some("Desert planet".to_string()),
            categories: vec!["Fiction".to_string(), "Fiction".to_string()],
        });

        assert_eq!(book.total_pages, 412);
        assert_eq!(book.publish_year, Some(1965));
        assert!(book.publisher.is_none());
        assert_eq!(book.categories, vec!["Fiction", "Fiction"]);
    }

    #[test]
    fn test_progress_percent() {
        let book = sample_book(50, 200);
        assert_eq!(book.progress_percent(), Some(25.0));
    }

    #[test]
    fn test_progress_unknown_length() {
        let book = sample_book(50, 0);
        assert_eq!(book.progress_percent(), None);
    }

    #[test]
    fn test_progress_not_clamped() {
        let book = sample_book(300, 200);
        assert_eq!(book.progress_percent(), Some(150.0));
    }

    #[test]
    fn test_daily_pages_needed() {
        let today = date(2024, 5, 1);
        let mut book = Book::create("Dune", "Frank Herbert", 100, Some(300), None);
        book.target_date = Some(today + Duration::days(10));
        assert_eq!(book.daily_pages_needed(today), Some(20));
    }

    #[test]
    fn test_daily_pages_rounds_up() {
        let today = date(2024, 5, 1);
        let book = Book::create("Dune", "Frank Herbert", 0, Some(100), Some(date(2024, 5, 4)));
        // 100 pages over 3 days
        assert_eq!(book.daily_pages_needed(today), Some(34));
    }

    #[test]
    fn test_daily_pages_absent_when_date_passed() {
        let today = date(2024, 5, 1);
        let mut book = Book::create("Dune", "Frank Herbert", 100, Some(300), Some(today));
        assert_eq!(book.daily_pages_needed(today), None);

        book.target_date = Some(date(2024, 4, 1));
        assert_eq!(book.daily_pages_needed(today), None);
    }

    #[test]
    fn test_daily_pages_absent_without_targets() {
        let today = date(2024, 5, 1);
        let book = Book::create("Dune", "Frank Herbert", 100, None, Some(date(2024, 6, 1)));
        assert_eq!(book.daily_pages_needed(today), None);

        let book = Book::create("Dune", "Frank Herbert", 100, Some(300), None);
        assert_eq!(book.daily_pages_needed(today), None);
    }

    #[test]
    fn test_daily_pages_negative_when_ahead() {
        let today = date(2024, 5, 1);
        let book = Book::create("Dune", "Frank Herbert", 320, Some(300), Some(date(2024, 5, 11)));
        assert_eq!(book.daily_pages_needed(today), Some(-2));
    }

    #[test]
    fn test_check_page_bounds() {
        assert!(sample_book(200, 200).check_page_bounds().is_ok());
        assert!(sample_book(5000, 0).check_page_bounds().is_ok());

        let result = sample_book(250, 200).check_page_bounds();
        assert!(matches!(
            result,
            Err(AppError::PageOutOfRange {
                current_page: 250,
                total_pages: 200
            })
        ));
    }

    #[test]
    fn test_is_finished() {
        assert!(sample_book(200, 200).is_finished());
        assert!(!sample_book(199, 200).is_finished());
        assert!(!sample_book(10, 0).is_finished());
    }

    #[test]
    fn test_record_roundtrip() {
        let mut book = Book::create(
            "A \"Title\"",
            "X",
            1,
            Some(2),
            Some(date(2030, 1, 31)),
        );
        book.apply_metadata(BookMetadata {
            cover_url: Some("http://books.example/c.jpg".to_string()),
            total_pages: 2,
            publish_year: Some(2001),
            publisher: Some("Pub".to_string()),
            isbn: Some("0123456789".to_string()),
            description: Some("Desc".to_string()),
            categories: vec!["Sci-Fi".to_string(), "Drama".to_string()],
        });

        let restored = Book::from_record(book.to_record());
        assert_eq!(restored, book);
    }

    #[test]
    fn test_validation() {
        assert!(sample_book(10, 100).is_valid());

        let mut book = sample_book(10, 100);
        book.title = "   ".to_string();
        assert!(!book.is_valid());

        let mut book = sample_book(10, 100);
        book.author = String::new();
        assert!(!book.is_valid());

        assert!(!sample_book(101, 100).is_valid());
    }
}

//! Reader-supplied input for a new book

use crate::error::{AppError, Result};
use crate::types::{parse_date, Book, Validator};
use chrono::NaiveDate;

/// The fields a reader fills in when adding a book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub current_page: u32,
    pub target_page: Option<u32>,
    pub target_date: Option<NaiveDate>,
}

impl BookDraft {
    /// Creates a draft with the required fields
    pub fn new(title: impl Into<String>, author: impl Into<String>, current_page: u32) -> Self {
        Self {
            title: title.into().trim().to_string(),
            author: author.into().trim().to_string(),
            current_page,
            target_page: None,
            target_date: None,
        }
    }

    /// Sets the target page; 0 counts as no target
    pub fn with_target_page(mut self, target_page: Option<u32>) -> Self {
        self.target_page = target_page.filter(|page| *page > 0);
        self
    }

    pub fn with_target_date(mut self, target_date: Option<NaiveDate>) -> Self {
        self.target_date = target_date;
        self
    }

    /// Builds a draft from raw text fields
    ///
    /// Empty optional fields are treated as unset.
    pub fn from_form(
        title: &str,
        author: &str,
        current_page: &str,
        target_page: Option<&str>,
        target_date: Option<&str>,
    ) -> Result<Self> {
        if title.trim().is_empty() {
            return Err(AppError::missing("title"));
        }
        if author.trim().is_empty() {
            return Err(AppError::missing("author"));
        }
        if current_page.trim().is_empty() {
            return Err(AppError::missing("current page"));
        }

        let current_page = parse_page("current page", current_page)?;

        let target_page = match target_page.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => Some(parse_page("target page", raw)?),
            None => None,
        };

        let target_date = match target_date.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => Some(parse_date(raw).ok_or_else(|| AppError::InvalidDate {
                field: "target date".to_string(),
                value: raw.to_string(),
            })?),
            None => None,
        };

        Ok(Self::new(title, author, current_page)
            .with_target_page(target_page)
            .with_target_date(target_date))
    }

    /// Turns the draft into a book with empty catalog fields
    pub fn into_book(self) -> Book {
        Book::create(
            self.title,
            self.author,
            self.current_page,
            self.target_page,
            self.target_date,
        )
    }
}

impl Validator for BookDraft {
    fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.title.is_empty() {
            errors.push("Title cannot be empty".to_string());
        }
        if self.author.is_empty() {
            errors.push("Author cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn parse_page(field: &str, raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| AppError::InvalidPageNumber {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_form_required_only() {
        let draft = BookDraft::from_form(" Dune ", "Frank Herbert", "42", None, None).unwrap();
        assert_eq!(draft.title, "Dune");
        assert_eq!(draft.current_page, 42);
        assert!(draft.target_page.is_none());
        assert!(draft.target_date.is_none());
    }

    #[test]
    fn test_from_form_with_targets() {
        let draft = BookDraft::from_form(
            "Dune",
            "Frank Herbert",
            "42",
            Some("300"),
            Some("2030-06-01"),
        )
        .unwrap();
        assert_eq!(draft.target_page, Some(300));
        assert_eq!(draft.target_date, NaiveDate::from_ymd_opt(2030, 6, 1));
    }

    #[test]
    fn test_from_form_missing_fields() {
        assert!(matches!(
            BookDraft::from_form("", "Author", "1", None, None),
            Err(AppError::MissingField { .. })
        ));
        assert!(matches!(
            BookDraft::from_form("Title", "   ", "1", None, None),
            Err(AppError::MissingField { .. })
        ));
        assert!(matches!(
            BookDraft::from_form("Title", "Author", "", None, None),
            Err(AppError::MissingField { .. })
        ));
    }

    #[test]
    fn test_from_form_non_numeric_page() {
        let result = BookDraft::from_form("Title", "Author", "twelve", None, None);
        assert!(matches!(result, Err(AppError::InvalidPageNumber { .. })));

        let result = BookDraft::from_form("Title", "Author", "-3", None, None);
        assert!(matches!(result, Err(AppError::InvalidPageNumber { .. })));

        let result = BookDraft::from_form("Title", "Author", "1", Some("lots"), None);
        assert!(matches!(result, Err(AppError::InvalidPageNumber { .. })));
    }

    #[test]
    fn test_from_form_bad_date() {
        let result = BookDraft::from_form("Title", "Author", "1", None, Some("next week"));
        assert!(matches!(result, Err(AppError::InvalidDate { .. })));
    }

    #[test]
    fn test_empty_optionals_are_unset() {
        let draft = BookDraft::from_form("Title", "Author", "1", Some(" "), Some("")).unwrap();
        assert!(draft.target_page.is_none());
        assert!(draft.target_date.is_none());
    }

    #[test]
    fn test_zero_target_page_is_unset() {
        let draft = BookDraft::from_form("Title", "Author", "1", Some("0"), None).unwrap();
        assert!(draft.target_page.is_none());
    }

    #[test]
    fn test_into_book() {
        let draft = BookDraft::new("Dune", "Frank Herbert", 5).with_target_page(Some(100));
        assert!(draft.is_valid());

        let book = draft.into_book();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.current_page, 5);
        assert_eq!(book.target_page, Some(100));
        assert_eq!(book.total_pages, 0);
    }

    #[test]
    fn test_draft_validation() {
        assert!(!BookDraft::new("  ", "Author", 1).is_valid());
        assert!(!BookDraft::new("Title", "", 1).is_valid());
    }
}

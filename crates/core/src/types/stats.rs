//! Reading statistics over a collection of books

use crate::types::Book;
use serde::{Deserialize, Serialize};

/// Page sums across a reading list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingTotals {
    /// Sum of current pages
    pub read: u64,
    /// Sum of total pages; books of unknown length add 0
    pub total: u64,
}

impl ReadingTotals {
    /// Creates empty totals
    pub fn empty() -> Self {
        Self::default()
    }

    /// Folds a sequence of books into page sums
    pub fn from_books<'a, I>(books: I) -> Self
    where
        I: IntoIterator<Item = &'a Book>,
    {
        books.into_iter().fold(Self::empty(), |acc, book| Self {
            read: acc.read + u64::from(book.current_page),
            total: acc.total + u64::from(book.total_pages),
        })
    }

    /// Share of known pages read, None when no page counts are known
    pub fn percent(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.read as f64 / self.total as f64 * 100.0)
    }
}

/// Reading-list-wide statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadingStats {
    pub total_books: usize,
    pub finished_count: usize,
    pub unknown_length_count: usize,
    pub with_target_count: usize,
    pub totals: ReadingTotals,
    /// Mean progress over books with a known page count
    pub average_progress: Option<f64>,
}

impl ReadingStats {
    /// Computes statistics for a sequence of books
    pub fn from_books(books: &[Book]) -> Self {
        let progress: Vec<f64> = books.iter().filter_map(Book::progress_percent).collect();
        let average_progress = if progress.is_empty() {
            None
        } else {
            Some(progress.iter().sum::<f64>() / progress.len() as f64)
        };

        Self {
            total_books: books.len(),
            finished_count: books.iter().filter(|b| b.is_finished()).count(),
            unknown_length_count: books.iter().filter(|b| !b.has_known_length()).count(),
            with_target_count: books
                .iter()
                .filter(|b| b.target_page.is_some() && b.target_date.is_some())
                .count(),
            totals: ReadingTotals::from_books(books),
            average_progress,
        }
    }

    /// Books still being read
    pub fn in_progress_count(&self) -> usize {
        self.total_books - self.finished_count
    }

    /// Returns the percentage of finished books
    pub fn finished_percentage(&self) -> f64 {
        if self.total_books == 0 {
            return 0.0;
        }
        (self.finished_count as f64 / self.total_books as f64) * 100.0
    }
}

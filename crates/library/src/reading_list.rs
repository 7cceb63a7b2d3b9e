// FILE: crates/library/src/reading_list.rs

use crate::error::{LibraryError, Result};
use crate::storage::{KeyValueStore, MemoryStore};
use readtrack_core::{AppError, Book, BookId, BookRecord, ReadingStats, ReadingTotals};

/// Key holding the reading list snapshot
pub const BOOKS_KEY: &str = "books";

/// Key an unreadable snapshot is copied to before the list starts empty
///
/// When it is taken, later copies go to `books.corrupt-2`, `books.corrupt-3`
/// and so on.
pub const CORRUPT_KEY: &str = "books.corrupt";

const MAX_CORRUPT_COPIES: usize = 100;

/// Outcome of writing the snapshot
///
/// Write failures never undo an in-memory change; they are reported here
/// so the caller can warn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    Unsaved(String),
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved)
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            SaveStatus::Saved => None,
            SaveStatus::Unsaved(reason) => Some(reason),
        }
    }
}

/// Ordered reading list mirrored to a [`KeyValueStore`]
///
/// Insertion order is display order. Every mutation rewrites the whole
/// snapshot under [`BOOKS_KEY`].
pub struct ReadingList {
    store: Box<dyn KeyValueStore>,
    books: Vec<Book>,
    /// Set when the stored snapshot could be neither loaded nor preserved
    read_only: Option<String>,
}

impl ReadingList {
    /// Opens the list, loading whatever snapshot the store holds
    ///
    /// Never fails. A corrupt snapshot is copied aside and the list starts
    /// empty. If the snapshot can't be read, or can't be copied aside, the
    /// list also starts empty but saves are refused for the session so the
    /// stored data is left alone.
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        let mut list = Self {
            store,
            books: Vec::new(),
            read_only: None,
        };
        let records = list.load_snapshot();
        list.replace_all(records);
        list
    }

    /// Empty list that lives only in memory
    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryStore::new()))
    }

    /// Reason saves are refused, if they are
    pub fn read_only_reason(&self) -> Option<&str> {
        self.read_only.as_deref()
    }

    fn load_snapshot(&mut self) -> Option<Vec<BookRecord>> {
        let raw = match self.store.get(BOOKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::debug!("No saved reading list, starting empty");
                return None;
            }
            Err(LibraryError::NotText(_)) => {
                self.set_aside("snapshot is not valid UTF-8".to_string());
                return None;
            }
            Err(e) => {
                log::warn!("Could not read saved reading list: {}", e);
                self.read_only = Some(format!(
                    "saved reading list could not be read ({}), changes are not saved",
                    e
                ));
                return None;
            }
        };

        match serde_json::from_str::<Vec<BookRecord>>(&raw) {
            Ok(records) => {
                log::info!("Loaded {} books from storage", records.len());
                Some(records)
            }
            Err(e) => {
                self.set_aside(e.to_string());
                None
            }
        }
    }

    /// Copies the unreadable snapshot to a free corrupt key
    fn set_aside(&mut self, reason: String) {
        let error = AppError::SnapshotCorrupted {
            key: BOOKS_KEY.to_string(),
            reason,
        };
        log::warn!("{}; starting with an empty list", error);

        let copied = self
            .free_corrupt_key()
            .and_then(|key| self.store.copy(BOOKS_KEY, &key).map(|()| key));

        match copied {
            Ok(key) => log::warn!("Unreadable snapshot kept under '{}'", key),
            Err(e) => {
                log::warn!("Could not preserve unreadable snapshot: {}", e);
                self.read_only = Some(format!(
                    "unreadable reading list could not be backed up ({}), changes are not saved",
                    e
                ));
            }
        }
    }

    fn free_corrupt_key(&self) -> Result<String> {
        for n in 1..=MAX_CORRUPT_COPIES {
            let key = match n {
                1 => CORRUPT_KEY.to_string(),
                n => format!("{}-{}", CORRUPT_KEY, n),
            };
            if !self.store.contains(&key)? {
                return Ok(key);
            }
        }

        Err(LibraryError::Storage {
            key: CORRUPT_KEY.to_string(),
            source: std::io::Error::other(format!(
                "{} earlier corrupt copies already kept",
                MAX_CORRUPT_COPIES
            )),
        })
    }

    /// Rebuilds the list from snapshot records, keeping their order
    ///
    /// `None` empties the list. Records are taken as stored, without
    /// validation, and nothing is written back.
    pub fn replace_all(&mut self, records: Option<Vec<BookRecord>>) {
        self.books = records
            .unwrap_or_default()
            .into_iter()
            .map(Book::from_record)
            .collect();
    }

    /// Adds a book to the end and saves
    ///
    /// A book whose current page is past its known page count is rejected
    /// and the list is left untouched.
    pub fn append(&mut self, book: Book) -> Result<SaveStatus> {
        book.check_page_bounds()?;

        log::info!("Adding '{}' by {} ({})", book.title, book.author, book.id);
        self.books.push(book);
        Ok(self.persist())
    }

    /// Removes every book and saves the empty list
    ///
    /// Callers confirm with the user first.
    pub fn clear(&mut self) -> SaveStatus {
        log::info!("Clearing {} books", self.books.len());
        self.books.clear();
        self.persist()
    }

    /// Writes the full snapshot under [`BOOKS_KEY`]
    pub fn persist(&self) -> SaveStatus {
        if let Some(reason) = &self.read_only {
            log::warn!("Not saving: {}", reason);
            return SaveStatus::Unsaved(reason.clone());
        }

        let json = match serde_json::to_string(&self.records()) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize reading list: {}", e);
                return SaveStatus::Unsaved(e.to_string());
            }
        };

        match self.store.set(BOOKS_KEY, &json) {
            Ok(()) => SaveStatus::Saved,
            Err(e) => {
                let error = AppError::StorageWriteFailed {
                    key: BOOKS_KEY.to_string(),
                    reason: e.to_string(),
                };
                log::warn!("{}; changes kept in memory only", error);
                SaveStatus::Unsaved(error.to_string())
            }
        }
    }

    pub fn records(&self) -> Vec<BookRecord> {
        self.books.iter().map(Book::to_record).collect()
    }

    /// Pages read and known page total across the list
    pub fn totals(&self) -> ReadingTotals {
        ReadingTotals::from_books(&self.books)
    }

    pub fn stats(&self) -> ReadingStats {
        ReadingStats::from_books(&self.books)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.books.iter()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == *id)
    }

    /// Resolves a full id or an unambiguous id prefix
    pub fn resolve_id(&self, id_or_prefix: &str) -> Result<BookId> {
        let needle = id_or_prefix.trim();
        if let Ok(id) = BookId::from_string(needle) {
            return self
                .get(&id)
                .map(|book| book.id)
                .ok_or_else(|| LibraryError::BookNotFound(needle.to_string()));
        }

        let matches: Vec<BookId> = self
            .books
            .iter()
            .filter(|book| book.id.matches_prefix(needle))
            .map(|book| book.id)
            .collect();

        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(LibraryError::BookNotFound(needle.to_string())),
            _ => Err(LibraryError::AmbiguousId {
                prefix: needle.to_string(),
                count: matches.len(),
            }),
        }
    }

    /// Removes the book with `id` and saves
    pub fn remove(&mut self, id: &BookId) -> Result<(Book, SaveStatus)> {
        let index = self
            .books
            .iter()
            .position(|book| book.id == *id)
            .ok_or_else(|| LibraryError::BookNotFound(id.to_string()))?;

        let book = self.books.remove(index);
        log::info!("Removed '{}' ({})", book.title, book.id);
        Ok((book, self.persist()))
    }

    /// Moves the book's current page and saves
    ///
    /// The same page rule as [`ReadingList::append`] applies.
    pub fn update_progress(&mut self, id: &BookId, current_page: u32) -> Result<SaveStatus> {
        let book = self
            .books
            .iter_mut()
            .find(|book| book.id == *id)
            .ok_or_else(|| LibraryError::BookNotFound(id.to_string()))?;

        if book.has_known_length() && current_page > book.total_pages {
            return Err(AppError::PageOutOfRange {
                current_page,
                total_pages: book.total_pages,
            }
            .into());
        }

        log::debug!(
            "'{}' progress {} -> {}",
            book.title,
            book.current_page,
            current_page
        );
        book.current_page = current_page;
        Ok(self.persist())
    }
}

impl<'a> IntoIterator for &'a ReadingList {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.books.iter()
    }
}

//! ReadTrack reading list
//!
//! Orchestration layer over core, config and catalog: the persisted
//! [`ReadingList`], the [`ReadingTracker`] that feeds it, storage backends
//! and export.

pub mod error;
pub mod export;
pub mod reading_list;
pub mod storage;
pub mod tracker;

pub use error::{LibraryError, LibraryResult};
pub use export::{to_csv, to_json, write_export, ExportFormat};
pub use reading_list::{ReadingList, SaveStatus, BOOKS_KEY, CORRUPT_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use tracker::{ReadingTracker, Submission};

// FILE: crates/library/src/storage.rs

//! Durable key-value storage for reading list snapshots
//!
//! Values are opaque strings. [`FileStore`] keeps one `<key>.json` file per
//! key and replaces it atomically; [`MemoryStore`] is used by tests and
//! throwaway sessions.

use crate::error::{LibraryError, Result};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// String storage addressed by key
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, `None` if nothing was ever written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value under `key` in one step
    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Copies the value under `from` to `to`; a missing `from` is a no-op
    fn copy(&self, from: &str, to: &str) -> Result<()> {
        match self.get(from)? {
            Some(value) => self.set(to, &value),
            None => Ok(()),
        }
    }
}

fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));

    if valid {
        Ok(())
    } else {
        Err(LibraryError::InvalidKey(key.to_string()))
    }
}

/// One JSON file per key under a root directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// The directory is created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        check_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn storage_error(key: &str, source: std::io::Error) -> LibraryError {
        LibraryError::Storage {
            key: key.to_string(),
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::storage_error(key, e)),
        };

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| LibraryError::NotText(key.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;

        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|e| Self::storage_error(key, e))?;
            log::info!("Created data directory: {}", self.root.display());
        }

        let mut temp_file =
            NamedTempFile::new_in(&self.root).map_err(|e| Self::storage_error(key, e))?;
        temp_file
            .write_all(value.as_bytes())
            .map_err(|e| Self::storage_error(key, e))?;
        temp_file.flush().map_err(|e| Self::storage_error(key, e))?;
        temp_file
            .persist(&path)
            .map_err(|e| Self::storage_error(key, e.error))?;

        log::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::storage_error(key, e)),
        }
    }

    fn contains(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        path.try_exists().map_err(|e| Self::storage_error(key, e))
    }

    /// Byte-for-byte, so values that are not valid UTF-8 survive
    fn copy(&self, from: &str, to: &str) -> Result<()> {
        let source = self.path_for(from)?;
        let target = self.path_for(to)?;
        match fs::copy(&source, &target) {
            Ok(bytes) => {
                log::debug!("Copied {} bytes to {}", bytes, target.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !source.exists() => Ok(()),
            Err(e) => Err(Self::storage_error(to, e)),
        }
    }
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }

    fn poisoned(key: &str) -> LibraryError {
        LibraryError::Storage {
            key: key.to_string(),
            source: std::io::Error::other("memory store lock poisoned"),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        let entries = self.entries.lock().map_err(|_| Self::poisoned(key))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        let mut entries = self.entries.lock().map_err(|_| Self::poisoned(key))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        check_key(key)?;
        let mut entries = self.entries.lock().map_err(|_| Self::poisoned(key))?;
        entries.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        (**self).contains(key)
    }

    fn copy(&self, from: &str, to: &str) -> Result<()> {
        (**self).copy(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_key_rules() {
        assert!(check_key("books").is_ok());
        assert!(check_key("books.corrupt").is_ok());
        assert!(check_key("").is_err());
        assert!(check_key("../etc/passwd").is_err());
        assert!(check_key("a/b").is_err());
        assert!(check_key(".hidden").is_err());
    }

    #[test]
    fn test_file_store_roundtrip() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let store = FileStore::new(temp_dir.path().join("data"));

        assert_eq!(store.get("books")?, None);

        store.set("books", "[]")?;
        assert_eq!(store.get("books")?.as_deref(), Some("[]"));
        assert!(temp_dir.path().join("data").join("books.json").exists());

        store.set("books", "[1]")?;
        assert_eq!(store.get("books")?.as_deref(), Some("[1]"));

        store.remove("books")?;
        assert_eq!(store.get("books")?, None);
        store.remove("books")?;
        Ok(())
    }

    #[test]
    fn test_file_store_rejects_bad_key() {
        let store = FileStore::new("/tmp/readtrack-never-created");
        assert!(matches!(
            store.set("../escape", "x"),
            Err(LibraryError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_file_store_unwritable_root() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let blocker = temp_dir.path().join("not-a-dir");
        fs::write(&blocker, "file in the way")?;

        let store = FileStore::new(&blocker);
        assert!(matches!(
            store.set("books", "[]"),
            Err(LibraryError::Storage { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_file_store_non_utf8_value() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let store = FileStore::new(temp_dir.path());
        let raw: &[u8] = b"[{\"title\":\"Caf\xe9\"}]";
        fs::write(store.path_for("books")?, raw)?;

        assert!(matches!(store.get("books"), Err(LibraryError::NotText(_))));
        assert!(store.contains("books")?);
        assert!(!store.contains("books.corrupt")?);

        store.copy("books", "books.corrupt")?;
        assert_eq!(fs::read(store.path_for("books.corrupt")?)?, raw);

        store.copy("missing", "elsewhere")?;
        assert!(!store.contains("elsewhere")?);
        Ok(())
    }

    #[test]
    fn test_memory_store() -> Result<()> {
        let store = MemoryStore::with_value("books", "[]");
        assert_eq!(store.get("books")?.as_deref(), Some("[]"));

        store.set("other", "x")?;
        store.remove("books")?;
        assert_eq!(store.get("books")?, None);
        assert_eq!(store.get("other")?.as_deref(), Some("x"));

        store.copy("other", "other.copy")?;
        assert!(store.contains("other.copy")?);
        assert!(!store.contains("books")?);
        Ok(())
    }
}

//! On-device key-value persistence.
//!
//! Two fixed keys hold all device state: the serialized session record and
//! the favorite-product ID list. Each key is one JSON file inside the
//! configured data directory, written via a temp file and rename so a
//! partial write never corrupts the record. No encryption, no schema
//! version tag; whatever is on disk is trusted as-is.
//!
//! Stores are plain repository objects handed to the code that needs them -
//! there is no ambient global storage access.

pub mod favorites;
pub mod session;

pub use favorites::FavoriteStore;
pub use session::SessionStore;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when reading or writing device state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record on disk is not valid JSON for its type.
    #[error("corrupt record at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One-JSON-file-per-key store rooted at a directory.
#[derive(Debug, Clone)]
pub(crate) struct KeyValueStore {
    dir: PathBuf,
}

impl KeyValueStore {
    pub(crate) fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read a key. A key that was never written is `None`, not an error.
    pub(crate) fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io { path, source: e }),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| StoreError::Corrupt { path, source: e })
    }

    /// Overwrite a key atomically (temp file + rename).
    pub(crate) fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::Io {
            path: self.dir.clone(),
            source: e,
        })?;

        let path = self.path_for(key);
        let contents = serde_json::to_string(value).map_err(|e| StoreError::Corrupt {
            path: path.clone(),
            source: e,
        })?;

        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, contents).map_err(|e| StoreError::Io {
            path: tmp.clone(),
            source: e,
        })?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::Io { path, source: e })
    }

    /// Remove a key. Removing a key that was never written is fine.
    pub(crate) fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io { path, source: e }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KeyValueStore::new(dir.path());
        let value: Option<Vec<i64>> = kv.read("never-written").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KeyValueStore::new(dir.path());
        kv.write("ids", &vec![1_i64, 2, 3]).unwrap();
        let value: Option<Vec<i64>> = kv.read("ids").unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KeyValueStore::new(dir.path());
        kv.write("ids", &vec![1_i64]).unwrap();
        kv.write("ids", &vec![9_i64]).unwrap();
        let value: Option<Vec<i64>> = kv.read("ids").unwrap();
        assert_eq!(value, Some(vec![9]));
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KeyValueStore::new(dir.path());
        assert!(kv.remove("never-written").is_ok());
    }

    #[test]
    fn test_corrupt_record_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KeyValueStore::new(dir.path());
        fs::write(dir.path().join("ids.json"), "{not json").unwrap();
        let result: Result<Option<Vec<i64>>, StoreError> = kv.read("ids");
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_write_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("state");
        let kv = KeyValueStore::new(&nested);
        kv.write("ids", &vec![1_i64]).unwrap();
        assert!(nested.join("ids.json").exists());
    }
}

//! File-per-key JSON storage.
//!
//! Each key is a `<key>.json` file in the storage directory. Reads of a
//! corrupt value log a warning, clear the offending key, and return
//! `None` so callers fall back to their default state.

use packmind_core::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open a store rooted at the given directory, creating it if needed.
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir)
            .map_err(|e| StorageError::OpenFailed(format!("{}: {}", dir.display(), e)))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Read and deserialize the value under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent. A value that fails to
    /// parse is treated as corrupt: the key is cleared and `Ok(None)` is
    /// returned.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).map_err(|e| StorageError::ReadFailed {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        match serde_json::from_str(&json) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!("Corrupt value under key '{}', clearing: {}", key, e);
                self.clear(key)?;
                Ok(None)
            }
        }
    }

    /// Serialize and write `value` under `key`.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(value).map_err(|e| StorageError::Serialize {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        fs::write(self.key_path(key), json).map_err(|e| StorageError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!("Stored key '{}'", key);
        Ok(())
    }

    /// Remove the value under `key`, if any.
    pub fn clear(&self, key: &str) -> Result<(), StorageError> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| StorageError::WriteFailed {
                key: key.to_string(),
                message: e.to_string(),
            })?;
            tracing::debug!("Cleared key '{}'", key);
        }
        Ok(())
    }

    /// Whether a value exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.key_path(key).exists()
    }
}

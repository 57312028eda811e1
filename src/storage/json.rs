//! JSON array files on the local filesystem.
//!
//! Every file managed here holds a single JSON array. Appending reads the
//! whole array, concatenates the new items and rewrites the file through a
//! temp file + rename.
//!
//! Appends through one [`JsonStore`] are serialized by an async mutex.
//! Separate stores or processes writing the same file are not coordinated,
//! so a file must have a single writer at a time.

use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};

/// Append-only JSON array files under a root directory.
#[derive(Debug)]
pub struct JsonStore {
    root_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    /// Create a store rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for a relative key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Append `items` to the array stored under `key`.
    ///
    /// A missing file is treated as an empty array. Returns the array length
    /// after the write.
    pub async fn append<T: Serialize>(&self, items: &[T], key: &str) -> Result<usize> {
        let _guard = self.write_lock.lock().await;

        let mut all = self.read_array(key).await?;
        for item in items {
            all.push(serde_json::to_value(item)?);
        }

        let bytes = serde_json::to_vec_pretty(&all)?;
        self.write_bytes(key, &bytes).await?;

        log::debug!(
            "Appended {} items to {} ({} total)",
            items.len(),
            self.path(key).display(),
            all.len()
        );
        Ok(all.len())
    }

    /// Load every item stored under `key`.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }

    /// Number of items stored under `key` (zero when the file is missing).
    pub async fn count(&self, key: &str) -> Result<usize> {
        Ok(self.read_array(key).await?.len())
    }

    async fn read_array(&self, key: &str) -> Result<Vec<Value>> {
        self.load(key).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

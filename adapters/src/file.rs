//! File-backed implementation of [`ClientStorage`].
//!
//! The whole store is a single JSON object of string values. Every write
//! rewrites the file through a sibling temporary file followed by a rename, so
//! a reader never observes a half-written object. A missing file reads as an
//! empty store. A file that is not a JSON object fails reads with
//! [`AdapterError::Corrupt`] and is replaced by the next write.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::Mutex;

use crate::errors::{AdapterError, AdapterResult};
use crate::ClientStorage;

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> AdapterResult<HashMap<String, String>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(source) => return Err(self.io_error(source)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(HashMap::new());
        }
        serde_json::from_slice(&bytes).map_err(|err| AdapterError::Corrupt {
            path: self.path.clone(),
            reason: err.to_string(),
        })
    }

    /// Loads the entries to modify. A corrupt file yields an empty map and
    /// `true`, so the caller rewrites it.
    async fn load_for_write(&self) -> AdapterResult<(HashMap<String, String>, bool)> {
        match self.load().await {
            Ok(entries) => Ok((entries, false)),
            Err(AdapterError::Corrupt { reason, .. }) => {
                warn!(
                    "replacing corrupt storage file {}: {}",
                    self.path.display(),
                    reason
                );
                Ok((HashMap::new(), true))
            }
            Err(err) => Err(err),
        }
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> AdapterResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }
        let body = serde_json::to_vec_pretty(entries).map_err(|err| AdapterError::Corrupt {
            path: self.path.clone(),
            reason: err.to_string(),
        })?;

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, body)
            .await
            .map_err(|source| self.io_error(source))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        debug!("persisted {} storage keys to {}", entries.len(), self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: io::Error) -> AdapterError {
        AdapterError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl ClientStorage for FileStorage {
    async fn get(&self, key: &str) -> AdapterResult<Option<String>> {
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> AdapterResult<()> {
        let _guard = self.write_lock.lock().await;
        let (mut entries, _) = self.load_for_write().await?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries).await
    }

    async fn remove(&self, key: &str) -> AdapterResult<()> {
        let _guard = self.write_lock.lock().await;
        let (mut entries, reset) = self.load_for_write().await?;
        if entries.remove(key).is_none() && !reset {
            return Ok(());
        }
        self.persist(&entries).await
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStorage::new(dir.path().join("storage.json"));
        assert_eq!(store.get("trackly_token").await.unwrap(), None);
        store.remove("trackly_token").await.unwrap();
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn values_survive_a_new_handle() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = FileStorage::new(&path);
        store.set("trackly_token", "abc").await.unwrap();
        store.set("currentUser", "{}").await.unwrap();
        drop(store);

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get("trackly_token").await.unwrap().as_deref(), Some("abc"));
        reopened.remove("trackly_token").await.unwrap();
        assert_eq!(reopened.get("trackly_token").await.unwrap(), None);
        assert_eq!(reopened.get("currentUser").await.unwrap().as_deref(), Some("{}"));
        assert!(!dir.path().join("nested").join("storage.json.tmp").exists());
    }

    #[tokio::test]
    async fn non_object_file_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = FileStorage::new(&path);
        let err = store.get("trackly_token").await.unwrap_err();
        assert!(matches!(err, AdapterError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn write_replaces_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStorage::new(&path);
        store.set("trackly_token", "abc").await.unwrap();
        assert_eq!(store.get("trackly_token").await.unwrap().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn remove_of_absent_key_resets_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStorage::new(&path);
        store.remove("trackly_token").await.unwrap();
        assert_eq!(store.get("trackly_token").await.unwrap(), None);
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "{}");
    }
}

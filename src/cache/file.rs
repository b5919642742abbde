//! On-disk cache store: one file per key.
//!
//! Each file holds the expiry time (unix seconds, 8 bytes big-endian)
//! followed by the payload.

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use log::debug;

use super::CacheStore;
use crate::error_handling::CacheError;

const EXPIRY_LEN: usize = 8;

/// Cache store keeping entries as files in a directory.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    dir: PathBuf,
}

impl FileCacheStore {
    /// Creates a store under `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.cache", name))
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut content = match tokio::fs::read(self.path_for(key)).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let Some(expiry) = content
            .get(..EXPIRY_LEN)
            .and_then(|bytes| <[u8; EXPIRY_LEN]>::try_from(bytes).ok())
        else {
            return Err(io::Error::new(ErrorKind::InvalidData, "truncated cache file").into());
        };
        if u64::from_be_bytes(expiry) <= now_secs() {
            debug!("Cache entry {} expired", key);
            self.delete(key).await?;
            return Ok(None);
        }

        Ok(Some(content.split_off(EXPIRY_LEN)))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let expires_at = now_secs().saturating_add(ttl.as_secs());
        let mut content = Vec::with_capacity(EXPIRY_LEN + value.len());
        content.extend_from_slice(&expires_at.to_be_bytes());
        content.extend_from_slice(value);
        tokio::fs::write(self.path_for(key), content).await?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_set_then_get() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileCacheStore::new(dir.path().join("nested"));

        store
            .set("search_digest:search:abc", br#"{"x":1}"#, HOUR)
            .await
            .expect("set");

        let value = store.get("search_digest:search:abc").await.expect("get");
        assert_eq!(value.as_deref(), Some(&br#"{"x":1}"#[..]));
        assert!(dir.path().join("nested/search_digest_search_abc.cache").exists());
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileCacheStore::new(dir.path());

        assert_eq!(store.get("absent").await.expect("get"), None);
        store.delete("absent").await.expect("deleting an absent key is fine");
    }

    #[tokio::test]
    async fn test_expired_entry_is_removed_on_read() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileCacheStore::new(dir.path());
        store.set("k", b"v", Duration::ZERO).await.expect("set");
        let path = store.path_for("k");
        assert!(path.exists());

        assert_eq!(store.get("k").await.expect("get"), None);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_truncated_file_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileCacheStore::new(dir.path());
        std::fs::write(store.path_for("k"), b"abc").expect("write");

        let err = store.get("k").await.expect_err("truncated entry");
        assert!(matches!(err, CacheError::Io(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_entry() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileCacheStore::new(dir.path());
        store.set("k", b"v", HOUR).await.expect("set");

        store.delete("k").await.expect("delete");

        assert_eq!(store.get("k").await.expect("get"), None);
    }
}

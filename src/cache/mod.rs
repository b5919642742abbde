//! Result caching around the search pipeline.
//!
//! The pipeline itself knows nothing about caching. [`CachedSearch`] looks up
//! a stored result before running a search and stores successful results
//! afterwards, through any [`CacheStore`] backend.

mod file;
mod key;
mod search;

use std::time::Duration;

use async_trait::async_trait;

use crate::error_handling::CacheError;

pub use file::FileCacheStore;
pub use key::cache_key;
pub use search::{CacheStatus, CachedEnvelope, CachedSearch};

/// Key-value storage with per-entry expiry.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Stores `value` under `key` for `ttl`.
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

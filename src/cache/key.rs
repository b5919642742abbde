//! Cache key derivation.

use md5::{Digest, Md5};

use crate::config::CACHE_NAMESPACE;

/// Builds the cache key for `query` under `prefix`.
///
/// The query is lowercased and hashed, so keys have a fixed length and differ
/// only by case-insensitive query text.
pub fn cache_key(prefix: &str, query: &str) -> String {
    let hash = Md5::digest(query.to_lowercase().as_bytes());
    format!("{}:{}:{:x}", CACHE_NAMESPACE, prefix, hash)
}

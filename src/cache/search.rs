//! Cache wrapper around [`SearchPipeline`].

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::{cache_key, CacheStore};
use crate::config::SEARCH_CACHE_PREFIX;
use crate::crawler::Crawler;
use crate::error_handling::CacheError;
use crate::pipeline::{DistilledResult, SearchPipeline};
use crate::transport::Transport;

/// Whether a result came from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

/// Stored form of a cached search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedEnvelope {
    pub cached_at: DateTime<Utc>,
    pub query: String,
    pub result: DistilledResult,
}

/// Serves searches from a [`CacheStore`] when it can, and runs the pipeline
/// otherwise.
///
/// Cache failures never fail a search: they are logged and the search runs
/// uncached.
pub struct CachedSearch<S> {
    store: S,
    prefix: String,
    ttl: Duration,
}

impl<S: CacheStore> CachedSearch<S> {
    pub fn new(store: S, ttl: Duration) -> Self {
        Self {
            store,
            prefix: SEARCH_CACHE_PREFIX.to_string(),
            ttl,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the cached result for `query`, if fresh.
    ///
    /// Entries older than the TTL or that fail to decode are deleted.
    pub async fn lookup(&self, query: &str) -> Option<DistilledResult> {
        let key = cache_key(&self.prefix, query);
        let raw = match self.store.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Cache read failed for {}: {}", key, e);
                return None;
            }
        };

        let envelope: CachedEnvelope = match serde_json::from_slice(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("Discarding undecodable cache entry {}: {}", key, e);
                self.evict(&key).await;
                return None;
            }
        };

        match (Utc::now() - envelope.cached_at).to_std() {
            Ok(age) if age > self.ttl => {
                debug!("Discarding stale cache entry {} ({}s old)", key, age.as_secs());
                self.evict(&key).await;
                None
            }
            _ => Some(envelope.result),
        }
    }

    /// Stores `result` for `query`. Error results are never stored.
    pub async fn remember(&self, query: &str, result: &DistilledResult) {
        if result.is_error() {
            debug!("Not caching failed search {:?}", query);
            return;
        }
        if let Err(e) = self.write_entry(query, result).await {
            warn!("Cache write failed for {:?}: {}", query, e);
        }
    }

    async fn write_entry(&self, query: &str, result: &DistilledResult) -> Result<(), CacheError> {
        let envelope = CachedEnvelope {
            cached_at: Utc::now(),
            query: query.to_string(),
            result: result.clone(),
        };
        let bytes = serde_json::to_vec(&envelope)?;
        self.store
            .set(&cache_key(&self.prefix, query), &bytes, self.ttl)
            .await
    }

    /// Runs `query` through `pipeline`, consulting the cache first.
    pub async fn search<C: Crawler, T: Transport>(
        &self,
        pipeline: &SearchPipeline<C, T>,
        query: &str,
        cancel: &CancellationToken,
    ) -> (DistilledResult, CacheStatus) {
        if let Some(result) = self.lookup(query).await {
            info!("Cache hit for {:?}", query);
            return (result, CacheStatus::Hit);
        }

        let result = pipeline.search_with_cancel(query, cancel).await;
        self.remember(query, &result).await;
        (result, CacheStatus::Miss)
    }

    async fn evict(&self, key: &str) {
        if let Err(e) = self.store.delete(key).await {
            warn!("Failed to delete cache entry {}: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FileCacheStore;
    use crate::redirect::RedirectResolver;
    use crate::testing::{ScriptedCrawler, ScriptedTransport};
    use std::sync::Arc;
    use tempfile::TempDir;

    const WEEK: Duration = Duration::from_secs(7 * 24 * 60 * 60);

    fn pipeline(crawler: ScriptedCrawler) -> SearchPipeline<ScriptedCrawler, ScriptedTransport> {
        let transport = ScriptedTransport::new().page("http://r.test/x", "landing");
        SearchPipeline::new(crawler, RedirectResolver::new(Arc::new(transport), 3))
    }

    fn rendered() -> ScriptedCrawler {
        ScriptedCrawler::Markup("百度为您找到以下结果\n### [R](http://r.test/x)".to_string())
    }

    fn cached(dir: &TempDir) -> CachedSearch<FileCacheStore> {
        CachedSearch::new(FileCacheStore::new(dir.path()), WEEK)
    }

    #[tokio::test]
    async fn test_second_search_is_served_from_cache() {
        let dir = TempDir::new().expect("temp dir");
        let cache = cached(&dir);
        let cancel = CancellationToken::new();

        let (first, status) = cache.search(&pipeline(rendered()), "Rust", &cancel).await;
        assert_eq!(status, CacheStatus::Miss);
        assert_eq!(first.search_result, "### [R](http://r.test/x)");

        // A failing crawler proves the pipeline is not consulted.
        let (second, status) = cache
            .search(&pipeline(ScriptedCrawler::Unavailable(503)), "rust", &cancel)
            .await;
        assert_eq!(status, CacheStatus::Hit);
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_error_results_are_not_cached() {
        let dir = TempDir::new().expect("temp dir");
        let cache = cached(&dir);
        let cancel = CancellationToken::new();

        let (result, _) = cache
            .search(&pipeline(ScriptedCrawler::Unavailable(502)), "rust", &cancel)
            .await;
        assert!(result.is_error());

        assert_eq!(cache.lookup("rust").await, None);
        let (_, status) = cache.search(&pipeline(rendered()), "rust", &cancel).await;
        assert_eq!(status, CacheStatus::Miss);
    }

    #[tokio::test]
    async fn test_stale_envelope_is_deleted() {
        let dir = TempDir::new().expect("temp dir");
        let cache = cached(&dir);
        let key = cache_key(SEARCH_CACHE_PREFIX, "old");
        let envelope = CachedEnvelope {
            cached_at: Utc::now() - chrono::Duration::days(8),
            query: "old".to_string(),
            result: DistilledResult::success("old", "stale digest"),
        };
        let raw = serde_json::to_vec(&envelope).expect("encode");
        cache.store().set(&key, &raw, WEEK).await.expect("set");

        assert_eq!(cache.lookup("old").await, None);
        assert_eq!(cache.store().get(&key).await.expect("get"), None);
    }

    #[tokio::test]
    async fn test_undecodable_envelope_is_deleted() {
        let dir = TempDir::new().expect("temp dir");
        let cache = cached(&dir);
        let key = cache_key(SEARCH_CACHE_PREFIX, "bad");
        cache
            .store()
            .set(&key, br#"{"unexpected":true}"#, WEEK)
            .await
            .expect("set");

        assert_eq!(cache.lookup("bad").await, None);
        assert_eq!(cache.store().get(&key).await.expect("get"), None);
    }

    #[tokio::test]
    async fn test_unreadable_store_falls_back_to_pipeline() {
        let dir = TempDir::new().expect("temp dir");
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").expect("write");
        let cache = CachedSearch::new(FileCacheStore::new(&blocker), WEEK);

        let (result, status) = cache
            .search(&pipeline(rendered()), "rust", &CancellationToken::new())
            .await;

        assert_eq!(status, CacheStatus::Miss);
        assert_eq!(result.error, None);
        assert_eq!(result.search_result, "### [R](http://r.test/x)");
    }
}

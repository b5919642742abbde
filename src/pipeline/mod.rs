//! Search orchestration.
//!
//! A search renders the results page, extracts the digest, harvests the
//! leading link of every block, resolves each link through its redirect
//! chain, and rewrites the digest with the resolved URLs. Only a failed
//! render or a cancellation turns into an error result; redirect failures
//! are absorbed by the resolver.

mod types;

use std::sync::Arc;

use futures::future::join_all;
use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::crawler::{Crawler, RenderServiceCrawler};
use crate::error_handling::{InitializationError, SearchError};
use crate::extract::extract_digest;
use crate::harvest::{harvest_links, CandidateLink};
use crate::redirect::RedirectResolver;
use crate::rewrite::{rewrite_digest, ResolvedLink};
use crate::transport::{HttpTransport, Transport};

pub use types::DistilledResult;

/// The search pipeline over a crawler and a transport.
///
/// Holds no per-search state; one pipeline can serve concurrent searches.
pub struct SearchPipeline<C, T> {
    crawler: C,
    resolver: RedirectResolver<T>,
    resolve_concurrently: bool,
}

impl SearchPipeline<RenderServiceCrawler, HttpTransport> {
    /// Builds the production pipeline: render service crawler plus HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if either HTTP client
    /// cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let crawler = RenderServiceCrawler::from_config(config)?;
        let transport = HttpTransport::from_config(config)?;
        let resolver = RedirectResolver::new(Arc::new(transport), config.max_client_hops);
        Ok(Self::new(crawler, resolver).with_concurrent_resolution(config.resolve_concurrently))
    }
}

impl<C: Crawler, T: Transport> SearchPipeline<C, T> {
    /// Creates a pipeline that resolves links concurrently.
    pub fn new(crawler: C, resolver: RedirectResolver<T>) -> Self {
        Self {
            crawler,
            resolver,
            resolve_concurrently: true,
        }
    }

    /// Resolve links one after another instead of all at once.
    ///
    /// Output is the same either way; only the order of network calls changes.
    pub fn with_concurrent_resolution(mut self, concurrent: bool) -> Self {
        self.resolve_concurrently = concurrent;
        self
    }

    /// Runs a search to completion.
    pub async fn search(&self, query: &str) -> DistilledResult {
        self.search_with_cancel(query, &CancellationToken::new())
            .await
    }

    /// Runs a search that stops as soon as `cancel` fires.
    ///
    /// Cancellation drops every in-flight fetch (render and redirect hops) and
    /// yields an error result.
    pub async fn search_with_cancel(&self, query: &str, cancel: &CancellationToken) -> DistilledResult {
        match self.distill(query, cancel).await {
            Ok(digest) => {
                info!("Search {:?} produced {} characters", query, digest.chars().count());
                DistilledResult::success(query, digest)
            }
            Err(e) => {
                warn!("Search {:?} failed: {}", query, e);
                DistilledResult::failure(query, e.to_string())
            }
        }
    }

    async fn distill(&self, query: &str, cancel: &CancellationToken) -> Result<String, SearchError> {
        let markup = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SearchError::Cancelled),
            rendered = self.crawler.render_search(query) => rendered?,
        };

        let digest = extract_digest(&markup);
        if digest.is_empty() {
            info!("No results section found for {:?}", query);
            return Ok(digest);
        }

        let candidates = harvest_links(&digest);
        debug!("Harvested {} candidate links for {:?}", candidates.len(), query);

        let links = self.resolve_all(&candidates, cancel).await;
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        Ok(rewrite_digest(&digest, &links))
    }

    /// Resolves every candidate; results keep harvest order.
    async fn resolve_all(&self, candidates: &[CandidateLink], cancel: &CancellationToken) -> Vec<ResolvedLink> {
        let terminals: Vec<String> = if self.resolve_concurrently {
            join_all(candidates.iter().map(|candidate| async move {
                let chain = self
                    .resolver
                    .resolve_with_cancel(&candidate.original_url, cancel)
                    .await;
                chain.terminal().to_string()
            }))
            .await
        } else {
            let mut terminals = Vec::with_capacity(candidates.len());
            for candidate in candidates {
                let chain = self
                    .resolver
                    .resolve_with_cancel(&candidate.original_url, cancel)
                    .await;
                terminals.push(chain.terminal().to_string());
            }
            terminals
        };

        candidates
            .iter()
            .zip(terminals)
            .map(|(candidate, terminal)| ResolvedLink::new(candidate.original_url.clone(), terminal))
            .collect()
    }
}

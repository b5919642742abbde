//! search_digest library: distills a search results page into a compact digest
//!
//! A search renders the results page through an external render service,
//! keeps the top result blocks, follows each result link through its
//! server-side and client-side (script, meta refresh) redirects, and rewrites
//! the digest so every link points at its real destination.
//!
//! # Example
//!
//! ```no_run
//! use search_digest::{run_search, Config};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     max_client_hops: 5,
//!     ..Default::default()
//! };
//!
//! let report = run_search(&config, "rust async runtime", &CancellationToken::new()).await?;
//! println!("{}", report.result.search_result);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod cache;
pub mod config;
pub mod crawler;
mod error_handling;
mod extract;
mod harvest;
pub mod initialization;
mod pipeline;
pub mod redirect;
mod rewrite;
pub mod transport;
mod utils;

#[cfg(test)]
mod testing;

// Re-export public API
pub use cache::{CacheStatus, CachedSearch, FileCacheStore};
pub use config::{Config, LogFormat, LogLevel, Opt};
pub use error_handling::{
    CacheError, FetchError, FetchErrorKind, InitializationError, RenderError, SearchError,
};
pub use extract::extract_digest;
pub use harvest::{harvest_links, CandidateLink};
pub use pipeline::{DistilledResult, SearchPipeline};
pub use rewrite::{rewrite_digest, ResolvedLink};
pub use run::{run_search, SearchReport};

// Entry point wiring the pipeline and the optional cache from a `Config`.
mod run {
    use anyhow::{Context, Result};
    use log::info;
    use tokio_util::sync::CancellationToken;

    use crate::cache::{CacheStatus, CachedSearch, FileCacheStore};
    use crate::config::Config;
    use crate::pipeline::{DistilledResult, SearchPipeline};

    /// Outcome of [`run_search`].
    #[derive(Debug, Clone)]
    pub struct SearchReport {
        /// The search result; check `result.error` for failure
        pub result: DistilledResult,
        /// `None` when caching is disabled
        pub cache_status: Option<CacheStatus>,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs one search with the production render service and HTTP transport.
    ///
    /// When `config.cache_dir` is set, results are read from and written to an
    /// on-disk cache there.
    ///
    /// # Errors
    ///
    /// Returns an error only if the HTTP clients cannot be built. A failed
    /// search is reported through `SearchReport::result`.
    pub async fn run_search(
        config: &Config,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<SearchReport> {
        let start_time = std::time::Instant::now();
        let pipeline =
            SearchPipeline::from_config(config).context("Failed to initialize search pipeline")?;

        let (result, cache_status) = match &config.cache_dir {
            Some(dir) => {
                info!("Using result cache at {}", dir.display());
                let cached = CachedSearch::new(FileCacheStore::new(dir), config.cache_ttl());
                let (result, status) = cached.search(&pipeline, query, cancel).await;
                (result, Some(status))
            }
            None => (pipeline.search_with_cancel(query, cancel).await, None),
        };

        Ok(SearchReport {
            result,
            cache_status,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }
}

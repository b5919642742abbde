//! Multi-hop redirect resolution.
//!
//! Each hop is one [`Transport::fetch`], which follows server-side redirects on
//! its own. The body the hop lands on is then checked for a client-side
//! redirect (script or meta refresh); if one is found, the next hop starts
//! there. Resolution stops on a content page, a page without a redirect, a
//! cycle, the client hop limit, or a failed fetch. It never returns an error:
//! the worst case is a chain holding only the input URL.

mod client_side;

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, warn};
use reqwest::Url;
use tokio_util::sync::CancellationToken;

use crate::transport::Transport;
use client_side::{detect_client_redirect, ClientRedirect};

/// Why a redirect chain stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainEnd {
    /// The last page is longer than a redirect stub.
    ContentPage,
    /// The last page carries no client-side redirect.
    NoRedirect,
    /// The next client-side target already started a hop.
    CycleDetected,
    /// The client-side hop limit was reached.
    HopLimit,
    /// The client-side target could not be turned into a URL.
    InvalidTarget,
    /// A fetch failed; the chain holds whatever was reached before it.
    FetchFailed,
    /// Resolution was cancelled.
    Cancelled,
}

/// URLs visited while resolving one candidate link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectChain {
    urls: Vec<String>,
    client_hops: usize,
    end: ChainEnd,
}

impl RedirectChain {
    /// All URLs, in visiting order. Never empty.
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// The best-known destination: the last URL of the chain.
    pub fn terminal(&self) -> &str {
        self.urls.last().map_or("", String::as_str)
    }

    /// Number of client-side hops taken.
    pub fn client_hops(&self) -> usize {
        self.client_hops
    }

    pub fn end(&self) -> ChainEnd {
        self.end
    }
}

/// Resolves candidate links to their terminal URLs.
///
/// Holds the shared transport; every call to [`resolve`](Self::resolve) owns
/// its own `visited` set, so chains can run concurrently.
#[derive(Debug)]
pub struct RedirectResolver<T> {
    transport: Arc<T>,
    max_client_hops: usize,
}

impl<T> Clone for RedirectResolver<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            max_client_hops: self.max_client_hops,
        }
    }
}

impl<T: Transport> RedirectResolver<T> {
    pub fn new(transport: Arc<T>, max_client_hops: usize) -> Self {
        Self {
            transport,
            max_client_hops,
        }
    }

    pub fn max_client_hops(&self) -> usize {
        self.max_client_hops
    }

    /// Resolves `url` without external cancellation.
    pub async fn resolve(&self, url: &str) -> RedirectChain {
        self.resolve_with_cancel(url, &CancellationToken::new()).await
    }

    /// Resolves `url`, abandoning the in-flight fetch as soon as `cancel` fires.
    pub async fn resolve_with_cancel(&self, url: &str, cancel: &CancellationToken) -> RedirectChain {
        let mut urls: Vec<String> = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        // Hop targets come out of `join_target` in `Url` form; the input must match.
        let mut current = normalize_url(url);
        let mut client_hops = 0;

        let end = loop {
            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => break ChainEnd::Cancelled,
                result = self.transport.fetch(&current) => result,
            };

            let page = match fetched {
                Ok(page) => page,
                Err(e) => {
                    warn!("Redirect hop failed for {}: {}", current, e);
                    break ChainEnd::FetchFailed;
                }
            };
            urls.extend(page.visited_urls().map(str::to_string));

            let target = match detect_client_redirect(&page.body) {
                ClientRedirect::ContentPage => break ChainEnd::ContentPage,
                ClientRedirect::None => break ChainEnd::NoRedirect,
                ClientRedirect::Target(target) => target,
            };
            let Some(next) = join_target(&page.final_url, &target) else {
                debug!("Unusable client-side redirect target {:?} on {}", target, page.final_url);
                break ChainEnd::InvalidTarget;
            };

            visited.insert(current);
            if visited.contains(&next) {
                debug!("Client-side redirect cycle at {}", next);
                break ChainEnd::CycleDetected;
            }
            if client_hops >= self.max_client_hops {
                debug!("Client-side hop limit ({}) reached before {}", self.max_client_hops, next);
                break ChainEnd::HopLimit;
            }

            debug!("Client-side redirect: {} -> {}", page.final_url, next);
            current = next;
            client_hops += 1;
        };

        if urls.is_empty() {
            urls.push(url.to_string());
        }
        debug!(
            "Resolved {} -> {} ({:?}, {} client hops)",
            url,
            urls.last().map_or("", String::as_str),
            end,
            client_hops
        );

        RedirectChain {
            urls,
            client_hops,
            end,
        }
    }
}

/// Serializes `url` the way `Url` does (`http://a.test` becomes `http://a.test/`).
/// Strings that do not parse are returned unchanged.
fn normalize_url(url: &str) -> String {
    Url::parse(url).map_or_else(|_| url.to_string(), String::from)
}

/// Resolves a client-side target relative to the page that declared it.
fn join_target(base: &str, target: &str) -> Option<String> {
    let joined = match Url::parse(base) {
        Ok(base) => base.join(target),
        Err(_) => Url::parse(target),
    };
    joined.ok().map(String::from)
}

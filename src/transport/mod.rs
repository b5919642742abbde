//! HTTP transport for redirect resolution.
//!
//! A [`Transport`] performs one hop: it fetches a URL, follows server-side
//! (3xx) redirects, and reports the path it took together with the final body.

mod http;
mod request;

use async_trait::async_trait;

use crate::error_handling::FetchError;

pub use http::HttpTransport;

/// Outcome of one successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL the fetch finally landed on after server-side redirects
    pub final_url: String,
    /// URLs that answered with a redirect, in the order they were requested
    /// (the requested URL first, when it redirected)
    pub redirect_history: Vec<String>,
    /// Body of the final response
    pub body: String,
}

impl FetchedPage {
    /// A page served directly, without server-side redirects.
    pub fn direct(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            final_url: url.into(),
            redirect_history: Vec::new(),
            body: body.into(),
        }
    }

    /// Every URL this fetch visited: the redirect history followed by the final URL.
    pub fn visited_urls(&self) -> impl Iterator<Item = &str> {
        self.redirect_history
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.final_url.as_str()))
    }
}

/// One network round-trip with server-side redirect following.
///
/// Implementations must be safe to share across concurrent chains; the
/// connection pool is the only state they hold.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches `url`, following server-side redirects.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` on transport failure, timeout, an unparseable
    /// URL, or too many server-side redirects.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

// In-memory collaborators for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::crawler::Crawler;
use crate::error_handling::{FetchError, FetchErrorKind, RenderError};
use crate::transport::{FetchedPage, Transport};

/// Transport answering from a fixed table; unknown URLs fail to connect.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: HashMap<String, Result<FetchedPage, FetchError>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// `url` is served directly with `body`.
    pub(crate) fn page(mut self, url: &str, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), Ok(FetchedPage::direct(url, body)));
        self
    }

    /// `url` redirects server-side through `via` and lands on `final_url`.
    pub(crate) fn server_redirect(mut self, url: &str, via: &[&str], final_url: &str, body: &str) -> Self {
        let mut history = vec![url.to_string()];
        history.extend(via.iter().map(|u| u.to_string()));
        self.responses.insert(
            url.to_string(),
            Ok(FetchedPage {
                final_url: final_url.to_string(),
                redirect_history: history,
                body: body.to_string(),
            }),
        );
        self
    }

    /// `url` serves a script redirect stub pointing at `target`.
    pub(crate) fn script_redirect(self, url: &str, target: &str) -> Self {
        let body = format!(r#"<html><script>window.location.replace("{target}")</script></html>"#);
        self.page(url, &body)
    }

    pub(crate) fn failing(mut self, url: &str, error: FetchError) -> Self {
        self.responses.insert(url.to_string(), Err(error));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.calls.lock().expect("calls lock").push(url.to_string());
        self.responses.get(url).cloned().unwrap_or_else(|| {
            Err(FetchError::Transport {
                url: url.to_string(),
                kind: FetchErrorKind::Connect,
                message: "no scripted response".to_string(),
            })
        })
    }
}

/// Transport whose fetches never complete; counts fetches started and dropped.
#[derive(Default)]
pub(crate) struct HangingTransport {
    pub(crate) started: AtomicUsize,
    pub(crate) dropped: Arc<AtomicUsize>,
}

struct DropCounter(Arc<AtomicUsize>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transport for HangingTransport {
    async fn fetch(&self, _url: &str) -> Result<FetchedPage, FetchError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let _guard = DropCounter(Arc::clone(&self.dropped));
        std::future::pending().await
    }
}

/// Crawler returning fixed markup, or failing.
pub(crate) enum ScriptedCrawler {
    Markup(String),
    Unavailable(u16),
    Hanging,
}

#[async_trait]
impl Crawler for ScriptedCrawler {
    async fn render_search(&self, _query: &str) -> Result<String, RenderError> {
        match self {
            ScriptedCrawler::Markup(markup) => Ok(markup.clone()),
            ScriptedCrawler::Unavailable(status) => Err(RenderError::Status {
                status: *status,
                message: "render backend unavailable".to_string(),
            }),
            ScriptedCrawler::Hanging => std::future::pending().await,
        }
    }
}

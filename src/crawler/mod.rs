//! Crawler collaborator: renders the search results page for a query.
//!
//! Rendering (a headless browser turning the results page into text) happens
//! in an external service. [`RenderServiceCrawler`] is the HTTP client for it.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde::Serialize;

use crate::config::Config;
use crate::error_handling::{InitializationError, RenderError};
use crate::initialization::init_render_client;
use crate::utils::preview;

/// Source of rendered search markup.
#[async_trait]
pub trait Crawler: Send + Sync {
    /// Renders the results page for `query`.
    ///
    /// # Errors
    ///
    /// Returns a `RenderError` when the upstream render fails.
    async fn render_search(&self, query: &str) -> Result<String, RenderError>;
}

/// Body of a render request.
#[derive(Debug, Serialize)]
struct RenderRequest<'a> {
    url: &'a str,
    /// Relevance hint for the service's content filter
    content_filter_query: &'a str,
    ignore_images: bool,
}

/// Client for the page-render service.
#[derive(Debug, Clone)]
pub struct RenderServiceCrawler {
    client: Arc<reqwest::Client>,
    endpoint: String,
    search_url_template: String,
}

impl RenderServiceCrawler {
    pub fn new(
        client: Arc<reqwest::Client>,
        endpoint: impl Into<String>,
        search_url_template: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            search_url_template: search_url_template.into(),
        }
    }

    /// Builds the crawler and its client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let client = init_render_client(config)?;
        Ok(Self::new(
            client,
            config.render_endpoint.clone(),
            config.search_url_template.clone(),
        ))
    }

    /// The results page URL for `query`.
    pub fn search_url(&self, query: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        self.search_url_template.replace("{query}", &encoded)
    }
}

#[async_trait]
impl Crawler for RenderServiceCrawler {
    async fn render_search(&self, query: &str) -> Result<String, RenderError> {
        let search_url = self.search_url(query);
        debug!("Rendering {} via {}", search_url, self.endpoint);

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&RenderRequest {
                url: &search_url,
                content_filter_query: query,
                ignore_images: true,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(RenderError::Status {
                status: status.as_u16(),
                message: preview(&message, 200).to_string(),
            });
        }

        let markup = resp.text().await?;
        debug!("Rendered {} characters for {:?}", markup.chars().count(), query);
        Ok(markup)
    }
}

//! `reqwest`-backed transport.
//!
//! The client is built with redirects disabled so every 3xx hop can be
//! recorded; reqwest's own redirect policy does not expose the path it took.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Url;

use super::request::RequestHeaders;
use super::{FetchedPage, Transport};
use crate::config::Config;
use crate::error_handling::{fetch_error_from_reqwest, FetchError, InitializationError};
use crate::initialization::init_redirect_client;

/// Transport over a shared `reqwest::Client` (and its connection pool).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Arc<reqwest::Client>,
    max_redirects: usize,
    timeout: Duration,
}

impl HttpTransport {
    /// Wraps an existing client. The client must have redirects disabled.
    pub fn new(client: Arc<reqwest::Client>, max_redirects: usize, timeout: Duration) -> Self {
        Self {
            client,
            max_redirects,
            timeout,
        }
    }

    /// Builds the transport and its client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let client = init_redirect_client(config)?;
        Ok(Self::new(client, config.max_server_redirects, config.timeout()))
    }

    /// Follows 301/302/303/307/308 responses up to `max_redirects` times.
    async fn follow(&self, start_url: &str) -> Result<FetchedPage, FetchError> {
        let mut current = Url::parse(start_url).map_err(|e| FetchError::InvalidUrl {
            url: start_url.to_string(),
            message: e.to_string(),
        })?;
        let mut history: Vec<String> = Vec::new();

        loop {
            let resp = RequestHeaders::apply_to_request_builder(self.client.get(current.clone()))
                .send()
                .await
                .map_err(|e| fetch_error_from_reqwest(current.as_str(), e))?;

            let status_code = resp.status().as_u16();
            if matches!(status_code, 301 | 302 | 303 | 307 | 308) {
                if let Some(loc) = resp.headers().get(reqwest::header::LOCATION) {
                    if history.len() >= self.max_redirects {
                        return Err(FetchError::TooManyRedirects {
                            url: start_url.to_string(),
                            limit: self.max_redirects,
                        });
                    }
                    // Raw UTF-8 paths are not valid header text; join() percent-encodes them
                    let loc = String::from_utf8_lossy(loc.as_bytes());
                    // join() also accepts absolute locations
                    let next = current.join(&loc).map_err(|e| FetchError::InvalidUrl {
                        url: loc.to_string(),
                        message: e.to_string(),
                    })?;
                    debug!("HTTP {} redirect: {} -> {}", status_code, current, next);
                    history.push(current.to_string());
                    current = next;
                    continue;
                }
                warn!(
                    "Redirect status {} for {} but no Location header",
                    status_code, current
                );
            }

            let body = resp
                .text()
                .await
                .map_err(|e| fetch_error_from_reqwest(current.as_str(), e))?;

            return Ok(FetchedPage {
                final_url: current.to_string(),
                redirect_history: history,
                body,
            });
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        // The client timeout bounds each request; this bounds the whole hop
        match tokio::time::timeout(self.timeout, self.follow(url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(url.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    fn transport(max_redirects: usize) -> HttpTransport {
        let config = Config {
            timeout_seconds: 5,
            max_server_redirects: max_redirects,
            ..Default::default()
        };
        HttpTransport::from_config(&config).expect("Failed to create transport")
    }

    #[tokio::test]
    async fn test_direct_response_has_no_history() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/page"))
                .respond_with(status_code(200).body("<html>hello</html>")),
        );
        let url = server.url("/page").to_string();

        let page = transport(10).fetch(&url).await.expect("fetch should succeed");

        assert_eq!(page.final_url, url);
        assert!(page.redirect_history.is_empty());
        assert_eq!(page.body, "<html>hello</html>");
    }

    #[tokio::test]
    async fn test_server_redirects_are_recorded_in_order() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/a"))
                .respond_with(status_code(302).insert_header("Location", "/b")),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/b")).respond_with(
                status_code(301).insert_header("Location", server.url("/c").to_string()),
            ),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/c"))
                .respond_with(status_code(200).body("final")),
        );

        let page = transport(10)
            .fetch(&server.url("/a").to_string())
            .await
            .expect("fetch should succeed");

        assert_eq!(
            page.redirect_history,
            vec![server.url("/a").to_string(), server.url("/b").to_string()]
        );
        assert_eq!(page.final_url, server.url("/c").to_string());
        assert_eq!(page.body, "final");
    }

    #[tokio::test]
    async fn test_utf8_location_is_percent_encoded() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/a")).respond_with(
                status_code(302).insert_header(
                    "Location",
                    reqwest::header::HeaderValue::from_bytes("/文章".as_bytes())
                        .expect("header value"),
                ),
            ),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/%E6%96%87%E7%AB%A0"))
                .respond_with(status_code(200).body("article")),
        );

        let page = transport(3)
            .fetch(&server.url("/a").to_string())
            .await
            .expect("fetch should succeed");

        assert_eq!(page.final_url, server.url("/%E6%96%87%E7%AB%A0").to_string());
        assert_eq!(page.redirect_history, vec![server.url("/a").to_string()]);
        assert_eq!(page.body, "article");
    }

    #[tokio::test]
    async fn test_redirect_loop_hits_limit() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/loop"))
                .times(3)
                .respond_with(status_code(302).insert_header("Location", "/loop")),
        );

        let err = transport(2)
            .fetch(&server.url("/loop").to_string())
            .await
            .expect_err("loop should be cut off");

        assert!(matches!(err, FetchError::TooManyRedirects { limit: 2, .. }));
    }

    #[tokio::test]
    async fn test_redirect_without_location_is_final() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/odd"))
                .respond_with(status_code(302).body("no location")),
        );
        let url = server.url("/odd").to_string();

        let page = transport(10).fetch(&url).await.expect("fetch should succeed");

        assert_eq!(page.final_url, url);
        assert_eq!(page.body, "no location");
    }

    #[tokio::test]
    async fn test_invalid_url_is_reported() {
        let err = transport(10)
            .fetch("not a url")
            .await
            .expect_err("should not parse");
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_hop_timeout_is_reported_as_timeout() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/slow")).respond_with(
                delay_and_then(Duration::from_secs(3), status_code(200).body("late")),
            ),
        );
        let client = Arc::new(
            reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("Failed to create HTTP client"),
        );
        let transport = HttpTransport::new(client, 10, Duration::from_millis(200));
        let url = server.url("/slow").to_string();

        let err = transport.fetch(&url).await.expect_err("should time out");

        assert_eq!(err, FetchError::Timeout(url));
    }
}

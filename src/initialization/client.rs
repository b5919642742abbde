//! HTTP client initialization.
//!
//! This module provides functions to initialize the HTTP clients used for
//! redirect resolution and for talking to the render service.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use reqwest::ClientBuilder;

/// Initializes the shared HTTP client for redirect resolution.
///
/// Creates a `reqwest::Client` with redirects disabled so the transport can
/// follow 3xx responses itself and record every intermediate URL. The client
/// owns the connection pool shared by all chains and all concurrent searches.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_redirect_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes the HTTP client used to call the render service.
///
/// Uses the (longer) render timeout and the default redirect policy.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_render_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.render_timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

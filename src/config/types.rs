//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    CACHE_TTL_SECS, DEFAULT_MAX_CLIENT_HOPS, DEFAULT_RENDER_ENDPOINT,
    DEFAULT_RENDER_TIMEOUT_SECS, DEFAULT_SEARCH_URL_TEMPLATE, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT, MAX_SERVER_REDIRECTS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use search_digest::Config;
///
/// let config = Config {
///     max_client_hops: 5,
///     timeout_seconds: 5,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Per-fetch timeout in seconds (each redirect hop)
    pub timeout_seconds: u64,

    /// Timeout in seconds for the render request
    pub render_timeout_seconds: u64,

    /// Maximum client-side (script/meta refresh) hops per candidate link
    pub max_client_hops: usize,

    /// Maximum server-side 3xx redirects followed within one hop
    pub max_server_redirects: usize,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Endpoint of the page-render (crawler) service
    pub render_endpoint: String,

    /// Search URL template; `{query}` is substituted
    pub search_url_template: String,

    /// Directory of the result cache; `None` disables caching
    pub cache_dir: Option<PathBuf>,

    /// Result cache TTL in seconds
    pub cache_ttl_secs: u64,

    /// Resolve harvested links in parallel instead of one after another
    pub resolve_concurrently: bool,
}

impl Config {
    /// Per-fetch timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Render timeout as a `Duration`.
    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_seconds)
    }

    /// Cache TTL as a `Duration`.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            render_timeout_seconds: DEFAULT_RENDER_TIMEOUT_SECS,
            max_client_hops: DEFAULT_MAX_CLIENT_HOPS,
            max_server_redirects: MAX_SERVER_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            render_endpoint: DEFAULT_RENDER_ENDPOINT.to_string(),
            search_url_template: DEFAULT_SEARCH_URL_TEMPLATE.to_string(),
            cache_dir: None,
            cache_ttl_secs: CACHE_TTL_SECS,
            resolve_concurrently: true,
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Basic usage
/// search_digest "rust async runtime"
///
/// # Tighter timeouts, deeper client-side redirect following
/// search_digest "rust async runtime" --timeout-seconds 5 --max-client-hops 5
///
/// # Cache results on disk for a week
/// search_digest "rust async runtime" --cache-dir ./.search_cache
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "search_digest",
    about = "Distills the top search results for a query into a redirect-resolved digest."
)]
pub struct Opt {
    /// Search query
    pub query: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-fetch timeout in seconds for each redirect hop
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Timeout in seconds for the render request
    #[arg(long, default_value_t = DEFAULT_RENDER_TIMEOUT_SECS)]
    pub render_timeout_seconds: u64,

    /// Maximum client-side (script/meta refresh) hops per result link
    #[arg(long, default_value_t = DEFAULT_MAX_CLIENT_HOPS)]
    pub max_client_hops: usize,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Page-render service endpoint
    #[arg(long, env = "SEARCH_DIGEST_RENDER_ENDPOINT", default_value = DEFAULT_RENDER_ENDPOINT)]
    pub render_endpoint: String,

    /// Search URL template (`{query}` is substituted)
    #[arg(long, env = "SEARCH_DIGEST_SEARCH_URL", default_value = DEFAULT_SEARCH_URL_TEMPLATE)]
    pub search_url_template: String,

    /// Directory for the on-disk result cache (disabled when omitted)
    #[arg(long, env = "SEARCH_DIGEST_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Result cache TTL in seconds
    #[arg(long, default_value_t = CACHE_TTL_SECS)]
    pub cache_ttl_secs: u64,

    /// Resolve result links one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,
}

impl From<&Opt> for Config {
    fn from(opt: &Opt) -> Self {
        Self {
            log_level: opt.log_level.clone(),
            log_format: opt.log_format.clone(),
            timeout_seconds: opt.timeout_seconds,
            render_timeout_seconds: opt.render_timeout_seconds,
            max_client_hops: opt.max_client_hops,
            max_server_redirects: MAX_SERVER_REDIRECTS,
            user_agent: opt.user_agent.clone(),
            render_endpoint: opt.render_endpoint.clone(),
            search_url_template: opt.search_url_template.clone(),
            cache_dir: opt.cache_dir.clone(),
            cache_ttl_secs: opt.cache_ttl_secs,
            resolve_concurrently: !opt.sequential,
        }
    }
}

//! Configuration constants.
//!
//! This module defines the literal markers of the rendered results page, the
//! client-side redirect heuristics, and the operational defaults (timeouts,
//! hop limits, cache TTL) used throughout the pipeline.

// Results page markers
/// Text the search engine renders immediately before the organic results,
/// including the toolbar line that precedes it.
pub const RESULTS_HEADER_MARKER: &str = "时间不限所有网页和文件站点内检索\n百度为您找到以下结果";
/// Tail of [`RESULTS_HEADER_MARKER`], used when the toolbar line is missing
/// from the rendered markup.
pub const RESULTS_HEADER_MARKER_SHORT: &str = "百度为您找到以下结果";
/// Phrase that marks a preamble worth keeping ahead of the first result block.
pub const URL_NOT_FOUND_PHRASE: &str = "没有找到该URL。您可以直接访问";
/// "Related searches" footer; everything from here on is boilerplate.
pub const RELATED_SEARCHES_MARKER: &str = "大家还在搜";
/// Number of result blocks kept in a digest.
pub const MAX_RESULT_BLOCKS: usize = 3;

// Client-side redirect detection
/// Bodies longer than this (in characters, after whitespace collapse) are
/// treated as real content pages and never scanned for script redirects.
pub const SIMPLE_PAGE_MAX_CHARS: usize = 1500;

// Network operation timeouts
/// Per-fetch timeout in seconds for every redirect hop.
pub const DEFAULT_TIMEOUT_SECS: u64 = 7;
/// Timeout in seconds for the render request to the crawler service.
pub const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 60;

// Redirect handling
/// Maximum number of client-side (script/meta) hops per candidate link.
pub const DEFAULT_MAX_CLIENT_HOPS: usize = 3;
/// Maximum number of server-side (3xx) redirects followed within a single hop.
pub const MAX_SERVER_REDIRECTS: usize = 10;

// Crawler collaborator
/// Default endpoint of the page-render service.
pub const DEFAULT_RENDER_ENDPOINT: &str = "http://127.0.0.1:3000/render";
/// Search URL template; `{query}` is replaced with the percent-encoded query.
pub const DEFAULT_SEARCH_URL_TEMPLATE: &str = "https://www.baidu.com/s?wd={query}";

// Result cache
/// Default cache TTL: 7 days
pub const CACHE_TTL_SECS: u64 = 7 * 24 * 60 * 60;
/// Namespace prepended to every cache key.
pub const CACHE_NAMESPACE: &str = "search_digest";
/// Cache key prefix for distilled search results.
pub const SEARCH_CACHE_PREFIX: &str = "search";

/// Default User-Agent string for HTTP requests.
///
/// Mimics a desktop Chrome browser. Users can override this via the
/// `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

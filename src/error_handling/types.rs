//! Error type definitions.
//!
//! This module defines the error types used throughout the pipeline. Only
//! [`SearchError`] ever reaches the caller of a search; fetch failures are
//! absorbed by the redirect resolver and cache failures by the cache wrapper.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Category of a failed fetch, derived from the underlying `reqwest::Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FetchErrorKind {
    Builder,
    Connect,
    Request,
    Body,
    Decode,
    Redirect,
    Status,
    Other,
}

impl FetchErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchErrorKind::Builder => "request builder error",
            FetchErrorKind::Connect => "connect error",
            FetchErrorKind::Request => "request error",
            FetchErrorKind::Body => "body error",
            FetchErrorKind::Decode => "decode error",
            FetchErrorKind::Redirect => "redirect error",
            FetchErrorKind::Status => "status error",
            FetchErrorKind::Other => "other error",
        }
    }
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single network fetch (one redirect hop) failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The fetch did not complete within the configured timeout.
    #[error("Timed out fetching {0}")]
    Timeout(String),

    /// The transport reported a failure.
    #[error("HTTP {kind} fetching {url}: {message}")]
    Transport {
        url: String,
        kind: FetchErrorKind,
        message: String,
    },

    /// More server-side redirects than the configured limit.
    #[error("Too many redirects (limit {limit}) starting from {url}")]
    TooManyRedirects { url: String, limit: usize },

    /// The URL (or a `Location` header) could not be parsed.
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

/// The crawler collaborator could not render the results page.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The render request itself failed.
    #[error("Render request failed: {0}")]
    Request(#[from] ReqwestError),

    /// The render service answered with a non-success status.
    #[error("Render service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
}

/// A search could not produce a digest.
///
/// The message of this error is what callers see in `DistilledResult::error`.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The results page could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The search was cancelled by the caller.
    #[error("search cancelled")]
    Cancelled,
}

/// Error types for result cache operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Reading, writing, or deleting a cache entry failed.
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A cache entry could not be encoded or decoded.
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

//! Error categorization.
//!
//! Maps `reqwest` failures onto the crate's [`FetchError`] values so the
//! redirect resolver can treat every hop failure uniformly.

use super::types::{FetchError, FetchErrorKind};

/// Categorizes a `reqwest::Error` into a `FetchErrorKind`.
///
/// Timeouts are not a kind: they become [`FetchError::Timeout`] in
/// [`fetch_error_from_reqwest`].
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FetchErrorKind {
    if error.is_builder() {
        FetchErrorKind::Builder
    } else if error.is_redirect() {
        FetchErrorKind::Redirect
    } else if error.is_status() {
        FetchErrorKind::Status
    } else if error.is_connect() {
        FetchErrorKind::Connect
    } else if error.is_request() {
        FetchErrorKind::Request
    } else if error.is_body() {
        FetchErrorKind::Body
    } else if error.is_decode() {
        FetchErrorKind::Decode
    } else {
        FetchErrorKind::Other
    }
}

/// Converts a `reqwest::Error` raised while fetching `url` into a `FetchError`.
pub fn fetch_error_from_reqwest(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        return FetchError::Timeout(url.to_string());
    }
    FetchError::Transport {
        url: url.to_string(),
        kind: categorize_reqwest_error(&error),
        message: error.to_string(),
    }
}

//! Result record returned by a search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one search.
///
/// `search_result` is empty when the page had no results section, and also
/// when the search failed; only the latter sets `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistilledResult {
    pub query: String,
    /// The distilled, redirect-resolved digest.
    pub search_result: String,
    /// When the search was run (RFC 3339 in JSON).
    pub search_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DistilledResult {
    pub fn success(query: impl Into<String>, digest: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            search_result: digest.into(),
            search_time: Utc::now(),
            error: None,
        }
    }

    pub fn failure(query: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            search_result: String::new(),
            search_time: Utc::now(),
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

//! Digest rewriting: swap harvested URLs for their resolved destinations.

/// A harvested URL and the terminal URL its redirect chain resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub original_url: String,
    pub resolved_url: String,
}

impl ResolvedLink {
    pub fn new(original_url: impl Into<String>, resolved_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            resolved_url: resolved_url.into(),
        }
    }
}

/// Replaces every occurrence of each original URL with its resolved URL.
///
/// Pairs are applied in order to the progressively rewritten text, as literal
/// substring replacements. A resolved URL that contains a later pair's
/// original URL is rewritten again by that later pair, and running the
/// rewrite twice is not idempotent in that case. Both are accepted behavior.
pub fn rewrite_digest(digest: &str, links: &[ResolvedLink]) -> String {
    let mut rewritten = digest.to_string();
    for link in links {
        if link.original_url.is_empty() || link.original_url == link.resolved_url {
            continue;
        }
        rewritten = rewritten.replace(&link.original_url, &link.resolved_url);
    }
    rewritten
}

//! Link harvesting: the leading link of every digest block.

use regex::Regex;
use std::sync::LazyLock;

use crate::extract::BLOCK_MARK_RE;
use crate::utils::compile_regex_unsafe;

/// A block header (possibly followed by a line break) immediately followed by
/// `[text](url)`; captures the URL.
const LEADING_LINK_PATTERN: &str = r"(?m)^###\s*\n?\[.*?\]\((.*?)\)";

static LEADING_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(LEADING_LINK_PATTERN, "LEADING_LINK_RE"));

/// A link harvested from a digest block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    /// URL exactly as it appears in the digest
    pub original_url: String,
    /// Zero-based index of the block the link leads
    pub block_index: usize,
}

/// Harvests the leading link of every block in a digest, in block order.
///
/// Only a link that opens the block (on the header line, or on the line right
/// after an empty header) counts; links deeper in a body are ignored. The same
/// URL leading two blocks is returned twice.
pub fn harvest_links(digest: &str) -> Vec<CandidateLink> {
    LEADING_LINK_RE
        .captures_iter(digest)
        .filter_map(|caps| {
            let header_start = caps.get(0)?.start();
            let url = caps.get(1)?.as_str();
            let block_index = BLOCK_MARK_RE
                .find_iter(&digest[..header_start])
                .count();
            Some(CandidateLink {
                original_url: url.to_string(),
                block_index,
            })
        })
        .collect()
}

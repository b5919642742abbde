//! Boundary extraction: raw rendered markup to a compact digest.
//!
//! The rendered results page is noisy (navigation, ads, "related searches").
//! The digest keeps only the organic results section, at most
//! [`MAX_RESULT_BLOCKS`] `### ` blocks, each cut right after its first link.
//!
//! Missing structure never fails: no header marker yields an empty digest, and
//! content without block marks is returned as a single unstructured block.

use log::debug;
use regex::Regex;
use std::sync::LazyLock;

use crate::config::{
    MAX_RESULT_BLOCKS, RELATED_SEARCHES_MARKER, RESULTS_HEADER_MARKER,
    RESULTS_HEADER_MARKER_SHORT, URL_NOT_FOUND_PHRASE,
};
use crate::utils::compile_regex_unsafe;

/// Start of a result block: `### ` at the beginning of a line.
pub(crate) const BLOCK_MARK_PATTERN: &str = r"(?m)^### ";
const EMPTY_HEADER_PATTERN: &str = r"(?m)^###\s*\n";
const HEADER_LINE_PATTERN: &str = r"(?m)^### .*$";
const LINK_PATTERN: &str = r"\[([^\]]+)\]\(([^\)]+)\)";

pub(crate) static BLOCK_MARK_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(BLOCK_MARK_PATTERN, "BLOCK_MARK_RE"));
static EMPTY_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(EMPTY_HEADER_PATTERN, "EMPTY_HEADER_RE"));
static HEADER_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(HEADER_LINE_PATTERN, "HEADER_LINE_RE"));
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(LINK_PATTERN, "LINK_RE"));

/// Extracts the digest of the top results from raw rendered markup.
///
/// Steps:
/// 1. Drop everything up to and including the results header marker
///    (empty digest if the marker is absent)
/// 2. Drop the preamble before the first block, unless it carries the
///    "URL not found, visit directly" notice
/// 3. Fold an empty `###` header line into the line that follows it
/// 4. Keep the first [`MAX_RESULT_BLOCKS`] blocks
/// 5. Cut at the "related searches" footer
/// 6. Cut each block body right after its first `[text](url)` link
///
/// # Arguments
///
/// * `raw` - The rendered page text returned by the crawler
///
/// # Returns
///
/// The digest, trimmed of surrounding whitespace. Possibly empty.
pub fn extract_digest(raw: &str) -> String {
    let Some(content) = strip_to_results(raw) else {
        debug!("Results header marker not found in {} bytes of markup", raw.len());
        return String::new();
    };

    let content = drop_preamble(content);
    let content = EMPTY_HEADER_RE.replace_all(content, "### ");
    let content = keep_first_blocks(&content, MAX_RESULT_BLOCKS);
    let content = cut_footer(content);

    trim_blocks_to_first_link(content).trim().to_string()
}

/// Returns the text after the results header marker, trimmed.
///
/// The full marker is tried first so its tail never leaks into the digest.
fn strip_to_results(raw: &str) -> Option<&str> {
    [RESULTS_HEADER_MARKER, RESULTS_HEADER_MARKER_SHORT]
        .iter()
        .find_map(|marker| raw.find(marker).map(|idx| &raw[idx + marker.len()..]))
        .map(str::trim)
}

fn drop_preamble(content: &str) -> &str {
    match BLOCK_MARK_RE.find(content) {
        Some(first) if !content[..first.start()].contains(URL_NOT_FOUND_PHRASE) => {
            &content[first.start()..]
        }
        _ => content,
    }
}

fn keep_first_blocks(content: &str, max_blocks: usize) -> &str {
    match BLOCK_MARK_RE.find_iter(content).nth(max_blocks) {
        Some(cutoff) => content[..cutoff.start()].trim(),
        None => content,
    }
}

fn cut_footer(content: &str) -> &str {
    match content.find(RELATED_SEARCHES_MARKER) {
        Some(idx) => content[..idx].trim(),
        None => content,
    }
}

/// Rebuilds the content header by header, cutting every body after its first link.
fn trim_blocks_to_first_link(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut last = 0;

    for header in HEADER_LINE_RE.find_iter(content) {
        out.push_str(trim_body(&content[last..header.start()]));
        out.push_str(header.as_str());
        last = header.end();
    }
    out.push_str(trim_body(&content[last..]));

    out
}

/// Keeps `body` up to the end of the line holding its first link.
fn trim_body(body: &str) -> &str {
    if body.trim().is_empty() {
        return body;
    }
    let Some(link) = LINK_RE.find(body) else {
        return body;
    };
    match body[link.end()..].find('\n') {
        Some(offset) => &body[..link.end() + offset + 1],
        None => &body[..link.end()],
    }
}

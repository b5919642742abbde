//! Text helpers.

use std::sync::LazyLock;

use regex::Regex;

use super::compile_regex_unsafe;

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"\s+", "WHITESPACE_RUN_RE"));

/// Trims `text` and collapses every run of whitespace into a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN_RE.replace_all(text.trim(), " ").into_owned()
}

/// Returns at most `max_chars` characters of `text`, for log messages.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

//! Client-side redirect detection (script `location` assignments and meta refresh).

use regex::Regex;
use std::sync::LazyLock;

use crate::config::SIMPLE_PAGE_MAX_CHARS;
use crate::utils::{collapse_whitespace, compile_regex_unsafe};

const LOCATION_REPLACE_PATTERN: &str =
    r#"(?i)(?:window\.)?location\.replace\(["']([^"']+)["']\)"#;
const LOCATION_HREF_PATTERN: &str = r#"(?i)(?:window\.)?location\.href\s*=\s*["']([^"']+)["']"#;
const LOCATION_ASSIGN_PATTERN: &str = r#"(?i)(?:window\.)?location\s*=\s*["']([^"']+)["']"#;
const META_REFRESH_PATTERN: &str =
    r#"(?i)<meta[^>]+http-equiv=["']refresh["'][^>]+url=([^"'\s>]+)"#;

static LOCATION_REPLACE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(LOCATION_REPLACE_PATTERN, "LOCATION_REPLACE_RE"));
static LOCATION_HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(LOCATION_HREF_PATTERN, "LOCATION_HREF_RE"));
static LOCATION_ASSIGN_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(LOCATION_ASSIGN_PATTERN, "LOCATION_ASSIGN_RE"));
static META_REFRESH_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(META_REFRESH_PATTERN, "META_REFRESH_RE"));

/// What a hop's final body says about the next hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ClientRedirect {
    /// Too long to be a redirect stub; a real content page.
    ContentPage,
    /// Short page without any redirect instruction.
    None,
    /// Redirect target exactly as written in the page.
    Target(String),
}

/// Inspects a response body for a client-side redirect.
///
/// The body is whitespace-collapsed first. Anything longer than
/// [`SIMPLE_PAGE_MAX_CHARS`] is a content page no matter what it contains.
/// Patterns are tried in priority order and the first match wins:
/// `location.replace(..)`, `location.href = ..`, `location = ..`, then
/// `<meta http-equiv="refresh" ... url=..>`.
pub(crate) fn detect_client_redirect(body: &str) -> ClientRedirect {
    let compact = collapse_whitespace(body);
    if compact.chars().count() > SIMPLE_PAGE_MAX_CHARS {
        return ClientRedirect::ContentPage;
    }

    [
        &LOCATION_REPLACE_RE,
        &LOCATION_HREF_RE,
        &LOCATION_ASSIGN_RE,
        &META_REFRESH_RE,
    ]
    .iter()
    .find_map(|re| re.captures(&compact))
    .and_then(|caps| caps.get(1))
    .map_or(ClientRedirect::None, |target| {
        ClientRedirect::Target(target.as_str().to_string())
    })
}

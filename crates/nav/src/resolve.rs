//! Free-text vs URL classification for address-bar input.
//!
//! Classification never fails: anything that does not look like the home
//! sentinel or a URL degrades to a search-engine query. The heuristics are
//! intentionally those of the mobile UI they model — a dot followed by two
//! lowercase letters anywhere in the token counts as "domain-like", so a
//! query such as `hello.world foo` is classified as a URL. That ambiguity is
//! reproduced, not fixed.

use crate::engines::SearchEngine;

/// The reserved marker URL for the browser's start page.
pub const HOME_URL: &str = "about:home";

/// What a piece of address-bar input turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// The home sentinel (`home` or `about:home`).
    Home,
    /// Already-qualified URL, or something domain-like enough to become one.
    Url,
    /// Free text destined for the active search engine.
    Query,
}

/// Classify raw input into one of the three navigation buckets.
pub fn classify(input: &str) -> InputKind {
    let input = input.trim();

    if input == "home" || input == HOME_URL {
        return InputKind::Home;
    }
    if input.starts_with("http://")
        || input.starts_with("https://")
        || input.starts_with("about:")
        || is_localhost(input)
        || has_dotted_suffix(input)
    {
        return InputKind::Url;
    }
    InputKind::Query
}

/// Resolve raw input into the URL that actually gets navigated to.
///
/// URLs without a scheme get `https://` prepended; free text is
/// percent-encoded into the active engine's template.
pub fn resolve_input(input: &str, engine: &SearchEngine) -> String {
    let input = input.trim();

    match classify(input) {
        InputKind::Home => HOME_URL.to_string(),
        InputKind::Url => {
            if input.starts_with("http://")
                || input.starts_with("https://")
                || input.starts_with("about:")
            {
                input.to_string()
            } else {
                format!("https://{}", input)
            }
        }
        InputKind::Query => engine.search_url(input),
    }
}

/// A dot followed by at least two lowercase letters, anywhere in the token.
fn has_dotted_suffix(input: &str) -> bool {
    input
        .as_bytes()
        .windows(3)
        .any(|w| w[0] == b'.' && w[1].is_ascii_lowercase() && w[2].is_ascii_lowercase())
}

/// `localhost`, optionally with a numeric port and/or a path.
fn is_localhost(input: &str) -> bool {
    let rest = match input.strip_prefix("localhost") {
        Some(rest) => rest,
        None => return false,
    };
    if rest.is_empty() {
        return true;
    }
    let rest = match rest.strip_prefix(':') {
        Some(port) => {
            let end = port.find('/').unwrap_or(port.len());
            if end == 0 || !port[..end].bytes().all(|b| b.is_ascii_digit()) {
                return false;
            }
            &port[end..]
        }
        None => rest,
    };
    rest.is_empty() || rest.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_by_name;

    #[test]
    fn test_home_sentinel_forms() {
        assert_eq!(classify("home"), InputKind::Home);
        assert_eq!(classify("about:home"), InputKind::Home);
        assert_eq!(classify(" about:home "), InputKind::Home);
    }

    #[test]
    fn test_qualified_urls() {
        assert_eq!(classify("https://example.com"), InputKind::Url);
        assert_eq!(classify("http://example.com/path"), InputKind::Url);
        assert_eq!(classify("about:blank"), InputKind::Url);
    }

    #[test]
    fn test_domain_like_tokens() {
        assert_eq!(classify("example.com"), InputKind::Url);
        assert_eq!(classify("news.ycombinator.com"), InputKind::Url);
        assert_eq!(classify("localhost"), InputKind::Url);
        assert_eq!(classify("localhost:3000/app"), InputKind::Url);
    }

    #[test]
    fn test_free_text_queries() {
        assert_eq!(classify("google"), InputKind::Query);
        assert_eq!(classify("weather in tokyo"), InputKind::Query);
        assert_eq!(classify("rust 1.7"), InputKind::Query);
    }

    #[test]
    fn test_known_misclassification_is_reproduced() {
        // The dotted-suffix heuristic fires on any dot + two lowercase
        // letters, so this query is (wrongly but faithfully) a URL.
        assert_eq!(classify("hello.world foo"), InputKind::Url);
    }

    #[test]
    fn test_resolve_prepends_scheme() {
        let engine = engine_by_name(None);
        assert_eq!(resolve_input("example.com", engine), "https://example.com");
        assert_eq!(
            resolve_input("https://example.com", engine),
            "https://example.com"
        );
    }

    #[test]
    fn test_resolve_routes_queries_to_engine() {
        let engine = engine_by_name(Some("DuckDuckGo"));
        assert_eq!(
            resolve_input("google", engine),
            "https://duckduckgo.com/?q=google"
        );
        assert_eq!(
            resolve_input("rust & wasm", engine),
            "https://duckduckgo.com/?q=rust%20%26%20wasm"
        );
    }

    #[test]
    fn test_localhost_variants() {
        assert!(is_localhost("localhost"));
        assert!(is_localhost("localhost:8080"));
        assert!(is_localhost("localhost/index.html"));
        assert!(is_localhost("localhost:8080/index.html"));
        assert!(!is_localhost("localhost:abc"));
        assert!(!is_localhost("localhostile"));
    }
}

//! The fixed search-engine registry.
//!
//! Each engine carries a URL template with a single `%s` placeholder and a
//! short icon glyph for the UI. The chosen engine is persisted by name; an
//! absent or unknown stored name falls back to the first entry.

/// Placeholder token in a search URL template.
const QUERY_PLACEHOLDER: &str = "%s";

/// A search engine the address bar can route free-text queries to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchEngine {
    pub name: &'static str,
    /// URL template containing exactly one `%s` placeholder.
    pub url_template: &'static str,
    /// Short glyph shown next to the engine name.
    pub icon: &'static str,
}

impl SearchEngine {
    /// Build the search URL for a free-text query, percent-encoding it into
    /// the template's placeholder.
    pub fn search_url(&self, query: &str) -> String {
        self.url_template
            .replacen(QUERY_PLACEHOLDER, &urlencoding::encode(query), 1)
    }
}

/// The registry. Order matters: the first entry is the default.
pub const SEARCH_ENGINES: &[SearchEngine] = &[
    SearchEngine {
        name: "Google",
        url_template: "https://www.google.com/search?q=%s",
        icon: "G",
    },
    SearchEngine {
        name: "Bing",
        url_template: "https://www.bing.com/search?q=%s",
        icon: "B",
    },
    SearchEngine {
        name: "DuckDuckGo",
        url_template: "https://duckduckgo.com/?q=%s",
        icon: "D",
    },
    SearchEngine {
        name: "Baidu",
        url_template: "https://www.baidu.com/s?wd=%s",
        icon: "百度",
    },
    SearchEngine {
        name: "Yahoo",
        url_template: "https://search.yahoo.com/search?p=%s",
        icon: "Y!",
    },
];

/// Look an engine up by its persisted name, falling back to the default when
/// the name is absent or unrecognized.
pub fn engine_by_name(name: Option<&str>) -> &'static SearchEngine {
    name.and_then(|n| SEARCH_ENGINES.iter().find(|e| e.name == n))
        .unwrap_or(&SEARCH_ENGINES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_has_exactly_one_placeholder() {
        for engine in SEARCH_ENGINES {
            assert_eq!(
                engine.url_template.matches(QUERY_PLACEHOLDER).count(),
                1,
                "engine {} must carry exactly one placeholder",
                engine.name
            );
        }
    }

    #[test]
    fn test_search_url_percent_encodes_query() {
        let engine = engine_by_name(Some("Google"));
        assert_eq!(
            engine.search_url("rust programming"),
            "https://www.google.com/search?q=rust%20programming"
        );
    }

    #[test]
    fn test_lookup_falls_back_to_default() {
        assert_eq!(engine_by_name(None).name, "Google");
        assert_eq!(engine_by_name(Some("AltaVista")).name, "Google");
        assert_eq!(engine_by_name(Some("DuckDuckGo")).name, "DuckDuckGo");
    }
}

//! The navigation controller: current URL, history, derived title, and the
//! simulated load-status signal.
//!
//! The controller is purely synchronous. Every cursor change hands back a
//! [`LoadTicket`] carrying a generation token; the host schedules the
//! simulated latency window however it likes and calls [`NavigationController::settle`]
//! when it elapses. A token that is no longer current is dropped, so a
//! superseded navigation can never overwrite the state of a newer one.

use std::time::Duration;

use url::Url;

use crate::engines::SearchEngine;
use crate::history::HistoryStack;
use crate::media::{detect_media, VideoResource, DEMO_VIDEO_TITLE};
use crate::resolve::{resolve_input, HOME_URL};

/// Simulated page-load latency window.
pub const LOAD_LATENCY: Duration = Duration::from_millis(1500);

/// Fixed title for the home surface.
pub const HOME_TITLE: &str = "DroidWeb AI - Home";

/// Load state of the current entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Error,
}

/// Handed out on every cursor change; the token must come back through
/// [`NavigationController::settle`] for the load to complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub token: u64,
    pub url: String,
}

/// Owns the history stack, the derived per-page state, and the generation
/// counter guarding stale load completions.
#[derive(Debug, Clone)]
pub struct NavigationController {
    history: HistoryStack,
    title: String,
    status: LoadStatus,
    media: Vec<VideoResource>,
    generation: u64,
}

impl NavigationController {
    /// A fresh session: history seeded with the home sentinel, idle.
    pub fn new() -> Self {
        Self {
            history: HistoryStack::new(HOME_URL),
            title: page_title(HOME_URL),
            status: LoadStatus::Idle,
            media: Vec::new(),
            generation: 0,
        }
    }

    /// Resolve address-bar input and navigate to it.
    ///
    /// Truncates any forward history, appends the resolved URL, and starts a
    /// new load (status `Loading`, media cleared, fresh generation).
    pub fn navigate(&mut self, input: &str, engine: &SearchEngine) -> LoadTicket {
        let url = resolve_input(input, engine);
        self.history.push(url);
        self.begin_load()
    }

    /// Step back in history. No-op at the first entry.
    pub fn back(&mut self) -> Option<LoadTicket> {
        self.history.back().then(|| self.begin_load())
    }

    /// Step forward in history. No-op at the tail.
    pub fn forward(&mut self) -> Option<LoadTicket> {
        self.history.forward().then(|| self.begin_load())
    }

    /// Navigate to the home sentinel.
    pub fn home(&mut self, engine: &SearchEngine) -> LoadTicket {
        self.navigate(HOME_URL, engine)
    }

    /// Re-navigate to the current URL. Like the address-bar refresh it
    /// models, this appends a fresh history entry.
    pub fn reload(&mut self, engine: &SearchEngine) -> LoadTicket {
        let current = self.history.current().to_string();
        self.navigate(&current, engine)
    }

    /// Complete the simulated latency window for `token`.
    ///
    /// Only the most recent navigation's token is honored; anything older
    /// returns `false` and leaves all state untouched.
    pub fn settle(&mut self, token: u64) -> bool {
        if token != self.generation {
            log::debug!("dropping stale load completion (token {})", token);
            return false;
        }
        self.status = LoadStatus::Loaded;
        self.media = detect_media(self.history.current());
        true
    }

    fn begin_load(&mut self) -> LoadTicket {
        let url = self.history.current().to_string();
        self.title = page_title(&url);
        self.status = LoadStatus::Loading;
        self.media.clear();
        self.generation += 1;
        log::info!("navigating to {}", url);
        LoadTicket {
            token: self.generation,
            url,
        }
    }

    pub fn current_url(&self) -> &str {
        self.history.current()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// Media detected on the current page (empty until the load settles).
    pub fn media(&self) -> &[VideoResource] {
        &self.media
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn is_home(&self) -> bool {
        self.history.current() == HOME_URL
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}

/// Title derived from the current URL.
///
/// Home gets the fixed home title, the demo clip its fixed title; anything
/// else shows its hostname with a leading `www.` stripped, falling back to
/// the raw URL string when no hostname can be parsed out.
fn page_title(url: &str) -> String {
    if url == HOME_URL {
        return HOME_TITLE.to_string();
    }
    if url.contains("flower.mp4") {
        return DEMO_VIDEO_TITLE.to_string();
    }
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
            None => url.to_string(),
        },
        Err(_) => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_by_name;
    use crate::media::DEMO_VIDEO_URL;

    fn controller() -> NavigationController {
        NavigationController::new()
    }

    #[test]
    fn test_cursor_tracks_tail_across_navigations() {
        let engine = engine_by_name(None);
        let mut nav = controller();

        for input in ["example.com", "rust lang", "news.ycombinator.com"] {
            nav.navigate(input, engine);
            assert_eq!(nav.history().cursor(), nav.history().len() - 1);
        }
    }

    #[test]
    fn test_back_then_forward_restores_url_and_cursor() {
        let engine = engine_by_name(None);
        let mut nav = controller();
        nav.navigate("a.com", engine);
        nav.navigate("b.com", engine);

        let cursor_before = nav.history().cursor();
        let url_before = nav.current_url().to_string();

        assert!(nav.back().is_some());
        assert!(nav.forward().is_some());
        assert_eq!(nav.current_url(), url_before);
        assert_eq!(nav.history().cursor(), cursor_before);
    }

    #[test]
    fn test_navigating_off_tail_truncates_forward_entries() {
        let engine = engine_by_name(None);
        let mut nav = controller();
        nav.navigate("a.com", engine);
        nav.navigate("b.com", engine);
        nav.navigate("c.com", engine);

        nav.back();
        nav.back();
        assert_eq!(nav.current_url(), "https://a.com");

        nav.navigate("d.com", engine);
        assert_eq!(nav.history().len(), 3); // home, a, d
        assert_eq!(nav.current_url(), "https://d.com");
        assert!(nav.forward().is_none());
    }

    #[test]
    fn test_free_text_routes_through_active_engine() {
        let engine = engine_by_name(Some("Google"));
        let mut nav = controller();
        nav.navigate("google", engine);
        assert_eq!(nav.current_url(), "https://www.google.com/search?q=google");
    }

    #[test]
    fn test_domain_gets_scheme_prepended() {
        let engine = engine_by_name(None);
        let mut nav = controller();
        nav.navigate("example.com", engine);
        assert_eq!(nav.current_url(), "https://example.com");
    }

    #[test]
    fn test_home_resets_title_and_media() {
        let engine = engine_by_name(None);
        let mut nav = controller();

        let ticket = nav.navigate(&format!("{}?demo=true", DEMO_VIDEO_URL), engine);
        assert!(nav.settle(ticket.token));
        assert!(!nav.media().is_empty());
        assert_eq!(nav.title(), DEMO_VIDEO_TITLE);

        nav.home(engine);
        assert_eq!(nav.title(), HOME_TITLE);
        assert!(nav.media().is_empty());
        assert!(nav.is_home());
    }

    #[test]
    fn test_title_strips_www_prefix() {
        let engine = engine_by_name(None);
        let mut nav = controller();
        nav.navigate("https://www.wikipedia.org/wiki/Rust", engine);
        assert_eq!(nav.title(), "wikipedia.org");
    }

    #[test]
    fn test_title_falls_back_to_raw_url() {
        let engine = engine_by_name(None);
        let mut nav = controller();
        nav.navigate("about:blank", engine);
        assert_eq!(nav.title(), "about:blank");
    }

    #[test]
    fn test_stale_settle_is_dropped() {
        let engine = engine_by_name(None);
        let mut nav = controller();

        let first = nav.navigate(&format!("{}?demo=true", DEMO_VIDEO_URL), engine);
        let second = nav.navigate("example.com", engine);

        // The first navigation's window fires after the second superseded it.
        assert!(!nav.settle(first.token));
        assert_eq!(nav.status(), LoadStatus::Loading);
        assert!(nav.media().is_empty());

        assert!(nav.settle(second.token));
        assert_eq!(nav.status(), LoadStatus::Loaded);
        // The demo fixture from the superseded page must not leak through.
        assert!(nav.media().is_empty());
    }

    #[test]
    fn test_back_and_forward_restart_the_load() {
        let engine = engine_by_name(None);
        let mut nav = controller();
        let ticket = nav.navigate("example.com", engine);
        nav.settle(ticket.token);
        assert_eq!(nav.status(), LoadStatus::Loaded);

        let back = nav.back().expect("can go back");
        assert_eq!(nav.status(), LoadStatus::Loading);
        assert!(nav.settle(back.token));
        assert_eq!(nav.status(), LoadStatus::Loaded);
    }

    #[test]
    fn test_reload_appends_history_entry() {
        let engine = engine_by_name(None);
        let mut nav = controller();
        nav.navigate("example.com", engine);
        let len_before = nav.history().len();

        nav.reload(engine);
        assert_eq!(nav.history().len(), len_before + 1);
        assert_eq!(nav.current_url(), "https://example.com");
    }
}

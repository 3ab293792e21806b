//! The fixed bookmark strip shown in desktop device mode.

/// A bookmark on the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bookmark {
    pub name: &'static str,
    pub url: &'static str,
    /// Short glyph or emoji rendered before the name.
    pub icon: &'static str,
}

/// Demonstration bookmarks; there is no bookmark editor in this UI.
pub const DEFAULT_BOOKMARKS: &[Bookmark] = &[
    Bookmark {
        name: "Google",
        url: "https://google.com",
        icon: "G",
    },
    Bookmark {
        name: "YouTube",
        url: "https://youtube.com",
        icon: "YT",
    },
    Bookmark {
        name: "GitHub",
        url: "https://github.com",
        icon: "</>",
    },
    Bookmark {
        name: "AI News",
        url: "https://news.google.com/topics/CAAqJggKIiBDQkFTRWdvSUwyMHZNRGRqTVhZU0FtVnVHZ0pWVXlnQVAB",
        icon: "🤖",
    },
    Bookmark {
        name: "React Docs",
        url: "https://react.dev",
        icon: "⚛️",
    },
];

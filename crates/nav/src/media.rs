//! Detected-media descriptors and the demo-detection fixture.
//!
//! There is no real content inspection: detection is a fixed fixture keyed on
//! a marker substring in the URL, which is all the simulated UI needs.

use serde::{Deserialize, Serialize};

/// URL of the bundled demo clip.
pub const DEMO_VIDEO_URL: &str =
    "https://interactive-examples.mdn.mozilla.net/media/cc0-videos/flower.mp4";

/// Title shown for the demo clip.
pub const DEMO_VIDEO_TITLE: &str = "Flower Blooming (Demo)";

/// A media resource "detected" on the current page, offered for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResource {
    pub id: String,
    /// Where the bytes live.
    pub url: String,
    pub title: String,
    /// Human-readable size, when known.
    pub size: Option<String>,
    pub mime_type: String,
}

/// The demo fixture: a URL carrying the demo marker yields the single
/// synthetic resource, anything else yields nothing.
pub fn detect_media(url: &str) -> Vec<VideoResource> {
    if url.contains("flower") || url.contains("demo") {
        vec![VideoResource {
            id: "demo-vid-1".to_string(),
            url: DEMO_VIDEO_URL.to_string(),
            title: DEMO_VIDEO_TITLE.to_string(),
            size: Some("2.4 MB".to_string()),
            mime_type: "video/mp4".to_string(),
        }]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_marker_triggers_fixture() {
        let detected = detect_media("https://example.com/?demo=true");
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].id, "demo-vid-1");
        assert_eq!(detected[0].url, DEMO_VIDEO_URL);
    }

    #[test]
    fn test_plain_urls_detect_nothing() {
        assert!(detect_media("https://example.com").is_empty());
        assert!(detect_media("about:home").is_empty());
    }
}

//! The staged-version update channel.
//!
//! A newer build announces itself by writing its version string into a marker
//! file under the config directory. The notifier is a single-slot channel
//! over that file: the host polls it, the banner shows while the slot is
//! full, and accepting the update consumes the slot, removes the marker, and
//! lets the host perform its full reload.

use std::path::PathBuf;

const MARKER_FILE: &str = "staged-version";

/// Single-slot staged-version signal.
#[derive(Debug)]
pub struct UpdateNotifier {
    marker: Option<PathBuf>,
    staged: Option<String>,
}

impl UpdateNotifier {
    pub fn new() -> Self {
        let marker = dirs::config_dir().map(|dir| dir.join("droidweb").join(MARKER_FILE));
        Self {
            marker,
            staged: None,
        }
    }

    /// A notifier bound to an explicit marker path.
    pub fn with_marker(marker: PathBuf) -> Self {
        Self {
            marker: Some(marker),
            staged: None,
        }
    }

    /// Poll the marker. Once a staged version has been picked up it stays in
    /// the slot until accepted; the marker is only re-read while the slot is
    /// empty.
    pub fn check(&mut self) -> Option<&str> {
        if self.staged.is_none() {
            if let Some(marker) = &self.marker {
                if let Ok(contents) = std::fs::read_to_string(marker) {
                    let version = contents.trim();
                    if !version.is_empty() {
                        log::info!("new version staged: {}", version);
                        self.staged = Some(version.to_string());
                    }
                }
            }
        }
        self.staged.as_deref()
    }

    /// The version currently occupying the slot, if any.
    pub fn staged(&self) -> Option<&str> {
        self.staged.as_deref()
    }

    /// Accept the staged version: consume the slot and remove the marker so
    /// the same version is not announced again after the reload.
    pub fn accept(&mut self) -> Option<String> {
        let version = self.staged.take()?;
        if let Some(marker) = &self.marker {
            if let Err(err) = std::fs::remove_file(marker) {
                log::warn!("could not clear update marker: {}", err);
            }
        }
        Some(version)
    }
}

impl Default for UpdateNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_marker(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("droidweb-{}-{}", tag, std::process::id()))
    }

    #[test]
    fn test_slot_fills_once_and_accept_consumes() {
        let marker = temp_marker("update");
        std::fs::write(&marker, "1.6.0\n").unwrap();

        let mut notifier = UpdateNotifier::with_marker(marker.clone());
        assert_eq!(notifier.check(), Some("1.6.0"));
        assert_eq!(notifier.staged(), Some("1.6.0"));
        // Polling again does not duplicate the announcement.
        assert_eq!(notifier.check(), Some("1.6.0"));

        assert_eq!(notifier.accept(), Some("1.6.0".to_string()));
        assert_eq!(notifier.staged(), None);
        assert!(!marker.exists());
        assert_eq!(notifier.accept(), None);
    }

    #[test]
    fn test_missing_marker_stays_empty() {
        let mut notifier = UpdateNotifier::with_marker(temp_marker("absent"));
        assert_eq!(notifier.check(), None);
        assert_eq!(notifier.accept(), None);
    }
}

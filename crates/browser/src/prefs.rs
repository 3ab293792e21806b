//! Persisted user preferences.
//!
//! Preferences are an explicit struct carried by the application, loaded once
//! at startup and written on every change. The stored values are opaque
//! strings; absent or unrecognized values fall back to defined defaults
//! (dark theme, mobile view, mobile device, first search engine), so a stale
//! or hand-edited file can never break startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use droidweb_nav::{engine_by_name, SearchEngine};

use crate::theme::ThemeChoice;

/// Rendering-width hint for the embedded content surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Mobile,
    Desktop,
}

impl ViewMode {
    pub fn key(self) -> &'static str {
        match self {
            ViewMode::Mobile => "mobile",
            ViewMode::Desktop => "desktop",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "desktop" => ViewMode::Desktop,
            _ => ViewMode::Mobile,
        }
    }
}

/// Overall chrome layout: phone-style bottom navigation vs desktop toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceMode {
    Mobile,
    Desktop,
}

impl DeviceMode {
    pub fn key(self) -> &'static str {
        match self {
            DeviceMode::Mobile => "mobile",
            DeviceMode::Desktop => "desktop",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "desktop" => DeviceMode::Desktop,
            _ => DeviceMode::Mobile,
        }
    }
}

/// The persisted preference set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    theme: String,
    #[serde(default)]
    view_mode: String,
    #[serde(default)]
    device_mode: String,
    #[serde(default)]
    search_engine: String,
}

impl Preferences {
    pub fn theme(&self) -> ThemeChoice {
        ThemeChoice::from_key(&self.theme)
    }

    pub fn set_theme(&mut self, theme: ThemeChoice) {
        self.theme = theme.key().to_string();
    }

    pub fn view_mode(&self) -> ViewMode {
        ViewMode::from_key(&self.view_mode)
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode.key().to_string();
    }

    pub fn device_mode(&self) -> DeviceMode {
        DeviceMode::from_key(&self.device_mode)
    }

    pub fn set_device_mode(&mut self, mode: DeviceMode) {
        self.device_mode = mode.key().to_string();
    }

    /// The active search engine, falling back to the registry default when
    /// the stored name is absent or unknown.
    pub fn engine(&self) -> &'static SearchEngine {
        let name = (!self.search_engine.is_empty()).then_some(self.search_engine.as_str());
        engine_by_name(name)
    }

    pub fn set_engine(&mut self, name: &str) {
        self.search_engine = name.to_string();
    }
}

/// Preference storage errors.
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("configuration directory not found")]
    ConfigDirNotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Loads preferences at startup and writes them back on every change.
#[derive(Debug)]
pub struct PrefsManager {
    prefs: Preferences,
    path: Option<PathBuf>,
}

impl PrefsManager {
    /// Open (or create) the preference store under the user config dir.
    pub fn new() -> Result<Self, PrefsError> {
        let dir = dirs::config_dir()
            .ok_or(PrefsError::ConfigDirNotFound)?
            .join("droidweb");
        std::fs::create_dir_all(&dir)?;

        let path = dir.join("prefs.json");
        let prefs = if path.exists() {
            Self::load(&path)
        } else {
            Preferences::default()
        };

        Ok(Self {
            prefs,
            path: Some(path),
        })
    }

    /// A store that never touches disk. Used when no config directory is
    /// available; every preference then lives for the session only.
    pub fn in_memory() -> Self {
        Self {
            prefs: Preferences::default(),
            path: None,
        }
    }

    fn load(path: &Path) -> Preferences {
        let parsed = std::fs::read_to_string(path)
            .map_err(PrefsError::from)
            .and_then(|content| Ok(serde_json::from_str(&content)?));
        match parsed {
            Ok(prefs) => prefs,
            Err(err) => {
                log::warn!("unreadable preferences ({}), using defaults", err);
                Preferences::default()
            }
        }
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    /// Apply a change and persist it. Persistence failures are logged, never
    /// surfaced: a preference write must not break navigation.
    pub fn update(&mut self, apply: impl FnOnce(&mut Preferences)) {
        apply(&mut self.prefs);
        if let Err(err) = self.save() {
            log::warn!("failed to persist preferences: {}", err);
        }
    }

    pub fn save(&self) -> Result<(), PrefsError> {
        if let Some(path) = &self.path {
            let content = serde_json::to_string_pretty(&self.prefs)?;
            std::fs::write(path, content)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let prefs: Preferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs.theme(), ThemeChoice::Dark);
        assert_eq!(prefs.view_mode(), ViewMode::Mobile);
        assert_eq!(prefs.device_mode(), DeviceMode::Mobile);
        assert_eq!(prefs.engine().name, "Google");
    }

    #[test]
    fn test_unrecognized_values_fall_back() {
        let prefs: Preferences = serde_json::from_str(
            r#"{"theme":"solarized","view_mode":"tablet","device_mode":"tv","search_engine":"AltaVista"}"#,
        )
        .unwrap();
        assert_eq!(prefs.theme(), ThemeChoice::Dark);
        assert_eq!(prefs.view_mode(), ViewMode::Mobile);
        assert_eq!(prefs.device_mode(), DeviceMode::Mobile);
        assert_eq!(prefs.engine().name, "Google");
    }

    #[test]
    fn test_stored_values_round_trip() {
        let mut prefs = Preferences::default();
        prefs.set_theme(ThemeChoice::Light);
        prefs.set_view_mode(ViewMode::Desktop);
        prefs.set_engine("DuckDuckGo");

        let json = serde_json::to_string(&prefs).unwrap();
        let restored: Preferences = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.theme(), ThemeChoice::Light);
        assert_eq!(restored.view_mode(), ViewMode::Desktop);
        assert_eq!(restored.engine().name, "DuckDuckGo");
    }

    #[test]
    fn test_in_memory_store_accepts_updates() {
        let mut manager = PrefsManager::in_memory();
        manager.update(|p| p.set_device_mode(DeviceMode::Desktop));
        assert_eq!(manager.prefs().device_mode(), DeviceMode::Desktop);
    }
}

//! Light/dark theming for the browser chrome.
//!
//! Trimmed to the two variants the mobile UI exposes; the palette carries the
//! handful of colors the custom widget styles need on top of the base iced
//! theme.

use iced::{Color, Theme};

/// User-selectable appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeChoice {
    Light,
    #[default]
    Dark,
}

impl ThemeChoice {
    pub fn key(self) -> &'static str {
        match self {
            ThemeChoice::Light => "light",
            ThemeChoice::Dark => "dark",
        }
    }

    /// Stored-value parsing; anything unrecognized is the dark default.
    pub fn from_key(key: &str) -> Self {
        match key {
            "light" => ThemeChoice::Light,
            _ => ThemeChoice::Dark,
        }
    }

    pub fn to_iced_theme(self) -> Theme {
        match self {
            ThemeChoice::Light => Theme::Light,
            ThemeChoice::Dark => Theme::Dark,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeChoice::Light => Palette::light(),
            ThemeChoice::Dark => Palette::dark(),
        }
    }
}

/// Accent and surface colors layered over the base theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Brand accent (the emerald used across the chrome).
    pub accent: Color,
    /// Card and panel background.
    pub surface: Color,
    /// Card and panel border.
    pub surface_border: Color,
    /// Secondary text.
    pub text_muted: Color,
    /// Error notices.
    pub danger: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            accent: Color::from_rgb(0.06, 0.73, 0.51),
            surface: Color::from_rgb(0.09, 0.09, 0.11),
            surface_border: Color::from_rgb(0.18, 0.18, 0.21),
            text_muted: Color::from_rgb(0.55, 0.55, 0.58),
            danger: Color::from_rgb(0.90, 0.30, 0.30),
        }
    }

    pub fn light() -> Self {
        Self {
            accent: Color::from_rgb(0.02, 0.59, 0.41),
            surface: Color::from_rgb(0.96, 0.96, 0.96),
            surface_border: Color::from_rgb(0.88, 0.88, 0.88),
            text_muted: Color::from_rgb(0.45, 0.45, 0.47),
            danger: Color::from_rgb(0.80, 0.20, 0.20),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_defaults_to_dark() {
        assert_eq!(ThemeChoice::from_key("light"), ThemeChoice::Light);
        assert_eq!(ThemeChoice::from_key("dark"), ThemeChoice::Dark);
        assert_eq!(ThemeChoice::from_key("sepia"), ThemeChoice::Dark);
        assert_eq!(ThemeChoice::from_key(""), ThemeChoice::Dark);
    }
}

//! # Theme System
//!
//! Light and dark color themes for the folio TUI.
//!
//! ## Overview
//!
//! The [`Theme`] struct defines all colors used throughout the UI. Rendering
//! code references theme fields instead of hardcoding colors. The active
//! theme follows the [`ThemeMode`] preference, toggled at runtime with `t`
//! and persisted in the config file.
//!
//! - **Dark** (default) - Catppuccin Mocha
//! - **Light** - Catppuccin Latte

use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The persisted light/dark preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => f.write_str("light"),
            ThemeMode::Dark => f.write_str("dark"),
        }
    }
}

/// All colors used by the folio TUI, grouped by semantic role.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Human-readable name.
    pub name: &'static str,
    pub mode: ThemeMode,

    // -- Background colors --
    /// Main background color for panels and modals.
    pub bg: Color,

    // -- Foreground / text colors --
    /// Primary text color.
    pub fg: Color,
    /// Muted/secondary text (e.g. tags, hints, footer).
    pub fg_dim: Color,

    // -- Accent / brand colors --
    /// Primary accent used for titles, active nav items and focused borders.
    pub accent: Color,
    /// Secondary accent for subtitles, filter text and the haptic pulse.
    pub secondary: Color,

    // -- Semantic status colors --
    /// Progress bar fill.
    pub success: Color,
    /// Error / red indicator.
    pub error: Color,

    // -- Selection --
    /// Background of the selected accordion group.
    pub selection_bg: Color,
}

impl Theme {
    /// Return both built-in themes (dark first).
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn for_mode(mode: ThemeMode) -> &'static Theme {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.mode == mode)
            .unwrap_or(&BUILT_IN_THEMES[0])
    }

    /// Return the default theme (dark).
    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }
}

static BUILT_IN_THEMES: [Theme; 2] = [
    // 0 - Catppuccin Mocha (dark, default)
    Theme {
        name: "Catppuccin Mocha",
        mode: ThemeMode::Dark,
        bg: Color::Rgb(30, 30, 46),           // base
        fg: Color::Rgb(205, 214, 244),        // text
        fg_dim: Color::Rgb(108, 112, 134),    // overlay0
        accent: Color::Rgb(137, 180, 250),    // blue
        secondary: Color::Rgb(249, 226, 175), // yellow
        success: Color::Rgb(166, 227, 161),   // green
        error: Color::Rgb(243, 139, 168),     // red
        selection_bg: Color::Rgb(69, 71, 90), // surface1
    },
    // 1 - Catppuccin Latte (light)
    Theme {
        name: "Catppuccin Latte",
        mode: ThemeMode::Light,
        bg: Color::Rgb(239, 241, 245),           // base
        fg: Color::Rgb(76, 79, 105),             // text
        fg_dim: Color::Rgb(156, 160, 176),       // overlay0
        accent: Color::Rgb(30, 102, 245),        // blue
        secondary: Color::Rgb(223, 142, 29),     // yellow
        success: Color::Rgb(64, 160, 43),        // green
        error: Color::Rgb(210, 15, 57),          // red
        selection_bg: Color::Rgb(188, 192, 204), // surface1
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    /// Convert a catppuccin color to a ratatui Color via its RGB values.
    fn ctp(color: catppuccin::Color) -> Color {
        Color::Rgb(color.rgb.r, color.rgb.g, color.rgb.b)
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default_theme().mode, ThemeMode::Dark);
        assert_eq!(ThemeMode::default(), ThemeMode::Dark);
    }

    #[test]
    fn test_for_mode() {
        assert_eq!(Theme::for_mode(ThemeMode::Light).name, "Catppuccin Latte");
        assert_eq!(Theme::for_mode(ThemeMode::Dark).name, "Catppuccin Mocha");
    }

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
    }

    #[test]
    fn test_by_name_case_insensitive() {
        assert!(Theme::by_name("catppuccin latte").is_some());
        assert!(Theme::by_name("CATPPUCCIN MOCHA").is_some());
        assert!(Theme::by_name("nonexistent").is_none());
    }

    #[test]
    fn test_catppuccin_mocha_matches_palette() {
        let mocha = catppuccin::PALETTE.mocha.colors;
        let theme = Theme::for_mode(ThemeMode::Dark);
        assert_eq!(theme.bg, ctp(mocha.base));
        assert_eq!(theme.fg, ctp(mocha.text));
        assert_eq!(theme.accent, ctp(mocha.blue));
        assert_eq!(theme.secondary, ctp(mocha.yellow));
        assert_eq!(theme.success, ctp(mocha.green));
        assert_eq!(theme.error, ctp(mocha.red));
    }

    #[test]
    fn test_catppuccin_latte_matches_palette() {
        let latte = catppuccin::PALETTE.latte.colors;
        let theme = Theme::for_mode(ThemeMode::Light);
        assert_eq!(theme.bg, ctp(latte.base));
        assert_eq!(theme.fg, ctp(latte.text));
        assert_eq!(theme.accent, ctp(latte.blue));
        assert_eq!(theme.success, ctp(latte.green));
        assert_eq!(theme.selection_bg, ctp(latte.surface1));
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ThemeMode::Light).expect("serialize"),
            "\"light\""
        );
    }
}

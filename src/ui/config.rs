//! # Configuration Persistence
//!
//! Manages user configuration stored in `~/.config/folio/config.json`.
//!
//! ## Overview
//!
//! The [`Config`] struct is serialized to / deserialized from a JSON file in
//! the user's XDG config directory. It holds the light/dark preference, the
//! reduced-motion flag and the scale used to turn terminal cells and wheel
//! notches into the pixel distances the navigator thresholds are tuned for.
//!
//! ## File Location
//!
//! ```text
//! ~/.config/folio/config.json
//! ```
//!
//! The `directories` crate is used to resolve the platform-appropriate config
//! directory.

use crate::ui::theme::ThemeMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted user configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Stored theme preference. `None` until the user toggles the theme,
    /// in which case the dark theme is used.
    #[serde(default)]
    pub theme: Option<ThemeMode>,

    /// Skip reveal and slide animations.
    #[serde(default)]
    pub reduced_motion: bool,

    /// Ring the terminal bell on haptic feedback.
    #[serde(default)]
    pub bell: bool,

    /// Pixels scrolled per mouse wheel notch.
    #[serde(default = "default_wheel_delta")]
    pub wheel_delta: f64,

    /// Pixel size of one terminal cell, used for drag gestures and scrolling.
    #[serde(default = "default_cell_width")]
    pub cell_width: f64,
    #[serde(default = "default_cell_height")]
    pub cell_height: f64,
}

fn default_wheel_delta() -> f64 {
    40.0
}

fn default_cell_width() -> f64 {
    8.0
}

fn default_cell_height() -> f64 {
    16.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: None,
            reduced_motion: false,
            bell: false,
            wheel_delta: default_wheel_delta(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
        }
    }
}

impl Config {
    /// Load configuration from disk. Returns `Config::default()` if the file
    /// does not exist or cannot be parsed.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Falling back to default config: {e:#}");
                Self::default()
            }
        }
    }

    /// Try to load configuration, returning an error on failure.
    fn try_load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path. Returns `Config::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save the current configuration to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save the current configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Theme to start with: the stored preference, else dark.
    pub fn theme_mode(&self) -> ThemeMode {
        self.theme.unwrap_or_default()
    }

    /// Return the path to the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "folio")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.json"))
    }
}

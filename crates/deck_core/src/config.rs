//! Application configuration

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub general: GeneralConfig,
    pub slideshow: SlideshowConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideshowConfig {
    /// Interval used when playback is started without an explicit delay.
    pub default_interval_ms: u64,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            default_interval_ms: 3000,
        }
    }
}

/// Display theme preference, persisted across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    #[serde(rename = "light")]
    Light,
    #[serde(rename = "dark")]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl DeckConfig {
    /// Load configuration from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::info!("Configuration loaded from {:?}", config_path);
            Ok(config)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        tracing::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "SlideDeck", "SlideDeck")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_light_theme_and_3s_interval() {
        let config = DeckConfig::default();
        assert_eq!(config.general.theme, Theme::Light);
        assert_eq!(config.slideshow.default_interval_ms, 3000);
    }

    #[test]
    fn theme_toggle_is_its_own_inverse() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = DeckConfig::default();
        config.general.theme = Theme::Dark;
        config.slideshow.default_interval_ms = 750;

        let text = toml::to_string_pretty(&config).unwrap();
        let back: DeckConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.general.theme, Theme::Dark);
        assert_eq!(back.slideshow.default_interval_ms, 750);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let back: DeckConfig = toml::from_str("[general]\ntheme = \"dark\"\n").unwrap();
        assert_eq!(back.general.theme, Theme::Dark);
        assert_eq!(back.slideshow.default_interval_ms, 3000);
    }
}

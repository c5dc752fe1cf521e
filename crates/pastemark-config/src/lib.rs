//! Configuration management for pastemark.
//!
//! Parses `pastemark.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "pastemark.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override detection sensitivity (threshold).
    pub sensitivity: Option<u32>,
    /// Override base font size in pixels.
    pub font_size: Option<u32>,
    /// Override RTF generation flag.
    pub include_rtf: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Markdown detection configuration.
    pub detection: DetectionConfig,
    /// Rendering configuration.
    pub render: RenderConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Markdown detection configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Minimum detection score required to treat text as Markdown.
    /// 1 = very aggressive, 5 = very conservative.
    pub sensitivity: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self { sensitivity: 2 }
    }
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Base body font size in pixels.
    pub font_size: u32,
    /// Whether to produce binary RTF alongside HTML.
    pub include_rtf: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_size: 14,
            include_rtf: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `pastemark.toml` in the current directory and
    /// parents, falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist, or if
    /// parsing or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(sensitivity) = settings.sensitivity {
            self.detection.sensitivity = sensitivity;
        }
        if let Some(font_size) = settings.font_size {
            self.render.font_size = font_size;
        }
        if let Some(include_rtf) = settings.include_rtf {
            self.render.include_rtf = include_rtf;
        }
    }

    /// Search for a config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detection.sensitivity == 0 {
            return Err(ConfigError::Validation(
                "detection.sensitivity must be at least 1 (0 would convert every copy)".to_owned(),
            ));
        }
        if self.render.font_size == 0 {
            return Err(ConfigError::Validation(
                "render.font_size cannot be 0".to_owned(),
            ));
        }
        Ok(())
    }
}

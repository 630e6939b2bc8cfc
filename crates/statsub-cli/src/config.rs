//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (TOML/YAML/JSON)
//! - Environment variables

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use statsub_core::render::{
    RenderStyle, DEFAULT_PERCENT, DEFAULT_SEPARATOR, DEFAULT_TERMINATOR, DEFAULT_UNIT,
};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV: &str = "STATSUB_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cell rendering tokens
    pub render: RenderConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Tokens surrounding the rendered numbers of a cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Unit appended to the total
    pub unit: String,

    /// Separator between total and ratio
    pub separator: String,

    /// Percent sign appended to the ratio
    pub percent: String,

    /// Row terminator closing the cell
    pub terminator: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (compact, full, json)
    pub format: String,

    /// Include thread IDs
    pub thread_ids: bool,

    /// Include file and line numbers
    pub source_location: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            unit: DEFAULT_UNIT.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            percent: DEFAULT_PERCENT.to_string(),
            terminator: DEFAULT_TERMINATOR.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
            thread_ids: false,
            source_location: false,
        }
    }
}

impl RenderConfig {
    /// Build the core render style
    pub fn style(&self) -> RenderStyle {
        RenderStyle::default()
            .with_unit(self.unit.as_str())
            .with_separator(self.separator.as_str())
            .with_percent(self.percent.as_str())
            .with_terminator(self.terminator.as_str())
    }
}

impl Config {
    /// Load configuration from a file, choosing the format by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::config(path, e.to_string()))?;

        let parsed = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| e.to_string())
            }
            Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
            _ => toml::from_str(&content).map_err(|e| e.to_string()),
        };

        parsed.map_err(|message| Error::config(path, message))
    }

    /// Load configuration from `$STATSUB_CONFIG` or the default locations,
    /// then apply environment overrides
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = Self::load_with_file(explicit.as_deref())?;
        config.merge_with_env();
        Ok(config)
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            return Self::from_file(path);
        }

        Ok(Self::load_discovered(&Self::default_config_paths()))
    }

    /// Use the first discovered file that loads
    ///
    /// A discovered file that fails to load is reported and skipped.
    fn load_discovered(paths: &[PathBuf]) -> Self {
        for path in paths.iter().filter(|p| p.is_file()) {
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "Using configuration file");
                    return config;
                }
                Err(e) => {
                    eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                }
            }
        }
        Self::default()
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".statsub.toml"),
            PathBuf::from(".statsub.yaml"),
            PathBuf::from(".statsub.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let statsub_dir = config_dir.join("statsub");
            paths.push(statsub_dir.join("config.toml"));
            paths.push(statsub_dir.join("config.yaml"));
            paths.push(statsub_dir.join("config.json"));
        }

        paths
    }

    /// Apply `STATSUB_UNIT` and `STATSUB_SEPARATOR` overrides
    pub fn merge_with_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(unit) = lookup("STATSUB_UNIT") {
            self.render.unit = unit;
        }
        if let Some(separator) = lookup("STATSUB_SEPARATOR") {
            self.render.separator = separator;
        }
    }
}

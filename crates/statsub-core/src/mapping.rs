//! Statistics mapping and its loaders
//!
//! The statistics source is a flat mapping of name to a two-element numeric
//! array, e.g. `{"latency": [150.0, 100.0]}`. It is always deserialized with
//! a declarative parser; file contents are never evaluated.

use crate::error::{DataFormat, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A `(total, count)` pair, serialized as `[total, count]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Stat {
    pub total: f64,
    pub count: f64,
}

impl Stat {
    pub fn new(total: f64, count: f64) -> Self {
        Self { total, count }
    }
}

impl From<(f64, f64)> for Stat {
    fn from((total, count): (f64, f64)) -> Self {
        Self { total, count }
    }
}

impl From<Stat> for (f64, f64) {
    fn from(stat: Stat) -> Self {
        (stat.total, stat.count)
    }
}

/// Read-only mapping of statistic name to [`Stat`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatisticsMapping {
    entries: BTreeMap<String, Stat>,
}

impl StatisticsMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of `name: [total, count]`
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::parse(DataFormat::Json, e.to_string()))
    }

    /// Parse a YAML mapping of `name: [total, count]`
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::parse(DataFormat::Yaml, e.to_string()))
    }

    /// Parse a TOML table of `name = [total, count]`
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::parse(DataFormat::Toml, e.to_string()))
    }

    /// Parse content in the given format
    pub fn from_str_with_format(content: &str, format: DataFormat) -> Result<Self> {
        match format {
            DataFormat::Json => Self::from_json_str(content),
            DataFormat::Yaml => Self::from_yaml_str(content),
            DataFormat::Toml => Self::from_toml_str(content),
        }
    }

    /// Read and parse a statistics file, choosing the parser by extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let format = detect_format(path);
        debug!(path = %path.display(), %format, bytes = content.len(), "Parsing statistics");

        let mapping = Self::from_str_with_format(&content, format).map_err(|e| e.with_path(path))?;
        debug!(entries = mapping.len(), "Loaded statistics mapping");
        Ok(mapping)
    }

    pub fn get(&self, name: &str) -> Option<&Stat> {
        self.entries.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, stat: Stat) -> Option<Stat> {
        self.entries.insert(name.into(), stat)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Stat)> {
        self.entries.iter().map(|(name, stat)| (name.as_str(), stat))
    }

    /// Serialize back into the JSON data-file format
    pub fn to_json_string_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::parse(DataFormat::Json, e.to_string()))
    }
}

impl FromIterator<(String, Stat)> for StatisticsMapping {
    fn from_iter<I: IntoIterator<Item = (String, Stat)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Pick a data format from a file extension; JSON unless YAML or TOML
pub fn detect_format(path: &Path) -> DataFormat {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => DataFormat::Yaml,
        Some("toml") => DataFormat::Toml,
        _ => DataFormat::Json,
    }
}

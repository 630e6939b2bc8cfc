//! Error types for the statsub core library
//!
//! Every failure the substitution engine can produce is a variant of
//! [`Error`]. Unknown markers are deliberately absent: they are passed
//! through and never reported as errors.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for statsub operations
#[derive(Error, Debug)]
pub enum Error {
    /// The statistics file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The statistics source is not a well-formed mapping of name to pair
    #[error("Failed to parse {} statistics{}: {message}", format, path_suffix(path))]
    Parse {
        path: Option<PathBuf>,
        format: DataFormat,
        message: String,
    },

    /// A referenced entry has a zero count or its ratio overflows
    #[error("Statistic '{name}' has an undefined ratio: total {total}, count {count}")]
    ZeroCount { name: String, total: f64, count: f64 },
}

/// Serialized formats accepted for the statistics source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
    Toml,
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFormat::Json => write!(f, "JSON"),
            DataFormat::Yaml => write!(f, "YAML"),
            DataFormat::Toml => write!(f, "TOML"),
        }
    }
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" in {}", p.display()),
        None => String::new(),
    }
}

impl Error {
    /// Create a parse error without an associated file
    pub fn parse(format: DataFormat, message: impl Into<String>) -> Self {
        Self::Parse {
            path: None,
            format,
            message: message.into(),
        }
    }

    /// Attach a file path to a parse error; other variants are returned unchanged
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            Self::Parse {
                path: None,
                format,
                message,
            } => Self::Parse {
                path: Some(file.into()),
                format,
                message,
            },
            other => other,
        }
    }

    /// Whether this error is an arithmetic fault in a rendered value
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Self::ZeroCount { .. })
    }
}

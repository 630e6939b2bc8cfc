//! Error types and handling for the CLI
//!
//! This module maps every failure of a run onto a distinct exit code and
//! renders it for the terminal.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Wrong number of arguments; the message is the usage line itself
    #[error("Usage: {program} template")]
    Usage { program: String },

    /// IO error on the standard streams
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from statsub-core (parse failure, zero count, ...)
    #[error(transparent)]
    Core(#[from] statsub_core::Error),

    /// Configuration file could not be read or parsed
    #[error("Configuration error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage { .. } => 1,
            Self::Io(_) => 2,
            Self::Core(core) => match core {
                statsub_core::Error::Io { .. } => 2,
                statsub_core::Error::Parse { .. } => 3,
                statsub_core::Error::ZeroCount { .. } => 4,
            },
            Self::Config { .. } => 5,
            Self::Other { .. } => 99,
        }
    }

    /// Usage errors go to stdout as plain guidance, everything else to stderr
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage { .. })
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if error.is_usage() {
        return error.to_string();
    }

    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

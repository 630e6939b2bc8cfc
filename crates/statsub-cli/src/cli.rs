//! Command-line interface argument parsing
//!
//! The command line is a single positional path. Anything else, including
//! flags, is a usage error reported as `Usage: <program> template` with
//! exit status 1, before any file is touched.

use crate::error::{Error, Result};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Statsub - substitute named statistics into a template read from stdin
///
/// Reads a statistics file mapping names to `[total, count]` pairs, replaces
/// every `%(name)` marker in standard input with a rendered table cell, and
/// writes the result to standard output.
#[derive(Parser, Debug)]
#[command(
    name = "statsub",
    version,
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Statistics file (JSON, YAML or TOML) mapping names to [total, count]
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,
}

impl Cli {
    /// Parse the process arguments
    pub fn parse_args() -> Result<Self> {
        Self::parse_from_args(std::env::args_os())
    }

    /// Parse an explicit argument list, the first item being the program name
    pub fn parse_from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let program = args
            .first()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| "statsub".to_string());

        Self::try_parse_from(&args).map_err(|e| {
            tracing::debug!(kind = ?e.kind(), "Rejected command line");
            Error::Usage { program }
        })
    }
}

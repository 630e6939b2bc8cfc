//! Statsub CLI - substitute named statistics into a template
//!
//! Reads a statistics file named by the sole argument, reads a document from
//! standard input, replaces every `%(name)` marker with a rendered cell and
//! prints the result.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::Cli;
use config::Config;
use error::Result;
use is_terminal::IsTerminal;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::io;
use std::process;
use tracing::instrument;

fn main() {
    let result = Cli::parse_args().and_then(|cli| {
        let config = Config::load()?;

        if let Err(e) = init_logging(&config) {
            eprintln!("Failed to initialize logging: {}", e);
        }

        run(cli, &config)
    });

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            if e.is_usage() {
                println!("{}", e);
            } else {
                tracing::debug!(exit_code = e.exit_code(), "Run failed");
                eprintln!("{}", error::format_error(&e, io::stderr().is_terminal()));
            }
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip_all, fields(template = %cli.template.display()))]
fn run(cli: Cli, config: &Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let mut output = OutputWriter::stdout();
    let mut stdin = io::stdin().lock();
    handlers::handle_substitute(&cli.template, config, &mut stdin, &mut output)
}

/// Initialize the logging system
fn init_logging(config: &Config) -> Result<()> {
    let mut logging_config = LoggingConfig::from_config(&config.logging);
    logging_config.merge_with_env();
    logging::init_logging(logging_config)
}

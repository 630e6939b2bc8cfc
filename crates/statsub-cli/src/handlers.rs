//! Handler for the substitution run
//!
//! Load data, then transform text: the statistics file is read and parsed
//! first, then standard input is read in full and substituted. The input is
//! kept as bytes; it does not have to be UTF-8.

use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use statsub_core::{StatisticsMapping, Substitutor};
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

/// Substitute the statistics at `template` into `input`, writing to `output`
pub fn handle_substitute<R, W>(
    template: &Path,
    config: &Config,
    input: &mut R,
    output: &mut OutputWriter<W>,
) -> Result<()>
where
    R: Read,
    W: Write,
{
    let mapping = {
        let _timer = Timer::with_details("load_statistics", &template.display().to_string());
        StatisticsMapping::load(template)?
    };
    info!(entries = mapping.len(), "Statistics loaded");

    let mut body = Vec::new();
    input.read_to_end(&mut body)?;

    let substitution = {
        let _timer = Timer::new("substitute");
        Substitutor::new(&mapping, config.render.style()).apply(&body)?
    };

    output.report(&substitution);
    output.document(&substitution.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;

    fn run(stats: &str, input: &str) -> Result<String> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, stats).unwrap();

        let mut output = OutputWriter::with_writer(Vec::new());
        handle_substitute(&path, &Config::default(), &mut input.as_bytes(), &mut output)?;
        Ok(String::from_utf8(output.into_inner()).unwrap())
    }

    #[test]
    fn test_latency_row() {
        let out = run(r#"{"latency": [150.0, 100.0]}"#, "lookup: %(latency)").unwrap();
        assert_eq!(out, "lookup: 150.0~ns & 150.00\\% \\\n");
    }

    #[test]
    fn test_empty_mapping() {
        let out = run("{}", "no markers here").unwrap();
        assert_eq!(out, "no markers here\n");
    }

    #[test]
    fn test_zero_count_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, r#"{"x": [5.0, 0.0]}"#).unwrap();

        let mut output = OutputWriter::with_writer(Vec::new());
        let err = handle_substitute(&path, &Config::default(), &mut "%(x)".as_bytes(), &mut output)
            .unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(output.into_inner().is_empty());
    }

    #[test]
    fn test_parse_error() {
        let err = run("{\"x\": [1.0, 2.0", "%(x)").unwrap_err();
        assert!(matches!(err, Error::Core(statsub_core::Error::Parse { .. })));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_latin1_input_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, r#"{"a": [1, 1]}"#).unwrap();

        let mut output = OutputWriter::with_writer(Vec::new());
        handle_substitute(&path, &Config::default(), &mut &b"caf\xe9 %(a)\n"[..], &mut output)
            .unwrap();
        assert_eq!(output.into_inner(), b"caf\xe9 1.0~ns & 100.00\\% \\\n\n");
    }

    #[test]
    fn test_custom_render_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.yaml");
        fs::write(&path, "lock: [20.0, 80.0]\n").unwrap();

        let mut config = Config::default();
        config.render.unit = " ns".to_string();
        config.render.terminator = String::new();

        let mut output = OutputWriter::with_writer(Vec::new());
        handle_substitute(&path, &config, &mut "%(lock)".as_bytes(), &mut output).unwrap();
        assert_eq!(output.into_inner(), b"20.0 ns & 25.00\\%\n");
    }
}

//! Output writing utilities
//!
//! The substituted document is the only thing written to stdout. Reports
//! about the pass (unresolved markers, replacement counts) go through
//! `tracing` to stderr.

use crate::error::Result;
use statsub_core::Substitution;
use std::io::{self, Write};
use tracing::{debug, info};

/// Writes substituted documents to an underlying stream
pub struct OutputWriter<W: Write = io::Stdout> {
    writer: W,
}

impl OutputWriter<io::Stdout> {
    /// Create an output writer on stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> OutputWriter<W> {
    /// Create an output writer with a custom writer
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Write the document followed by a single newline
    pub fn document(&mut self, text: &[u8]) -> Result<()> {
        debug!(bytes = text.len(), "Writing document");
        self.writer.write_all(text)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Log a summary of a substitution pass
    pub fn report(&self, substitution: &Substitution) {
        info!(
            names = substitution.replaced.len(),
            markers = substitution.replaced_count(),
            "Replaced markers"
        );
        if !substitution.unresolved.is_empty() {
            info!(
                unresolved = ?substitution.unresolved,
                "Markers without a matching statistic were left as-is"
            );
        }
    }

    /// Consume the writer and return the underlying stream
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_appends_newline() {
        let mut output = OutputWriter::with_writer(Vec::new());
        output.document(b"row 1").unwrap();
        assert_eq!(output.into_inner(), b"row 1\n");
    }

    #[test]
    fn test_document_keeps_existing_newline() {
        let mut output = OutputWriter::with_writer(Vec::new());
        output.document(b"row 1\n").unwrap();
        assert_eq!(output.into_inner(), b"row 1\n\n");
    }

    #[test]
    fn test_document_writes_raw_bytes() {
        let mut output = OutputWriter::with_writer(Vec::new());
        output.document(b"\xe9t\xe9").unwrap();
        assert_eq!(output.into_inner(), b"\xe9t\xe9\n");
    }

    #[test]
    fn test_empty_document() {
        let mut output = OutputWriter::with_writer(Vec::new());
        output.document(b"").unwrap();
        assert_eq!(output.into_inner(), b"\n");
    }
}

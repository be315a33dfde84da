//! PDF ingestor: external text extraction, then the line parser.
//!
//! pdftotext writes to a file path, not stdout, in the invocation we rely on
//! (`pdftotext -layout in.pdf out.txt`). Each call gets its own
//! [`tempfile::TempPath`], so concurrent ingestions never share a scratch file
//! and the file is deleted when the guard drops: after a successful parse,
//! after a malformed line, and after a tool failure alike.

use super::{ensure_ingestible, line, QuoteIngestor};
use crate::config::IngestConfig;
use crate::error::{MemeError, Result};
use crate::quote::Quote;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::process::Command;
use tempfile::TempPath;
use tracing::{debug, info};

/// Ingestor for `.pdf` files.
pub struct PdfIngestor {
    extensions: Vec<&'static str>,
    config: IngestConfig,
}

impl PdfIngestor {
    /// Create a PDF ingestor using the extraction tool from `config`.
    pub fn new(config: IngestConfig) -> Self {
        Self {
            extensions: vec!["pdf"],
            config,
        }
    }

    /// Run the extraction tool and return the cleaned text.
    fn extract_text(&self, path: &Path) -> Result<String> {
        let tool = &self.config.pdftotext_program;
        let tool_failure = |detail: String| MemeError::ExternalToolFailure {
            tool: tool.clone(),
            path: path.to_path_buf(),
            detail,
        };

        let scratch = scratch_file(self.config.scratch_dir.as_deref())
            .map_err(|e| tool_failure(format!("cannot create scratch file: {e}")))?;

        debug!(
            tool = %tool,
            args = ?self.config.pdftotext_args,
            scratch = %scratch.display(),
            "Running PDF text extraction"
        );

        let output = Command::new(tool)
            .args(&self.config.pdftotext_args)
            .arg(path)
            .arg(&*scratch)
            .output()
            .map_err(|e| tool_failure(format!("cannot run: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(tool_failure(format!("{} {}", output.status, stderr.trim())));
        }

        let bytes = std::fs::read(&scratch)
            .map_err(|e| tool_failure(format!("cannot read extracted text: {e}")))?;
        // Image-only pages come back as bare form feeds.
        let text = clean_extracted_text(&String::from_utf8_lossy(&bytes));
        if text.trim().is_empty() {
            return Err(tool_failure("produced no output".to_string()));
        }

        Ok(text)
    }
}

impl Default for PdfIngestor {
    fn default() -> Self {
        Self::new(IngestConfig::default())
    }
}

impl QuoteIngestor for PdfIngestor {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn parse(&self, path: &Path) -> Result<Vec<Quote>> {
        ensure_ingestible(self, path)?;

        std::fs::metadata(path).map_err(|e| MemeError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        info!("Extracting text from {}", path.display());
        let text = self.extract_text(path)?;
        let quotes = line::parse_lines(text.lines(), path)?;
        debug!(path = %path.display(), quotes = quotes.len(), "Parsed PDF source");
        Ok(quotes)
    }
}

/// Create an empty, uniquely named scratch file and release its handle so
/// the external tool can open the path itself.
fn scratch_file(dir: Option<&Path>) -> std::io::Result<TempPath> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("quotes-").suffix(".txt");
    let file = match dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };
    Ok(file.into_temp_path())
}

// ── Extracted-text cleanup ───────────────────────────────────────────────────

/// Page-break form feeds plus invisible characters pdftotext passes through.
static RE_INVISIBLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x0C\x{FEFF}\x{200B}\x{200C}\x{200D}\x{2060}\x{00AD}]").unwrap());

fn clean_extracted_text(input: &str) -> String {
    let s = input.replace("\r\n", "\n").replace('\r', "\n");
    RE_INVISIBLE.replace_all(&s, "").into_owned()
}

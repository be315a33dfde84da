//! Office-document ingestor: one quote per non-empty DOCX paragraph.

use super::{ensure_ingestible, line, QuoteIngestor};
use crate::error::{MemeError, Result};
use crate::quote::Quote;
use std::path::Path;
use tracing::{debug, warn};

/// Ingestor for `.docx` files.
pub struct DocxIngestor {
    extensions: Vec<&'static str>,
}

impl DocxIngestor {
    /// Create a new DOCX ingestor.
    pub fn new() -> Self {
        Self {
            extensions: vec!["docx"],
        }
    }
}

impl Default for DocxIngestor {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteIngestor for DocxIngestor {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn parse(&self, path: &Path) -> Result<Vec<Quote>> {
        ensure_ingestible(self, path)?;

        let bytes = std::fs::read(path).map_err(|e| MemeError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        let docx = docx_rs::read_docx(&bytes).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Failed to read DOCX");
            MemeError::Docx {
                path: path.to_path_buf(),
                detail: e.to_string(),
            }
        })?;

        let paragraphs = document_paragraphs(&docx);
        let quotes = line::parse_lines(&paragraphs, path)?;
        debug!(
            path = %path.display(),
            paragraphs = paragraphs.len(),
            quotes = quotes.len(),
            "Parsed DOCX source"
        );
        Ok(quotes)
    }
}

/// Text of every top-level paragraph, in document order.
///
/// Blank paragraphs are kept so line numbers in errors match paragraph
/// positions; the line parser skips them.
fn document_paragraphs(docx: &docx_rs::Docx) -> Vec<String> {
    docx.document
        .children
        .iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .collect()
}

/// Concatenate the text runs of a paragraph, including hyperlink runs.
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();

    for child in &para.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(&mut text, run),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                for child in &link.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        push_run_text(&mut text, run);
                    }
                }
            }
            _ => {}
        }
    }

    text
}

fn push_run_text(text: &mut String, run: &docx_rs::Run) {
    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(t) => text.push_str(&t.text),
            docx_rs::RunChild::Tab(_) => text.push('\t'),
            _ => {}
        }
    }
}

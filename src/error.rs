//! Error types for the quotemaker library.
//!
//! Two distinct error types reflect two distinct scopes:
//!
//! * [`MemeError`]: **Fatal** for the current call. Ingestion errors abort
//!   the file being parsed and the whole batch; composition errors abort the
//!   render. Every variant carries the offending path or line so callers can
//!   tell "bad input image" apart from "bad output location".
//!
//! * [`LineError`]: why a single `body - author` line was rejected. Returned
//!   by [`crate::ingest::line::parse_line`] and wrapped into
//!   [`MemeError::MalformedLine`] once the source path and line number are
//!   known.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the quotemaker library.
#[derive(Debug, Error)]
pub enum MemeError {
    // ── Ingestion errors ──────────────────────────────────────────────────
    /// An ingestor was asked to parse a file whose extension it does not handle.
    #[error("Ingestor '{ingestor}' cannot ingest '{path}' (extension not supported)")]
    FormatMismatch {
        ingestor: &'static str,
        path: PathBuf,
    },

    /// No registered ingestor accepts the file's extension.
    #[error("No ingestor matched '{path}'\nSupported extensions: {}.", supported.join(", "))]
    NoIngestorMatched {
        path: PathBuf,
        supported: Vec<String>,
    },

    /// The source file could not be read.
    #[error("Failed to read quote source '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line did not follow the `body - author` pattern.
    #[error("Malformed quote at {path}:{line}: {reason}\nLine: {content:?}")]
    MalformedLine {
        path: PathBuf,
        line: usize,
        content: String,
        reason: LineError,
    },

    /// A tabular source lacks the required `body` / `author` header columns.
    #[error("CSV '{path}' is missing required column(s): {}", missing.join(", "))]
    SchemaMismatch { path: PathBuf, missing: Vec<String> },

    /// A tabular row has an empty `body` or `author` value.
    #[error("CSV '{path}' row {row}: column '{field}' is empty")]
    EmptyField {
        path: PathBuf,
        row: usize,
        field: &'static str,
    },

    /// The CSV reader rejected the file.
    #[error("Failed to parse CSV '{path}': {detail}")]
    Csv { path: PathBuf, detail: String },

    /// The DOCX container could not be opened or parsed.
    #[error("Failed to read DOCX '{path}': {detail}")]
    Docx { path: PathBuf, detail: String },

    /// The external PDF text-extraction tool failed or produced no output.
    #[error("Text extraction with '{tool}' failed for '{path}': {detail}\nIs poppler-utils installed?")]
    ExternalToolFailure {
        tool: String,
        path: PathBuf,
        detail: String,
    },

    // ── Composition errors ────────────────────────────────────────────────
    /// The source image is unreadable or not a decodable raster format.
    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The composited image could not be encoded.
    #[error("Failed to encode meme image: {source}")]
    ImageEncode {
        #[source]
        source: image::ImageError,
    },

    /// The output directory or file could not be written.
    #[error("Failed to write output image under '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured font is unreadable or not a TrueType/OpenType face.
    #[error("Failed to load font '{source_name}': {detail}")]
    FontLoad { source_name: String, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Why a single raw line could not become a [`crate::Quote`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LineError {
    /// No `-` delimiter anywhere in the line.
    #[error("missing ' - ' delimiter between body and author")]
    MissingDelimiter,

    /// Nothing left of the body after trimming.
    #[error("quote body is empty")]
    EmptyBody,

    /// Nothing left of the author after trimming.
    #[error("quote author is empty")]
    EmptyAuthor,
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = MemeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_line_display_names_location() {
        let e = MemeError::MalformedLine {
            path: PathBuf::from("quotes.txt"),
            line: 7,
            content: "no delimiter here".into(),
            reason: LineError::MissingDelimiter,
        };
        let msg = e.to_string();
        assert!(msg.contains("quotes.txt:7"), "got: {msg}");
        assert!(msg.contains("no delimiter here"), "got: {msg}");
    }

    #[test]
    fn schema_mismatch_lists_columns() {
        let e = MemeError::SchemaMismatch {
            path: PathBuf::from("q.csv"),
            missing: vec!["body".into(), "author".into()],
        };
        assert!(e.to_string().contains("body, author"));
    }

    #[test]
    fn no_ingestor_display() {
        let e = MemeError::NoIngestorMatched {
            path: PathBuf::from("quotes.xlsx"),
            supported: vec!["txt".into(), "csv".into()],
        };
        let msg = e.to_string();
        assert!(msg.contains("quotes.xlsx"));
        assert!(msg.ends_with("Supported extensions: txt, csv."), "{msg}");
    }

    #[test]
    fn external_tool_display() {
        let e = MemeError::ExternalToolFailure {
            tool: "pdftotext".into(),
            path: PathBuf::from("q.pdf"),
            detail: "exit status 1".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("pdftotext"));
        assert!(msg.contains("exit status 1"));
    }
}

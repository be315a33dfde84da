//! Tabular ingestor: CSV with a `body` and an `author` header column.
//!
//! Cell values are taken verbatim; no trimming or quote stripping happens
//! here because the CSV reader already resolves field quoting. A cell that
//! is empty or whitespace-only still counts as missing.

use super::{ensure_ingestible, QuoteIngestor};
use crate::error::{LineError, MemeError, Result};
use crate::quote::Quote;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

const REQUIRED_COLUMNS: [&str; 2] = ["body", "author"];

#[derive(Debug, Deserialize)]
struct QuoteRow {
    body: String,
    author: String,
}

/// Ingestor for `.csv` files.
pub struct CsvIngestor {
    extensions: Vec<&'static str>,
}

impl CsvIngestor {
    /// Create a new CSV ingestor.
    pub fn new() -> Self {
        Self {
            extensions: vec!["csv"],
        }
    }
}

impl Default for CsvIngestor {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteIngestor for CsvIngestor {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn parse(&self, path: &Path) -> Result<Vec<Quote>> {
        ensure_ingestible(self, path)?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| csv_error(path, e))?;

        let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !headers.iter().any(|h| h == **col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(MemeError::SchemaMismatch {
                path: path.to_path_buf(),
                missing,
            });
        }

        let mut quotes = Vec::new();
        for (idx, row) in reader.deserialize::<QuoteRow>().enumerate() {
            let row = row.map_err(|e| csv_error(path, e))?;
            // Header is row 1.
            let row_num = idx + 2;
            let quote = Quote::try_new(row.body, row.author).map_err(|reason| {
                let field = match reason {
                    LineError::EmptyAuthor => "author",
                    _ => "body",
                };
                empty_field(path, row_num, field)
            })?;
            quotes.push(quote);
        }

        debug!(path = %path.display(), quotes = quotes.len(), "Parsed CSV source");
        Ok(quotes)
    }
}

fn csv_error(path: &Path, err: csv::Error) -> MemeError {
    let detail = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => MemeError::ReadFailed {
            path: path.to_path_buf(),
            source,
        },
        _ => MemeError::Csv {
            path: path.to_path_buf(),
            detail,
        },
    }
}

fn empty_field(path: &Path, row: usize, field: &'static str) -> MemeError {
    MemeError::EmptyField {
        path: path.to_path_buf(),
        row,
        field,
    }
}

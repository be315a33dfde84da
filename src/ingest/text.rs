//! Plain-text ingestor: one `body - author` quote per non-empty line.

use super::{ensure_ingestible, line, QuoteIngestor};
use crate::error::{MemeError, Result};
use crate::quote::Quote;
use std::path::Path;
use tracing::debug;

/// Ingestor for `.txt` files.
pub struct TextIngestor {
    extensions: Vec<&'static str>,
}

impl TextIngestor {
    /// Create a new plain-text ingestor.
    pub fn new() -> Self {
        Self {
            extensions: vec!["txt"],
        }
    }
}

impl Default for TextIngestor {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteIngestor for TextIngestor {
    fn name(&self) -> &'static str {
        "txt"
    }

    fn extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn parse(&self, path: &Path) -> Result<Vec<Quote>> {
        ensure_ingestible(self, path)?;

        let content = std::fs::read_to_string(path).map_err(|e| MemeError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        let content = content.strip_prefix('\u{FEFF}').unwrap_or(&content);

        let quotes = line::parse_lines(content.lines(), path)?;
        debug!(path = %path.display(), quotes = quotes.len(), "Parsed text source");
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_lines_with_crlf_and_bom() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all("\u{FEFF}\"Quote 1\" - Author 1\r\n\r\n\"Quote 2\" - Author 2\r\n".as_bytes())
            .unwrap();

        let quotes = TextIngestor::new().parse(file.path()).unwrap();
        assert_eq!(
            quotes,
            vec![Quote::new("Quote 1", "Author 1"), Quote::new("Quote 2", "Author 2")]
        );
    }

    #[test]
    fn wrong_extension_is_format_mismatch() {
        let err = TextIngestor::new().parse(Path::new("quotes.csv")).unwrap_err();
        assert!(matches!(err, MemeError::FormatMismatch { ingestor: "txt", .. }));
    }

    #[test]
    fn missing_file_is_read_failure() {
        let err = TextIngestor::new()
            .parse(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(matches!(err, MemeError::ReadFailed { .. }));
    }
}

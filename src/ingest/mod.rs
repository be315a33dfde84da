//! Quote ingestion: turn TXT, CSV, DOCX and PDF sources into [`Quote`]s.
//!
//! Each format lives in its own submodule and implements [`QuoteIngestor`].
//! The [`Ingestor`] dispatcher owns an ordered list of them and hands every
//! path to the first one whose extension set matches.
//!
//! ```text
//! path ──▶ Ingestor ──▶ docx | tabular | txt | pdf ──▶ Vec<Quote>
//!                                 │            │
//!                                 └── line ◀───┘ (body - author parser)
//! ```

pub mod docx;
pub mod line;
pub mod pdf;
pub mod tabular;
pub mod text;

use crate::config::IngestConfig;
use crate::error::{MemeError, Result};
use crate::quote::Quote;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub use self::docx::DocxIngestor;
pub use self::pdf::PdfIngestor;
pub use self::tabular::CsvIngestor;
pub use self::text::TextIngestor;

/// A source format that can be tested for and parsed into quotes.
pub trait QuoteIngestor: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// File extensions this ingestor accepts, without the dot.
    fn extensions(&self) -> &[&str];

    /// Whether `path` carries one of [`Self::extensions`].
    ///
    /// Case-sensitive exact match; file contents are never inspected.
    fn can_ingest(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }

    /// Parse `path` into quotes in document order.
    ///
    /// Fails with [`MemeError::FormatMismatch`] when [`Self::can_ingest`]
    /// would return `false`.
    fn parse(&self, path: &Path) -> Result<Vec<Quote>>;
}

/// Shared guard for the `parse` precondition.
pub(crate) fn ensure_ingestible<I: QuoteIngestor + ?Sized>(ingestor: &I, path: &Path) -> Result<()> {
    if ingestor.can_ingest(path) {
        Ok(())
    } else {
        Err(MemeError::FormatMismatch {
            ingestor: ingestor.name(),
            path: path.to_path_buf(),
        })
    }
}

/// Dispatcher selecting the first capable ingestor for a path.
pub struct Ingestor {
    /// Ingestors in priority order
    ingestors: Vec<Arc<dyn QuoteIngestor>>,
}

impl Ingestor {
    /// Create a dispatcher with the built-in ingestors: DOCX, CSV, TXT, PDF.
    pub fn new(config: &IngestConfig) -> Self {
        let ingestors: Vec<Arc<dyn QuoteIngestor>> = vec![
            Arc::new(DocxIngestor::new()),
            Arc::new(CsvIngestor::new()),
            Arc::new(TextIngestor::new()),
            Arc::new(PdfIngestor::new(config.clone())),
        ];
        Self { ingestors }
    }

    /// Get the ingestor that would handle `path`.
    pub fn ingestor_for(&self, path: &Path) -> Option<Arc<dyn QuoteIngestor>> {
        self.ingestors
            .iter()
            .find(|ingestor| ingestor.can_ingest(path))
            .map(Arc::clone)
    }

    /// Whether any registered ingestor accepts `path`.
    pub fn can_ingest(&self, path: &Path) -> bool {
        self.ingestor_for(path).is_some()
    }

    /// Parse one source with the first matching ingestor.
    pub fn parse(&self, path: &Path) -> Result<Vec<Quote>> {
        let ingestor = self
            .ingestor_for(path)
            .ok_or_else(|| MemeError::NoIngestorMatched {
                path: path.to_path_buf(),
                supported: self
                    .supported_extensions()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })?;

        debug!(ingestor = ingestor.name(), path = %path.display(), "Dispatching quote source");

        let quotes = ingestor.parse(path)?;
        info!("Ingested {} quotes from {}", quotes.len(), path.display());
        Ok(quotes)
    }

    /// Parse every source in order and concatenate the results.
    ///
    /// Fail-fast: the first failing source aborts the batch and no partial
    /// result is returned.
    pub fn ingest<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<Quote>> {
        let mut quotes = Vec::new();
        for path in paths {
            quotes.extend(self.parse(path.as_ref())?);
        }
        Ok(quotes)
    }

    /// Register a custom ingestor ahead of the built-in ones.
    pub fn register(&mut self, ingestor: Arc<dyn QuoteIngestor>) {
        self.ingestors.insert(0, ingestor);
    }

    /// List every extension some ingestor accepts, in priority order.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = Vec::new();
        for ingestor in &self.ingestors {
            for ext in ingestor.extensions() {
                if !exts.contains(ext) {
                    exts.push(*ext);
                }
            }
        }
        exts
    }
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new(&IngestConfig::default())
    }
}

/// Parse every source with a default-configured dispatcher.
pub fn ingest_files<P: AsRef<Path>>(paths: &[P], config: &IngestConfig) -> Result<Vec<Quote>> {
    Ingestor::new(config).ingest(paths)
}

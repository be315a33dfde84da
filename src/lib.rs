//! # quotemaker
//!
//! Ingest quotations from TXT, CSV, DOCX and PDF sources and composite them
//! onto photographs as captioned "memes".
//!
//! ## Pipeline Overview
//!
//! ```text
//! quote files                          photo
//!  │                                     │
//!  ├─ 1. Dispatch  extension → ingestor  │
//!  ├─ 2. Parse     txt | csv | docx | pdf (pdftotext, scratch file)
//!  └─▶ Vec<Quote> ──── pick one ────────▶├─ 3. Resize  proportional, ≤ max_width
//!                                        ├─ 4. Wrap    greedy, by characters
//!                                        ├─ 5. Place   random point in a safe range
//!                                        ├─ 6. Render  glyph outlines on an overlay
//!                                        └─ 7. Output  meme-<random>.jpg, exclusive create
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quotemaker::{ingest_files, Font, IngestConfig, MemeConfig, MemeEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let quotes = ingest_files(&["quotes.txt", "quotes.csv"], &IngestConfig::default())?;
//!
//!     let config = MemeConfig::builder()
//!         .output_dir("./static")
//!         .font(Font::from_file("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf")?)
//!         .build()?;
//!     let engine = MemeEngine::new(config)?;
//!
//!     let path = engine.compose("dog.jpg", &quotes[0], 500)?;
//!     println!("{}", path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `meme` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! quotemaker = { version = "0.1", default-features = false }
//! ```
//!
//! ## External tools
//!
//! PDF ingestion shells out to `pdftotext` (poppler-utils). The program and
//! its arguments are configurable through [`IngestConfig`].

// ── Modules ──────────────────────────────────────────────────────────────

pub mod compose;
pub mod config;
pub mod error;
pub mod ingest;
pub mod library;
pub mod offload;
pub mod quote;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use compose::font::Font;
pub use compose::{CaptionLayout, MemeEngine};
pub use config::{IngestConfig, MemeConfig, MemeConfigBuilder, OutputFormat, TextColor};
pub use error::{LineError, MemeError};
pub use ingest::{ingest_files, Ingestor, QuoteIngestor};
pub use offload::{compose_async, ingest_files_async};
pub use quote::Quote;

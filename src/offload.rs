//! Async entry points.
//!
//! Ingestion and composition are CPU- and file-bound. Running them directly
//! on a tokio worker would stall every other task on that thread, so these
//! wrappers move the work onto the blocking pool.

use crate::compose::MemeEngine;
use crate::config::IngestConfig;
use crate::error::{MemeError, Result};
use crate::ingest;
use crate::quote::Quote;
use std::path::PathBuf;
use std::sync::Arc;

/// [`ingest::ingest_files`] on the blocking pool.
pub async fn ingest_files_async(paths: Vec<PathBuf>, config: IngestConfig) -> Result<Vec<Quote>> {
    tokio::task::spawn_blocking(move || ingest::ingest_files(&paths, &config))
        .await
        .map_err(|e| MemeError::Internal(format!("ingest task panicked: {e}")))?
}

/// [`MemeEngine::compose`] on the blocking pool.
pub async fn compose_async(
    engine: Arc<MemeEngine>,
    image_path: PathBuf,
    quote: Quote,
    width: u32,
) -> Result<PathBuf> {
    tokio::task::spawn_blocking(move || engine.compose(&image_path, &quote, width))
        .await
        .map_err(|e| MemeError::Internal(format!("compose task panicked: {e}")))?
}

//! Picking source photos and quotes.
//!
//! A "library" is just a directory of images: the caller hands over a
//! directory and gets back every file the `image` crate can decode, in a
//! stable order, so a seeded pick is reproducible.

use crate::error::{MemeError, Result};
use image::ImageFormat;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// List decodable images directly inside `dir`, sorted by path.
///
/// Subdirectories are not descended into. Files whose extension does not
/// name a readable image format are skipped with a warning.
pub fn list_images(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let read_err = |source| MemeError::ReadFailed {
        path: dir.to_path_buf(),
        source,
    };

    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_dir() {
            continue;
        }
        if is_image(&path) {
            images.push(path);
        } else {
            warn!("Skipping non-image file {}", path.display());
        }
    }
    images.sort();

    debug!("Found {} images in {}", images.len(), dir.display());
    Ok(images)
}

/// Whether the extension of `path` names an image format we can read.
pub fn is_image(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok_and(|f| f.reading_enabled())
}

/// Pick one element uniformly, or `None` when `items` is empty.
pub fn choose<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}

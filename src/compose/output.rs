//! Persisting composited images under a unique name.
//!
//! The image is encoded fully in memory first, so an encoder failure never
//! leaves a half-written file behind. The file itself is created with
//! exclusive-create semantics (`tempfile`), so two calls, concurrent or not,
//! can never pick the same path in the same directory.

use crate::config::OutputFormat;
use crate::error::MemeError;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Encode `image` in `format`.
pub fn encode(image: &RgbaImage, format: OutputFormat) -> Result<Vec<u8>, MemeError> {
    let mut buf = Vec::new();
    match format {
        OutputFormat::Jpeg { quality } => {
            // JPEG has no alpha channel.
            let rgb = DynamicImage::ImageRgba8(image.clone()).into_rgb8();
            DynamicImage::ImageRgb8(rgb)
                .write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))
                .map_err(|source| MemeError::ImageEncode { source })?;
        }
        OutputFormat::Png => {
            image
                .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
                .map_err(|source| MemeError::ImageEncode { source })?;
        }
    }
    Ok(buf)
}

/// Encode `image` and write it to a new, uniquely named file in `dir`.
///
/// `dir` is created when missing. Returns the path of the written file.
pub fn persist(image: &RgbaImage, dir: &Path, format: OutputFormat) -> Result<PathBuf, MemeError> {
    let bytes = encode(image, format)?;
    write_unique(&bytes, dir, format.extension())
}

/// Write `bytes` to `dir/meme-<random>.<ext>`.
pub fn write_unique(bytes: &[u8], dir: &Path, ext: &str) -> Result<PathBuf, MemeError> {
    let write_err = |source: std::io::Error| MemeError::OutputWrite {
        path: dir.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(write_err)?;

    let suffix = format!(".{ext}");
    let mut file = tempfile::Builder::new()
        .prefix("meme-")
        .suffix(&suffix)
        .rand_bytes(12)
        .tempfile_in(dir)
        .map_err(write_err)?;

    file.write_all(bytes).map_err(write_err)?;
    file.flush().map_err(write_err)?;

    let (_, path) = file.keep().map_err(|e| write_err(e.error))?;
    make_world_readable(&path).map_err(write_err)?;

    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}

/// Generated images are meant to be served; tempfile creates them 0600.
#[cfg(unix)]
fn make_world_readable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn make_world_readable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

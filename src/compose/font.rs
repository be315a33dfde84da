//! Caption font loading and line metrics.
//!
//! The font bytes are parsed once on load to reject non-font files early,
//! then kept behind an `Arc` so engines and their clones share one copy.
//! `ttf_parser::Face` borrows the bytes, so a face is re-parsed per render;
//! parsing only reads table offsets and costs microseconds.

use crate::error::MemeError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Well-known TrueType locations searched by [`Font::discover`], most
/// specific first.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "fonts/LilitaOne-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// A parsed-once TrueType/OpenType font.
#[derive(Clone)]
pub struct Font {
    data: Arc<Vec<u8>>,
    name: String,
}

impl Font {
    /// Load a font file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MemeError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| MemeError::FontLoad {
            source_name: path.display().to_string(),
            detail: e.to_string(),
        })?;
        Self::from_bytes(data, path.display().to_string())
    }

    /// Wrap raw font bytes; `name` is only used in logs and errors.
    pub fn from_bytes(data: Vec<u8>, name: impl Into<String>) -> Result<Self, MemeError> {
        let name = name.into();
        ttf_parser::Face::parse(&data, 0).map_err(|e| MemeError::FontLoad {
            source_name: name.clone(),
            detail: e.to_string(),
        })?;
        Ok(Self {
            data: Arc::new(data),
            name,
        })
    }

    /// Load the first readable font from a list of well-known locations.
    pub fn discover() -> Option<Self> {
        Self::discover_in(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from))
    }

    /// Load the first candidate that parses as a font.
    pub fn discover_in<I>(candidates: I) -> Option<Self>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        candidates.into_iter().find_map(|path| {
            if !path.is_file() {
                return None;
            }
            match Self::from_file(&path) {
                Ok(font) => {
                    debug!("Using caption font {}", path.display());
                    Some(font)
                }
                Err(e) => {
                    debug!("Skipping font candidate: {}", e);
                    None
                }
            }
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parse the face. Cannot fail for bytes accepted by the constructors.
    pub(crate) fn face(&self) -> Result<ttf_parser::Face<'_>, MemeError> {
        ttf_parser::Face::parse(&self.data, 0).map_err(|e| MemeError::FontLoad {
            source_name: self.name.clone(),
            detail: e.to_string(),
        })
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Vertical metrics of a face at a given pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from the top of a line box to its baseline.
    pub ascent: f32,
    /// Distance between consecutive baselines.
    pub line_height: f32,
}

impl LineMetrics {
    pub fn from_face(face: &ttf_parser::Face<'_>, font_size: f32) -> Self {
        let scale = font_size / f32::from(face.units_per_em());
        let ascent = f32::from(face.ascender()) * scale;
        let descent = f32::from(face.descender()) * scale;
        let gap = f32::from(face.line_gap()) * scale;
        let line_height = (ascent - descent + gap).max(font_size);
        Self {
            ascent,
            line_height,
        }
    }
}

//! Configuration types for ingestion and meme composition.
//!
//! Composition behaviour is controlled through [`MemeConfig`], built via its
//! [`MemeConfigBuilder`]. The config is read-only once an engine owns it, so
//! one engine can serve concurrent callers. Ingestion has far fewer knobs and
//! uses the plain [`IngestConfig`] struct.

use crate::compose::font::Font;
use crate::error::MemeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Settings for the quote ingestors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// External layout-preserving PDF text extractor. Default: `pdftotext`.
    pub pdftotext_program: String,

    /// Arguments placed before `<input.pdf> <output.txt>`. Default: `["-layout"]`.
    pub pdftotext_args: Vec<String>,

    /// Directory for the per-call extraction file. `None` uses the system
    /// temp directory.
    pub scratch_dir: Option<PathBuf>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            pdftotext_program: "pdftotext".to_string(),
            pdftotext_args: vec!["-layout".to_string()],
            scratch_dir: None,
        }
    }
}

/// Configuration for the meme composition engine.
///
/// Built via [`MemeConfig::builder()`] or using [`MemeConfig::default()`].
/// A font must be supplied before the config can drive an engine.
///
/// # Example
/// ```rust,no_run
/// use quotemaker::{Font, MemeConfig};
///
/// let config = MemeConfig::builder()
///     .output_dir("./static")
///     .max_width(500)
///     .font(Font::from_file("fonts/LilitaOne-Regular.ttf").unwrap())
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct MemeConfig {
    /// Directory receiving generated images. Created on demand. Default: `./static`.
    pub output_dir: PathBuf,

    /// Upper bound for the requested width; larger requests are reduced
    /// silently. Default: 500.
    pub max_width: u32,

    /// Maximum characters per wrapped body line. Default: 25.
    pub wrap_width: usize,

    /// Font size in pixels for body and author. Default: 40.
    pub font_size: f32,

    /// Minimum distance in pixels between text and image edges. Default: 10.
    pub margin: u32,

    /// Vertical gap in pixels between the body block and the author line. Default: 10.
    pub author_spacing: u32,

    /// Fill colour for all text. Default: opaque white.
    pub text_color: TextColor,

    /// Encoding of the persisted image. Default: JPEG, quality 90.
    pub output_format: OutputFormat,

    /// Caption font. Required by [`crate::MemeEngine::new`].
    pub font: Option<Font>,
}

impl Default for MemeConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./static"),
            max_width: 500,
            wrap_width: 25,
            font_size: 40.0,
            margin: 10,
            author_spacing: 10,
            text_color: TextColor::WHITE,
            output_format: OutputFormat::default(),
            font: None,
        }
    }
}

impl fmt::Debug for MemeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemeConfig")
            .field("output_dir", &self.output_dir)
            .field("max_width", &self.max_width)
            .field("wrap_width", &self.wrap_width)
            .field("font_size", &self.font_size)
            .field("margin", &self.margin)
            .field("author_spacing", &self.author_spacing)
            .field("text_color", &self.text_color)
            .field("output_format", &self.output_format)
            .field("font", &self.font.as_ref().map(|f| f.name().to_string()))
            .finish()
    }
}

impl MemeConfig {
    /// Create a new builder for `MemeConfig`.
    pub fn builder() -> MemeConfigBuilder {
        MemeConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`MemeConfig`].
#[derive(Debug)]
pub struct MemeConfigBuilder {
    config: MemeConfig,
}

impl MemeConfigBuilder {
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn max_width(mut self, px: u32) -> Self {
        self.config.max_width = px.max(1);
        self
    }

    pub fn wrap_width(mut self, chars: usize) -> Self {
        self.config.wrap_width = chars.max(1);
        self
    }

    pub fn font_size(mut self, px: f32) -> Self {
        self.config.font_size = px.clamp(4.0, 512.0);
        self
    }

    pub fn margin(mut self, px: u32) -> Self {
        self.config.margin = px;
        self
    }

    pub fn author_spacing(mut self, px: u32) -> Self {
        self.config.author_spacing = px;
        self
    }

    pub fn text_color(mut self, color: TextColor) -> Self {
        self.config.text_color = color;
        self
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.config.font = Some(font);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<MemeConfig, MemeError> {
        let c = &self.config;
        if c.output_dir.as_os_str().is_empty() {
            return Err(MemeError::InvalidConfig(
                "output directory must not be empty".into(),
            ));
        }
        if !c.font_size.is_finite() {
            return Err(MemeError::InvalidConfig(format!(
                "font size must be finite, got {}",
                c.font_size
            )));
        }
        if let OutputFormat::Jpeg { quality } = c.output_format {
            if !(1..=100).contains(&quality) {
                return Err(MemeError::InvalidConfig(format!(
                    "JPEG quality must be 1–100, got {quality}"
                )));
            }
        }
        Ok(self.config)
    }
}

// ── Value types ──────────────────────────────────────────────────────────

/// Straight (non-premultiplied) RGBA text colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TextColor {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for TextColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Raster format written to the output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Lossy JPEG with the given quality (1–100).
    Jpeg { quality: u8 },
    /// Lossless PNG.
    Png,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Jpeg { quality: 90 }
    }
}

impl OutputFormat {
    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg { .. } => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = MemeConfig::default();
        assert_eq!(c.max_width, 500);
        assert_eq!(c.font_size, 40.0);
        assert_eq!(c.output_dir, PathBuf::from("./static"));
        assert_eq!(c.output_format.extension(), "jpg");
        assert!(c.font.is_none());
    }

    #[test]
    fn builder_clamps_values() {
        let c = MemeConfig::builder()
            .max_width(0)
            .wrap_width(0)
            .font_size(10_000.0)
            .build()
            .unwrap();
        assert_eq!(c.max_width, 1);
        assert_eq!(c.wrap_width, 1);
        assert_eq!(c.font_size, 512.0);
    }

    #[test]
    fn builder_rejects_bad_jpeg_quality() {
        let err = MemeConfig::builder()
            .output_format(OutputFormat::Jpeg { quality: 0 })
            .build()
            .unwrap_err();
        assert!(matches!(err, MemeError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_empty_output_dir() {
        assert!(MemeConfig::builder().output_dir("").build().is_err());
    }

    #[test]
    fn ingest_defaults_use_layout_mode() {
        let c = IngestConfig::default();
        assert_eq!(c.pdftotext_program, "pdftotext");
        assert_eq!(c.pdftotext_args, vec!["-layout".to_string()]);
        assert!(c.scratch_dir.is_none());
    }
}

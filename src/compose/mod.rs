//! Meme composition: put a [`Quote`] on a photo.
//!
//! Each submodule implements exactly one step, so each is independently
//! testable:
//!
//! ```text
//! load ──▶ resize ──▶ wrap ──▶ layout ──▶ render ──▶ output
//! (image)  (width)    (chars)  (range)    (glyphs)   (unique file)
//! ```
//!
//! 1. [`resize`]: proportional resize to the clamped width
//! 2. [`wrap`]: greedy word wrap of the body by character count
//! 3. [`layout`]: estimated block size and the valid top-left range
//! 4. [`render`]: glyph outlines filled on an overlay, composited on the photo
//! 5. [`output`]: in-memory encode, exclusive-create write

pub mod font;
pub mod glyph;
pub mod layout;
pub mod output;
pub mod render;
pub mod resize;
pub mod wrap;

use crate::config::MemeConfig;
use crate::error::{MemeError, Result};
use crate::quote::Quote;
use font::{Font, LineMetrics};
use image::{DynamicImage, ImageReader, RgbaImage};
use layout::{BlockSize, PlacementRange};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use render::TextPainter;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};
use wrap::WrappedText;

/// Everything decided about a caption before any pixel is drawn.
#[derive(Debug, Clone, Serialize)]
pub struct CaptionLayout {
    /// Body split into display lines.
    #[serde(serialize_with = "serialize_lines")]
    pub body: WrappedText,
    /// The line drawn under the body.
    pub author_line: String,
    /// Estimated caption footprint.
    pub block: BlockSize,
    /// Valid top-left corners for the caption.
    pub range: PlacementRange,
}

fn serialize_lines<S: serde::Serializer>(body: &WrappedText, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.collect_seq(body.lines())
}

/// Composites quotes onto images and writes the results.
///
/// Configuration and font are read-only after construction; the random
/// source is the only mutable state and is locked just for the placement
/// pick, so one engine can be shared across threads.
pub struct MemeEngine {
    config: MemeConfig,
    font: Font,
    metrics: LineMetrics,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl MemeEngine {
    /// Create an engine with an OS-seeded random source.
    pub fn new(config: MemeConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Create an engine whose placements follow `seed`.
    pub fn with_seed(config: MemeConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Create an engine with a caller-supplied random source.
    pub fn with_rng(config: MemeConfig, rng: impl RngCore + Send + 'static) -> Result<Self> {
        let font = config.font.clone().ok_or_else(|| {
            MemeError::InvalidConfig(
                "a caption font is required (MemeConfig::font, --font or MEME_FONT)".into(),
            )
        })?;
        let metrics = LineMetrics::from_face(&font.face()?, config.font_size);
        Ok(Self {
            config,
            font,
            metrics,
            rng: Mutex::new(Box::new(rng)),
        })
    }

    pub fn config(&self) -> &MemeConfig {
        &self.config
    }

    /// Composite `quote` onto the image at `image_path` and persist it.
    ///
    /// `width` above [`MemeConfig::max_width`] is reduced silently. Returns
    /// the path of a newly created file under [`MemeConfig::output_dir`].
    pub fn compose(&self, image_path: impl AsRef<Path>, quote: &Quote, width: u32) -> Result<PathBuf> {
        let image_path = image_path.as_ref();
        let img = load_image(image_path)?;
        let canvas = self.compose_image(&img, quote, width)?;
        let out = output::persist(&canvas, &self.config.output_dir, self.config.output_format)?;
        info!(
            "Composed meme {} ({}x{}) from {}",
            out.display(),
            canvas.width(),
            canvas.height(),
            image_path.display()
        );
        Ok(out)
    }

    /// In-memory variant of [`Self::compose`]: no file is read or written.
    pub fn compose_image(&self, img: &DynamicImage, quote: &Quote, width: u32) -> Result<RgbaImage> {
        let width = self.clamp_width(width);
        let resized = resize::proportional_resize(img, width);
        let layout = self.layout(resized.width(), resized.height(), quote);
        let origin = self.pick_origin(&layout.range);
        debug!(
            lines = layout.body.line_count(),
            x = origin.0,
            y = origin.1,
            range = ?layout.range,
            "Placing caption"
        );

        let mut canvas = resized.into_rgba8();
        self.render_caption(&mut canvas, &layout, origin)?;
        Ok(canvas)
    }

    /// Wrap the body and compute the placement range for a `width`×`height`
    /// image, without rendering.
    pub fn layout(&self, width: u32, height: u32, quote: &Quote) -> CaptionLayout {
        let body = wrap::wrap_text(quote.body(), self.config.wrap_width);
        let author_line = author_line(quote);
        let block =
            layout::estimate_block(&body, &author_line, self.metrics.line_height, &self.config);
        let range = layout::placement_range(width, height, block, self.config.margin);
        CaptionLayout {
            body,
            author_line,
            block,
            range,
        }
    }

    /// Draw the body at `origin` and the author line below it.
    pub fn render_caption(
        &self,
        canvas: &mut RgbaImage,
        layout: &CaptionLayout,
        origin: (u32, u32),
    ) -> Result<()> {
        let face = self.font.face()?;
        let painter = TextPainter::new(&face, self.config.font_size, self.config.text_color);
        let mut overlay = render::overlay_for(canvas)?;

        let (x, y) = (origin.0 as f32, origin.1 as f32);
        let body_height = painter.draw_lines(&mut overlay, layout.body.lines(), x, y);
        let author_y = y + body_height + self.config.author_spacing as f32;
        painter.draw_lines(&mut overlay, std::slice::from_ref(&layout.author_line), x, author_y);

        render::composite(canvas, &overlay);
        Ok(())
    }

    fn clamp_width(&self, width: u32) -> u32 {
        width.clamp(1, self.config.max_width)
    }

    fn pick_origin(&self, range: &PlacementRange) -> (u32, u32) {
        // A poisoned lock only means another caller panicked mid-pick; the
        // generator state is still usable.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        range.pick(&mut **rng)
    }
}

impl fmt::Debug for MemeEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemeEngine")
            .field("config", &self.config)
            .field("metrics", &self.metrics)
            .field("rng", &"<dyn RngCore>")
            .finish()
    }
}

/// The line drawn under the body.
pub fn author_line(quote: &Quote) -> String {
    format!("- {}", quote.author())
}

/// Decode an image, sniffing the format from content when the extension lies.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let load_err = |source: image::ImageError| MemeError::ImageLoad {
        path: path.to_path_buf(),
        source,
    };
    ImageReader::open(path)
        .map_err(|e| load_err(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| load_err(image::ImageError::IoError(e)))?
        .decode()
        .map_err(load_err)
}

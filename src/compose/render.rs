//! Caption rasterisation.
//!
//! Glyphs are filled into a transparent tiny-skia overlay the size of the
//! photo, then the overlay is alpha-composited onto the RGBA image. Drawing
//! into a separate layer keeps tiny-skia's premultiplied pixels away from
//! the photo's straight-alpha buffer.

use super::font::LineMetrics;
use super::glyph::{glyph_path, glyph_transform};
use crate::config::TextColor;
use crate::error::MemeError;
use image::RgbaImage;
use tiny_skia::{FillRule, Paint, Pixmap};
use ttf_parser::{Face, GlyphId};

/// Draws text lines onto an overlay with one face, size and colour.
pub struct TextPainter<'a> {
    face: &'a Face<'a>,
    font_size: f32,
    metrics: LineMetrics,
    paint: Paint<'static>,
}

impl<'a> TextPainter<'a> {
    pub fn new(face: &'a Face<'a>, font_size: f32, color: TextColor) -> Self {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;
        Self {
            face,
            font_size,
            metrics: LineMetrics::from_face(face, font_size),
            paint,
        }
    }

    pub fn metrics(&self) -> LineMetrics {
        self.metrics
    }

    /// Draw `lines` with the top of the first line box at `(x, y)`.
    ///
    /// Returns the height of the drawn block.
    pub fn draw_lines<S: AsRef<str>>(&self, canvas: &mut Pixmap, lines: &[S], x: f32, y: f32) -> f32 {
        for (i, line) in lines.iter().enumerate() {
            let baseline = y + self.metrics.ascent + i as f32 * self.metrics.line_height;
            self.draw_line(canvas, line.as_ref(), x, baseline);
        }
        lines.len() as f32 * self.metrics.line_height
    }

    /// Draw one line on `baseline`; returns its advance width.
    pub fn draw_line(&self, canvas: &mut Pixmap, text: &str, x: f32, baseline: f32) -> f32 {
        let scale = self.font_size / f32::from(self.face.units_per_em());
        let mut pen_x = x;

        for ch in text.chars() {
            let glyph = self.face.glyph_index(ch).unwrap_or(GlyphId(0));
            if let Some(path) = glyph_path(self.face, glyph) {
                canvas.fill_path(
                    &path,
                    &self.paint,
                    FillRule::Winding,
                    glyph_transform(scale, pen_x, baseline),
                    None,
                );
            }
            pen_x += f32::from(self.face.glyph_hor_advance(glyph).unwrap_or(0)) * scale;
        }

        pen_x - x
    }
}

/// A transparent overlay matching `image`'s dimensions.
pub fn overlay_for(image: &RgbaImage) -> Result<Pixmap, MemeError> {
    Pixmap::new(image.width(), image.height()).ok_or_else(|| {
        MemeError::Internal(format!(
            "cannot allocate {}x{} text overlay",
            image.width(),
            image.height()
        ))
    })
}

/// Source-over composite of a premultiplied overlay onto a straight-alpha image.
///
/// The blend runs in premultiplied space and the result is divided back by
/// its alpha, so translucent photo pixels keep their true colour.
pub fn composite(base: &mut RgbaImage, overlay: &Pixmap) {
    for (dst, src) in base.pixels_mut().zip(overlay.pixels()) {
        let sa = u32::from(src.alpha());
        if sa == 0 {
            continue;
        }
        let inv = 255 - sa;
        let [r, g, b, a] = dst.0;
        let da = u32::from(a);
        // sa > 0, so out_a > 0.
        let out_a = (sa + div255(da * inv)).min(255);
        let over = |src_premul: u8, dst: u8| {
            let dst_premul = div255(u32::from(dst) * da);
            let out_premul = u32::from(src_premul) + div255(dst_premul * inv);
            ((out_premul * 255 + out_a / 2) / out_a).min(255) as u8
        };
        dst.0 = [
            over(src.red(), r),
            over(src.green(), g),
            over(src.blue(), b),
            out_a as u8,
        ];
    }
}

fn div255(v: u32) -> u32 {
    (v + 127) / 255
}

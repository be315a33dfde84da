//! Glyph outlines as tiny-skia paths.
//!
//! Outlines are recorded in font design units (y-up); [`glyph_transform`]
//! scales them to pixels and flips them onto the y-down canvas.

use tiny_skia::{Path, PathBuilder, Transform};

/// Receives `ttf_parser` outline commands and builds a tiny-skia `Path`.
pub struct GlyphOutlineBuilder {
    builder: PathBuilder,
}

impl GlyphOutlineBuilder {
    pub fn new() -> Self {
        Self {
            builder: PathBuilder::new(),
        }
    }

    /// `None` for glyphs without contours, such as the space.
    pub fn finish(self) -> Option<Path> {
        self.builder.finish()
    }
}

impl Default for GlyphOutlineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ttf_parser::OutlineBuilder for GlyphOutlineBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Outline of `glyph` in design units.
pub fn glyph_path(face: &ttf_parser::Face<'_>, glyph: ttf_parser::GlyphId) -> Option<Path> {
    let mut builder = GlyphOutlineBuilder::new();
    face.outline_glyph(glyph, &mut builder)?;
    builder.finish()
}

/// Design units → pixels at baseline origin `(x, y)`, flipping the y axis.
#[inline]
pub fn glyph_transform(scale: f32, x: f32, y: f32) -> Transform {
    Transform::from_row(scale, 0.0, 0.0, -scale, x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_parser::OutlineBuilder;

    #[test]
    fn builder_produces_closed_path() {
        let mut builder = GlyphOutlineBuilder::new();
        builder.move_to(0.0, 0.0);
        builder.line_to(10.0, 0.0);
        builder.quad_to(15.0, 5.0, 10.0, 10.0);
        builder.curve_to(8.0, 12.0, 2.0, 12.0, 0.0, 10.0);
        builder.close();

        let path = builder.finish().expect("path");
        let bounds = path.bounds();
        assert_eq!(bounds.left(), 0.0);
        assert!(bounds.right() >= 10.0);
    }

    #[test]
    fn empty_outline_has_no_path() {
        assert!(GlyphOutlineBuilder::new().finish().is_none());
    }

    #[test]
    fn transform_flips_y() {
        let t = glyph_transform(0.5, 10.0, 20.0);
        assert_eq!(t.sx, 0.5);
        assert_eq!(t.sy, -0.5);
        assert_eq!(t.tx, 10.0);
        assert_eq!(t.ty, 20.0);
    }
}

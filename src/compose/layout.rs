//! Placement-range computation for the caption block.
//!
//! Text width is estimated as `chars * font_size / 2` rather than measured.
//! Height uses the line advance the renderer steps by, so a caption placed
//! at `max_y` ends above the bottom margin.
//!
//! ```text
//!  ┌──────────────── image ────────────────┐
//!  │ margin                                │
//!  │   (min_x,min_y) ┌──── body ────┐       │
//!  │        ·        │ wrapped text │       │
//!  │        ·        └──────────────┘       │
//!  │        ·          author_spacing       │
//!  │        ·        - author               │
//!  │   (max_x,max_y)                 margin │
//!  └───────────────────────────────────────┘
//! ```

use super::wrap::WrappedText;
use crate::config::MemeConfig;
use rand::Rng;
use serde::Serialize;

/// Estimated footprint of the caption block in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockSize {
    pub width: u32,
    pub height: u32,
}

/// Estimate the caption size for `body` plus one author line, each line
/// `line_height` pixels tall.
pub fn estimate_block(
    body: &WrappedText,
    author_line: &str,
    line_height: f32,
    config: &MemeConfig,
) -> BlockSize {
    let max_chars = body.max_chars().max(author_line.chars().count());
    let font_size = f64::from(config.font_size);
    let line_height = f64::from(line_height);
    let width = max_chars as f64 * (font_size / 2.0);
    let height = body.line_count() as f64 * line_height + f64::from(config.author_spacing) + line_height;
    BlockSize {
        width: width.ceil() as u32,
        height: height.ceil() as u32,
    }
}

/// Inclusive ranges for the top-left corner of the caption block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacementRange {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl PlacementRange {
    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    /// Pick a point uniformly from both ranges.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> (u32, u32) {
        let x = rng.random_range(self.min_x..=self.max_x);
        let y = rng.random_range(self.min_y..=self.max_y);
        (x, y)
    }
}

/// Compute where a block of `block` size may start inside a
/// `width`×`height` image while keeping `margin` on every side.
///
/// On images too small for the block, `max` is clamped to `min + 1`; the
/// caption may then overflow the image, but the range stays valid.
pub fn placement_range(width: u32, height: u32, block: BlockSize, margin: u32) -> PlacementRange {
    let (min_x, max_x) = axis_range(width, block.width, margin);
    let (min_y, max_y) = axis_range(height, block.height, margin);
    PlacementRange {
        min_x,
        max_x,
        min_y,
        max_y,
    }
}

fn axis_range(extent: u32, block: u32, margin: u32) -> (u32, u32) {
    let min = margin;
    let max = i64::from(extent) - i64::from(margin) - i64::from(block);
    if max < i64::from(min) {
        (min, min.saturating_add(1))
    } else {
        (min, max as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::wrap::wrap_text;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> MemeConfig {
        MemeConfig::default()
    }

    #[test]
    fn estimate_uses_half_font_size_per_char() {
        let body = wrap_text("Test body text which is too long for one line", 25);
        let block = estimate_block(&body, "- Author", 40.0, &config());
        // 23 chars * 20 px, 2 lines * 40 + 10 spacing + 40 author
        assert_eq!(block, BlockSize { width: 460, height: 130 });
    }

    #[test]
    fn height_follows_line_advance() {
        let body = wrap_text("Test body text which is too long for one line", 25);
        let block = estimate_block(&body, "- Author", 46.5, &config());
        // 3 * 46.5 + 10 = 149.5
        assert_eq!(block.height, 150);
        assert_eq!(block.width, 460);
    }

    #[test]
    fn author_can_be_the_widest_line() {
        let body = wrap_text("Hi", 25);
        let block = estimate_block(&body, "- A rather long author name", 40.0, &config());
        assert_eq!(block.width, 27 * 20);
    }

    #[test]
    fn roomy_image_keeps_margins() {
        let block = BlockSize { width: 200, height: 100 };
        let r = placement_range(500, 400, block, 10);
        assert_eq!(r, PlacementRange { min_x: 10, max_x: 290, min_y: 10, max_y: 290 });
    }

    #[test]
    fn exact_fit_gives_single_point() {
        let block = BlockSize { width: 80, height: 30 };
        let r = placement_range(100, 50, block, 10);
        assert_eq!((r.min_x, r.max_x), (10, 10));
        assert_eq!((r.min_y, r.max_y), (10, 10));
    }

    #[test]
    fn undersized_image_clamps_to_min_plus_one() {
        let block = BlockSize { width: 460, height: 130 };
        let r = placement_range(1, 1, block, 10);
        assert_eq!(r, PlacementRange { min_x: 10, max_x: 11, min_y: 10, max_y: 11 });
    }

    #[test]
    fn ranges_are_valid_for_any_image_size() {
        let body = wrap_text("Test body text which is too long for one line", 25);
        let block = estimate_block(&body, "- Author", 40.0, &config());
        for w in [1, 2, 7, 50, 99, 250, 479, 480, 481, 500, 4000] {
            for h in [1, 3, 64, 149, 150, 151, 375, 3000] {
                let r = placement_range(w, h, block, 10);
                assert!(r.min_x <= r.max_x, "{w}x{h}: {r:?}");
                assert!(r.min_y <= r.max_y, "{w}x{h}: {r:?}");
            }
        }
    }

    #[test]
    fn picks_stay_inside_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let r = PlacementRange { min_x: 10, max_x: 40, min_y: 5, max_y: 6 };
        for _ in 0..200 {
            let (x, y) = r.pick(&mut rng);
            assert!(r.contains(x, y), "({x}, {y})");
        }
    }

    #[test]
    fn same_seed_same_pick() {
        let r = PlacementRange { min_x: 0, max_x: 1000, min_y: 0, max_y: 1000 };
        let a = r.pick(&mut StdRng::seed_from_u64(42));
        let b = r.pick(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}

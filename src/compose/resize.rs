//! Proportional resizing: width is requested, height is derived.

use image::imageops::FilterType;
use image::DynamicImage;
use tracing::debug;

/// `floor(orig_h * new_w / orig_w)` in exact integer arithmetic.
///
/// Returns 0 for a zero-width source.
pub fn proportional_height(orig_w: u32, orig_h: u32, new_w: u32) -> u32 {
    if orig_w == 0 {
        return 0;
    }
    let h = u64::from(orig_h) * u64::from(new_w) / u64::from(orig_w);
    u32::try_from(h).unwrap_or(u32::MAX)
}

/// Resize `img` to exactly `new_w` pixels wide, keeping the aspect ratio.
///
/// A derived height of 0 becomes 1 so the result stays encodable.
pub fn proportional_resize(img: &DynamicImage, new_w: u32) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    let new_w = new_w.max(1);
    let new_h = proportional_height(w, h, new_w).max(1);

    if (new_w, new_h) == (w, h) {
        return img.clone();
    }

    debug!("Resizing {}x{} → {}x{}", w, h, new_w, new_h);
    img.resize_exact(new_w, new_h, FilterType::Lanczos3)
}

//! End-to-end composition tests.
//!
//! Captions need a real TrueType font. These tests search the usual system
//! font locations and skip with a message when none is installed.
//!
//! Run with:
//!   cargo test --test compose -- --nocapture

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use quotemaker::{compose_async, Font, MemeConfig, MemeEngine, MemeError, OutputFormat, Quote};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Skip this test when no system font can be found.
macro_rules! font_or_skip {
    () => {{
        match Font::discover() {
            Some(font) => font,
            None => {
                println!("SKIP — no system font available");
                return;
            }
        }
    }};
}

const DARK: Rgb<u8> = Rgb([10, 20, 60]);

fn write_photo(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, DARK).save(&path).unwrap();
    path
}

fn engine(font: Font, out: &Path, seed: u64) -> MemeEngine {
    let config = MemeConfig::builder()
        .output_dir(out)
        .font(font)
        .build()
        .unwrap();
    MemeEngine::with_seed(config, seed).unwrap()
}

fn quote() -> Quote {
    Quote::try_new("Test body text which is too long for one line", "Author").unwrap()
}

fn has_bright_pixel(img: &RgbaImage) -> bool {
    img.pixels().any(|p| p.0[0] > 180 && p.0[1] > 180 && p.0[2] > 180)
}

// ── Composition ──────────────────────────────────────────────────────────────

#[test]
fn composes_and_persists_a_jpeg() {
    let font = font_or_skip!();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("static");
    let photo = write_photo(dir.path(), "dog.jpg", 500, 500);

    let path = engine(font, &out, 1).compose(&photo, &quote(), 250).unwrap();

    assert!(path.starts_with(&out));
    assert_eq!(path.extension().unwrap(), "jpg");
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (250, 250));
    assert!(has_bright_pixel(&img), "caption was not drawn");
}

#[test]
fn resize_keeps_aspect_ratio() {
    let font = font_or_skip!();
    let dir = tempfile::tempdir().unwrap();
    let photo = write_photo(dir.path(), "wide.png", 500, 251);

    let path = engine(font, dir.path(), 2).compose(&photo, &quote(), 250).unwrap();
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (250, 125));
}

#[test]
fn width_is_clamped_to_max() {
    let font = font_or_skip!();
    let dir = tempfile::tempdir().unwrap();
    let photo = write_photo(dir.path(), "big.png", 1000, 800);
    let config = MemeConfig::builder()
        .output_dir(dir.path())
        .max_width(300)
        .font(font)
        .build()
        .unwrap();

    let path = MemeEngine::with_seed(config, 3)
        .unwrap()
        .compose(&photo, &quote(), 2000)
        .unwrap();
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (300, 240));
}

#[test]
fn one_pixel_image_still_composes() {
    let font = font_or_skip!();
    let dir = tempfile::tempdir().unwrap();
    let photo = write_photo(dir.path(), "dot.png", 1, 1);

    let path = engine(font, dir.path(), 4).compose(&photo, &quote(), 1).unwrap();
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (1, 1));
}

#[test]
fn png_output_keeps_alpha() {
    let font = font_or_skip!();
    let dir = tempfile::tempdir().unwrap();
    let photo = dir.path().join("clear.png");
    RgbaImage::from_pixel(200, 200, Rgba([0, 0, 0, 0]))
        .save(&photo)
        .unwrap();
    let config = MemeConfig::builder()
        .output_dir(dir.path().join("out"))
        .output_format(OutputFormat::Png)
        .font(font)
        .build()
        .unwrap();

    let path = MemeEngine::with_seed(config, 5)
        .unwrap()
        .compose(&photo, &Quote::try_new("Woof", "Rex").unwrap(), 200)
        .unwrap();
    assert_eq!(path.extension().unwrap(), "png");
    let img = image::open(&path).unwrap().to_rgba8();
    assert!(img.pixels().any(|p| p.0[3] == 0), "background stayed transparent");
    assert!(img.pixels().any(|p| p.0[3] > 0), "caption is visible");
}

#[test]
fn same_seed_same_pixels() {
    let font = font_or_skip!();
    let dir = tempfile::tempdir().unwrap();
    let src = image::DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 300, DARK));

    let a = engine(font.clone(), dir.path(), 42)
        .compose_image(&src, &quote(), 400)
        .unwrap();
    let b = engine(font, dir.path(), 42)
        .compose_image(&src, &quote(), 400)
        .unwrap();
    assert_eq!(a, b);
    assert!(dir.path().read_dir().unwrap().next().is_none(), "compose_image wrote a file");
}

#[test]
fn layout_is_inside_margins() {
    let font = font_or_skip!();
    let dir = tempfile::tempdir().unwrap();
    let engine = engine(font, dir.path(), 6);

    let layout = engine.layout(500, 500, &quote());
    assert_eq!(layout.body.lines(), ["Test body text which is", "too long for one line"]);
    assert_eq!(layout.author_line, "- Author");
    assert_eq!((layout.range.min_x, layout.range.max_x), (10, 30));
    // Three line advances plus spacing; real advances are at least font_size.
    assert!(layout.block.height >= 130, "{:?}", layout.block);
    assert_eq!(layout.range.min_y, 10);
    assert_eq!(layout.range.max_y, 500 - 10 - layout.block.height);

    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["body"][1], "too long for one line");
    assert_eq!(json["range"]["max_x"], 30);
}

#[test]
fn caption_at_lowest_origin_stays_above_bottom_margin() {
    let font = font_or_skip!();
    let dir = tempfile::tempdir().unwrap();
    let engine = engine(font, dir.path(), 10);
    let (width, height) = (500, 400);

    let layout = engine.layout(width, height, &quote());
    let mut canvas = RgbaImage::new(width, height);
    engine
        .render_caption(&mut canvas, &layout, (layout.range.min_x, layout.range.max_y))
        .unwrap();

    let margin = engine.config().margin;
    let ink_in_margin = (height - margin..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .filter(|&(x, y)| canvas.get_pixel(x, y).0[3] > 0)
        .count();
    assert_eq!(ink_in_margin, 0, "caption ran into the bottom margin");
    assert!(canvas.pixels().any(|p| p.0[3] > 0), "caption was not drawn");
}

// ── Errors ───────────────────────────────────────────────────────────────────

#[test]
fn unreadable_image_is_image_load_error() {
    let font = font_or_skip!();
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("bogus.jpg");
    std::fs::write(&bogus, b"not an image").unwrap();

    let err = engine(font, dir.path(), 7)
        .compose(&bogus, &quote(), 250)
        .unwrap_err();
    assert!(matches!(err, MemeError::ImageLoad { .. }), "{err}");
}

// ── Concurrency ──────────────────────────────────────────────────────────────

#[test]
fn concurrent_compositions_never_share_a_path() {
    let font = font_or_skip!();
    let dir = tempfile::tempdir().unwrap();
    let photo = write_photo(dir.path(), "dog.jpg", 120, 90);
    let engine = Arc::new(engine(font, &dir.path().join("out"), 8));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let photo = photo.clone();
            std::thread::spawn(move || {
                (0..5)
                    .map(|_| engine.compose(&photo, &Quote::try_new("Woof", "Rex").unwrap(), 120).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let paths: HashSet<PathBuf> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert_eq!(paths.len(), 20);
    assert!(paths.iter().all(|p| p.is_file()));
}

#[tokio::test]
async fn async_compose_runs_on_blocking_pool() {
    let font = font_or_skip!();
    let dir = tempfile::tempdir().unwrap();
    let photo = write_photo(dir.path(), "dog.jpg", 300, 300);
    let engine = Arc::new(engine(font, dir.path(), 9));

    let tasks: Vec<_> = (0..3)
        .map(|_| tokio::spawn(compose_async(Arc::clone(&engine), photo.clone(), quote(), 150)))
        .collect();

    let mut paths = HashSet::new();
    for task in tasks {
        paths.insert(task.await.unwrap().unwrap());
    }
    assert_eq!(paths.len(), 3);
}

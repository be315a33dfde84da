//! CLI binary for quotemaker.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `IngestConfig` / `MemeConfig`, ingests quotes and prints the paths of the
//! generated images.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use quotemaker::library::{choose, list_images};
use quotemaker::{
    compose_async, ingest_files_async, Font, IngestConfig, MemeConfig, MemeEngine, OutputFormat,
    Quote,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # One meme from a random quote and a random photo
  meme --quotes quotes.txt --image photos/

  # Several sources, ten memes, reproducible placement
  meme --quotes quotes.csv quotes.docx quotes.pdf --image photos/ --count 10 --seed 42

  # Explicit caption
  meme --image dog.jpg --body "To bark or not to bark" --author Bork

  # Just list what was ingested
  meme --quotes quotes.pdf --list --json

QUOTE SOURCES:
  .txt    one "body - author" per line
  .csv    header row with body,author columns
  .docx   one "body - author" per paragraph
  .pdf    text extracted with pdftotext, then one quote per line

ENVIRONMENT VARIABLES:
  MEME_FONT         TrueType/OpenType font for captions
  MEME_OUTPUT_DIR   Directory for generated images (default ./static)
  MEME_PDFTOTEXT    pdftotext executable (default pdftotext)
  RUST_LOG          Log filter, overrides -v / -q
"#;

/// Put quotes on photos.
#[derive(Parser, Debug)]
#[command(
    name = "meme",
    version,
    about = "Ingest quotes from TXT/CSV/DOCX/PDF files and caption photos with them",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Quote source files (.txt, .csv, .docx, .pdf).
    #[arg(long, num_args = 1.., required_unless_present = "body")]
    quotes: Vec<PathBuf>,

    /// Photo to caption, or a directory to pick photos from.
    #[arg(short, long, required_unless_present = "list")]
    image: Option<PathBuf>,

    /// Caption body; skips ingestion.
    #[arg(long, requires = "author")]
    body: Option<String>,

    /// Caption author; used with --body.
    #[arg(long, requires = "body")]
    author: Option<String>,

    /// Target width in pixels (reduced to --max-width).
    #[arg(short, long, env = "MEME_WIDTH", default_value_t = 500)]
    width: u32,

    /// Upper bound for --width.
    #[arg(long, env = "MEME_MAX_WIDTH", default_value_t = 500)]
    max_width: u32,

    /// Output directory, created if missing.
    #[arg(short, long, env = "MEME_OUTPUT_DIR", default_value = "./static")]
    out_dir: PathBuf,

    /// Caption font; common system fonts are tried when unset.
    #[arg(long, env = "MEME_FONT")]
    font: Option<PathBuf>,

    /// Caption font size in pixels (4–512).
    #[arg(long, default_value_t = 40.0)]
    font_size: f32,

    /// Wrap the body at this many characters.
    #[arg(long, default_value_t = 25)]
    wrap: usize,

    /// Output encoding.
    #[arg(long, value_enum, default_value = "jpeg")]
    format: FormatArg,

    /// JPEG quality (1–100).
    #[arg(long, default_value_t = 90,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Number of images to generate.
    #[arg(short = 'n', long, default_value_t = 1,
          value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Seed for quote, photo and placement choices.
    #[arg(long)]
    seed: Option<u64>,

    /// pdftotext executable used for PDF sources.
    #[arg(long, env = "MEME_PDFTOTEXT", default_value = "pdftotext")]
    pdftotext: String,

    /// Print the ingested quotes and exit.
    #[arg(long)]
    list: bool,

    /// Print JSON instead of plain paths.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors and the generated paths.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum FormatArg {
    Jpeg,
    Png,
}

/// One generated image, as reported by `--json`.
#[derive(Debug, Serialize)]
struct Generated {
    path: PathBuf,
    image: PathBuf,
    quote: Quote,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO logs when several images are generated.
    let show_progress = !cli.quiet && !cli.json && !cli.list && cli.count > 1;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Quotes ───────────────────────────────────────────────────────────
    let quotes = load_quotes(&cli).await?;

    if cli.list {
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&quotes).context("Failed to serialise quotes")?
            );
        } else {
            for q in &quotes {
                println!("{q}");
            }
        }
        return Ok(());
    }

    // ── Photos ───────────────────────────────────────────────────────────
    let images = resolve_images(&cli)?;

    // ── Engine ───────────────────────────────────────────────────────────
    let config = build_config(&cli)?;
    let engine = Arc::new(match cli.seed {
        Some(seed) => MemeEngine::with_seed(config, seed),
        None => MemeEngine::new(config),
    }?);
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_os_rng(),
    };

    // ── Generate ─────────────────────────────────────────────────────────
    let bar = show_progress.then(|| progress_bar(cli.count));
    let started = Instant::now();
    let mut generated = Vec::with_capacity(cli.count as usize);

    for _ in 0..cli.count {
        let quote = choose(&quotes, &mut rng)
            .context("No quotes to choose from")?
            .clone();
        let image = choose(&images, &mut rng)
            .context("No images to choose from")?
            .clone();

        if let Some(ref bar) = bar {
            bar.set_message(file_name(&image));
        }
        let path = compose_async(Arc::clone(&engine), image.clone(), quote.clone(), cli.width)
            .await
            .with_context(|| format!("Failed to caption {}", image.display()))?;
        if let Some(ref bar) = bar {
            bar.println(format!("  {} {}", green("✓"), path.display()));
            bar.inc(1);
        }

        generated.push(Generated { path, image, quote });
    }

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    // ── Report ───────────────────────────────────────────────────────────
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&generated).context("Failed to serialise output")?
        );
    } else {
        for g in &generated {
            println!("{}", g.path.display());
        }
    }

    if !cli.quiet && !cli.json {
        eprintln!(
            "{}  {} image(s)  {}ms  →  {}",
            green("✔"),
            bold(&generated.len().to_string()),
            started.elapsed().as_millis(),
            dim(&cli.out_dir.display().to_string()),
        );
    }

    Ok(())
}

/// `--body/--author` win over `--quotes`.
async fn load_quotes(cli: &Cli) -> Result<Vec<Quote>> {
    if let (Some(body), Some(author)) = (&cli.body, &cli.author) {
        let quote = Quote::try_new(body.trim(), author.trim())
            .context("Invalid --body/--author")?;
        return Ok(vec![quote]);
    }

    let config = IngestConfig {
        pdftotext_program: cli.pdftotext.clone(),
        ..IngestConfig::default()
    };
    let quotes = ingest_files_async(cli.quotes.clone(), config)
        .await
        .context("Failed to ingest quotes")?;

    if quotes.is_empty() {
        anyhow::bail!("No quotes found in {:?}", cli.quotes);
    }
    Ok(quotes)
}

/// A directory yields every decodable image in it; a file is used as-is.
fn resolve_images(cli: &Cli) -> Result<Vec<PathBuf>> {
    let image = cli
        .image
        .as_ref()
        .context("--image is required to generate images")?;

    if !image.is_dir() {
        return Ok(vec![image.clone()]);
    }

    let images = list_images(image)
        .with_context(|| format!("Failed to list images in {}", image.display()))?;
    if images.is_empty() {
        anyhow::bail!("No readable images in {}", image.display());
    }
    Ok(images)
}

/// Map CLI args to `MemeConfig`.
fn build_config(cli: &Cli) -> Result<MemeConfig> {
    let font = match cli.font {
        Some(ref path) => Font::from_file(path)
            .with_context(|| format!("Failed to load font {}", path.display()))?,
        None => Font::discover()
            .context("No caption font found; pass --font or set MEME_FONT")?,
    };

    let output_format = match cli.format {
        FormatArg::Jpeg => OutputFormat::Jpeg {
            quality: cli.quality,
        },
        FormatArg::Png => OutputFormat::Png,
    };

    MemeConfig::builder()
        .output_dir(cli.out_dir.clone())
        .max_width(cli.max_width)
        .wrap_width(cli.wrap)
        .font_size(cli.font_size)
        .output_format(output_format)
        .font(font)
        .build()
        .context("Invalid configuration")
}

fn progress_bar(total: u32) -> ProgressBar {
    let bar = ProgressBar::new(u64::from(total));
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} images  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_prefix("Captioning");
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

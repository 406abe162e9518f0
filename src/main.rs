// SPDX-License-Identifier: GPL-3.0-or-later
// src/main.rs
//
// Command-line entry point: load, lay out, drag, export.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{ArgAction, Parser};

use cropwise::app::document::SourceImage;
use cropwise::app::export::{ExportedImage, OutputFormat};
use cropwise::app::gesture::Gesture;
use cropwise::app::loader::ImageLoader;
use cropwise::app::{AppMessage, AppModel, UpdateResult, update};
use cropwise::config::AppConfig;
use cropwise::domain::crop::{CropRect, DisplayMapping, Rect};

/// Crop an image with the interactive crop engine.
#[derive(Parser, Debug, Clone)]
#[command(name = "cropwise", version, about)]
pub struct Args {
    /// Image to crop (PNG, JPEG, WebP, GIF, BMP, SVG, ...).
    pub input: PathBuf,

    /// Output file or directory (default: configured output dir).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Start from this rectangle instead of the centered default: X,Y,W,H.
    #[arg(long, value_parser = parse_rect)]
    pub rect: Option<CropRect>,

    /// Drag gesture `<target>:<dx>,<dy>` in screen pixels; target is `move`
    /// or a handle (n, ne, e, se, s, sw, w, nw). Repeatable.
    #[arg(long = "drag", value_name = "GESTURE")]
    pub drags: Vec<Gesture>,

    /// Preview container size used to map screen deltas: WxH.
    #[arg(long, value_parser = parse_size)]
    pub viewport: Option<(f32, f32)>,

    /// Output encoding (png, jpeg, webp).
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// JPEG quality (1-100).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// Config file (default: platform config dir).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the final rectangle; without --output nothing is written.
    #[arg(long)]
    pub print: bool,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = AppConfig::load(args.config.as_deref())?;
    run(args, config).await
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

async fn run(args: Args, config: AppConfig) -> anyhow::Result<()> {
    let mut model = AppModel::new(&config);

    let source = load(&args.input).await?;
    let natural = source.dimensions();
    update(&mut model, AppMessage::ImageLoaded(source));

    let (vw, vh) = args
        .viewport
        .unwrap_or((config.viewport_width, config.viewport_height));
    let container = Rect::new(0.0, 0.0, vw, vh);
    let image = DisplayMapping::contain(container, natural);
    update(&mut model, AppMessage::Layout { container, image });

    if let Some(rect) = args.rect {
        update(&mut model, AppMessage::SetRect(rect));
    }

    for gesture in &args.drags {
        if gesture.replay(&mut model).is_none() {
            bail!("Cannot replay {gesture}: preview layout is not available");
        }
    }

    let rect = model.engine.rect().context("No crop rectangle")?;
    if args.print {
        let region = model.engine.region().context("Crop rectangle is empty")?;
        println!(
            "{},{},{},{}  (image {}x{}, rect {:.2},{:.2},{:.2},{:.2})",
            region.x,
            region.y,
            region.width,
            region.height,
            natural.0,
            natural.1,
            rect.x,
            rect.y,
            rect.w,
            rect.h
        );
        if args.output.is_none() {
            return Ok(());
        }
    }

    let format = args
        .format
        .or_else(|| args.output.as_deref().and_then(OutputFormat::from_path))
        .unwrap_or(config.output_format);
    update(&mut model, AppMessage::SetOutputFormat(format));
    if let Some(quality) = args.quality {
        model.export.jpeg_quality = quality;
    }

    let exported = match update(&mut model, AppMessage::Export) {
        UpdateResult::Exported(exported) => exported,
        _ => bail!(
            "{}",
            model.error.as_deref().unwrap_or("Export produced no image")
        ),
    };

    let target = output_target(args.output.as_deref(), &config, &exported)?;
    let saved = exported.save(&target)?;
    println!("{}", saved.display());
    Ok(())
}

async fn load(path: &Path) -> anyhow::Result<SourceImage> {
    let mut loader = ImageLoader::new();
    loader.load(path.to_path_buf());
    let loaded = loader.next().await.context("Image loader stopped")?;
    loaded
        .result
        .with_context(|| format!("Failed to open {}", path.display()))
}

fn output_target(
    output: Option<&Path>,
    config: &AppConfig,
    exported: &ExportedImage,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.to_path_buf());
    }
    let dir = config
        .default_output_dir
        .clone()
        .filter(|dir| dir.is_dir())
        .map_or_else(std::env::current_dir, Ok)
        .context("No output directory")?;
    Ok(dir.join(&exported.file_name))
}

fn parse_rect(s: &str) -> Result<CropRect, String> {
    let parts = s
        .split(',')
        .map(|v| v.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid number in {s:?}: {e}"))?;
    match parts.as_slice() {
        &[x, y, w, h] => Ok(CropRect::new(x, y, w, h)),
        _ => Err(format!("expected X,Y,W,H, got {s:?}")),
    }
}

fn parse_size(s: &str) -> Result<(f32, f32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| format!("invalid size {s:?}"))
    };
    Ok((parse(w)?, parse(h)?))
}

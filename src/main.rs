use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

mod config;
mod domain;
mod error;
mod geometry;
mod render;
mod segmentation;
mod subdivision;

use config::{FileConfig, limits};
use error::PlanError;
use geometry::{build_outline, outline_from_mask, parse_sides};
use render::{PlanSummary, render_image_plan, render_survey_plan, save_mask};
use segmentation::{SegmenterKind, check_usable_land, clean_mask};
use subdivision::SubdivisionStrategy;

/// Generate conceptual subdivision layouts from property photos or survey bearings
///
/// Examples:
///   # Subdivide a property photo into 8 lots using the threshold segmenter
///   parcelplan -i plot.jpg -n 8
///
///   # Clean the mask and export it alongside the diagram
///   parcelplan -i plot.jpg --clean --mask-output mask.png
///
///   # Subdivide a surveyed parcel into vertical strips
///   parcelplan -s "50@0,50@90,50@180,50@270" -n 4 --strategy strips
///
///   # Use a config file
///   parcelplan --config my-settings.toml
#[derive(Parser, Debug)]
#[command(name = "parcelplan")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches parcelplan.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Property photo to segment (JPEG or PNG)
    #[arg(short = 'i', long)]
    image: Option<PathBuf>,

    /// Surveyed sides as comma-separated length@bearing pairs
    /// (meters, degrees; 0 = East, counterclockwise)
    #[arg(short = 's', long)]
    sides: Option<String>,

    /// Number of lots to generate
    #[arg(short = 'n', long, default_value = "8")]
    lots: u32,

    /// Subdivision strategy: grid or strips
    #[arg(long, default_value = "grid")]
    strategy: SubdivisionStrategy,

    /// Mask segmenter for photo input: threshold or model
    #[arg(long, default_value = "threshold")]
    segmenter: SegmenterKind,

    /// Intensity threshold for the threshold segmenter (darker pixels count as land)
    #[arg(long, default_value = "128")]
    threshold: u8,

    /// Apply morphological mask cleanup (one opening, one closing, 5x5 kernel)
    #[arg(long)]
    clean: bool,

    /// Path to the segmentation model file (required with --segmenter model)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Output diagram path (defaults to plan.png)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Also write the binary land mask to this path
    #[arg(long)]
    mask_output: Option<PathBuf>,

    /// Survey diagram canvas size in pixels
    #[arg(long, default_value = "800")]
    canvas: u32,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Merged CLI + config-file settings for one run.
struct RunOptions {
    lots: u32,
    strategy: SubdivisionStrategy,
    segmenter: SegmenterKind,
    threshold: u8,
    clean: bool,
    model: Option<PathBuf>,
    output: PathBuf,
    mask_output: Option<PathBuf>,
    canvas: u32,
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };

    let image = args
        .image
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.image.clone()));
    let sides = args
        .sides
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.sides.clone()));
    let lots = if args.lots != 8 {
        args.lots
    } else {
        file_config.as_ref().map(|c| c.lots).unwrap_or(8)
    };
    let strategy = if args.strategy != SubdivisionStrategy::Grid {
        args.strategy
    } else {
        file_config
            .as_ref()
            .map(|c| c.strategy)
            .unwrap_or(SubdivisionStrategy::Grid)
    };
    let segmenter = if args.segmenter != SegmenterKind::Threshold {
        args.segmenter
    } else {
        file_config
            .as_ref()
            .map(|c| c.segmenter)
            .unwrap_or(SegmenterKind::Threshold)
    };
    let threshold = if args.threshold != limits::DEFAULT_THRESHOLD {
        args.threshold
    } else {
        file_config
            .as_ref()
            .map(|c| c.threshold)
            .unwrap_or(limits::DEFAULT_THRESHOLD)
    };
    let clean = args.clean || file_config.as_ref().map(|c| c.clean).unwrap_or(false);
    let model = args
        .model
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.model.clone()));
    let output = args
        .output
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.output.clone()));
    let mask_output = args
        .mask_output
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.mask_output.clone()));
    let canvas = if args.canvas != 800 {
        args.canvas
    } else {
        file_config.as_ref().map(|c| c.canvas).unwrap_or(800)
    };
    let verbose = args.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);

    if image.is_none() && sides.is_none() {
        bail!("Must provide either --image/-i or --sides/-s");
    }
    if image.is_some() && sides.is_some() {
        bail!("--image and --sides are mutually exclusive");
    }
    if lots == 0 {
        bail!("--lots must be at least 1");
    }

    println!("parcelplan - Conceptual Subdivision Mapper");
    println!("==========================================");
    println!();

    let options = RunOptions {
        lots,
        strategy,
        segmenter,
        threshold,
        clean,
        model,
        output: output.unwrap_or_else(|| PathBuf::from("plan.png")),
        mask_output,
        canvas,
        verbose,
    };

    if options.verbose {
        println!("Configuration:");
        if let Some(ref path) = image {
            println!("  Image: {}", path.display());
        }
        if let Some(ref spec) = sides {
            println!("  Sides: {}", spec);
        }
        println!("  Lots: {}", options.lots);
        println!("  Strategy: {:?}", options.strategy);
        println!("  Segmenter: {:?}", options.segmenter);
        println!("  Threshold: {}", options.threshold);
        println!("  Cleanup: {}", if options.clean { "enabled" } else { "disabled" });
        println!("  Output: {}", options.output.display());
        println!();
    }

    if let Some(ref image_path) = image {
        run_image_pipeline(image_path, &options)?;
    } else if let Some(ref spec) = sides {
        run_survey_pipeline(spec, &options)?;
    }

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );

    Ok(())
}

/// Photo pipeline: decode, segment, optionally clean, derive a bounding
/// polygon from the land pixels, subdivide, render.
fn run_image_pipeline(image_path: &std::path::Path, options: &RunOptions) -> Result<()> {
    let photo = image::open(image_path)
        .with_context(|| format!("Failed to open image: {}", image_path.display()))?;
    println!(
        "Loaded {}x{} image: {}",
        photo.width(),
        photo.height(),
        image_path.display()
    );

    let spinner = create_spinner("Running segmentation...");
    let start = Instant::now();
    let mask = options
        .segmenter
        .generate(&photo, options.threshold, options.model.as_deref())?;
    spinner.finish_with_message(format!(
        "Segmented {} land pixels [{:.1}s]",
        mask.foreground_count(),
        start.elapsed().as_secs_f32()
    ));

    let mask = if options.clean {
        let cleaned = clean_mask(&mask);
        if options.verbose {
            println!(
                "  Cleanup: {} -> {} land pixels",
                mask.foreground_count(),
                cleaned.foreground_count()
            );
        }
        cleaned
    } else {
        mask
    };

    if let Some(ref mask_path) = options.mask_output {
        save_mask(&mask, mask_path)?;
        println!("Mask written to {}", mask_path.display());
    }

    // Degenerate masks end the run with a warning, not an error.
    if let Err(e) = check_usable_land(&mask) {
        println!("Warning: {e}; try another image or a different threshold.");
        return Ok(());
    }

    let Some(outline) = outline_from_mask(&mask) else {
        println!("Warning: land pixels are collinear, no usable outline; try another image.");
        return Ok(());
    };

    let lots = options
        .strategy
        .subdivide(outline.polygon(), options.lots as usize)?;
    let summary = PlanSummary::new(&outline, &lots);

    render_image_plan(&photo, &mask, &outline, &lots, &options.output)?;

    println!();
    println!("{summary}");
    println!();
    println!("Diagram written to {}", options.output.display());

    Ok(())
}

/// Survey pipeline: parse sides, walk the outline, report closure error,
/// subdivide if valid, render.
fn run_survey_pipeline(spec: &str, options: &RunOptions) -> Result<()> {
    let sides = parse_sides(spec)?;
    println!("Parsed {} surveyed sides", sides.len());

    let outline = build_outline(&sides)?;
    println!("Closure error: {:.2} m", outline.closure_error());

    // Invalid outlines end the run with a message, not an error.
    if !outline.is_valid() {
        println!(
            "Error: {}; no subdivision attempted.",
            PlanError::InvalidOutline
        );
        return Ok(());
    }

    let lots = options
        .strategy
        .subdivide(outline.polygon(), options.lots as usize)?;
    let summary = PlanSummary::new(&outline, &lots);

    render_survey_plan(&outline, &lots, options.canvas, &options.output)?;

    println!();
    println!("{summary}");
    println!();
    println!("Diagram written to {}", options.output.display());

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

//! pdilab CLI: smoothing contact sheets and seeded segmentation.

mod display;

use clap::{Args, Parser, Subcommand};
use pdilab::io::{SampleSet, read_image, write_image};
use pdilab::segmentation::{segment, title};
use pdilab::smoothing::contact_sheet;
use pdilab::{
    CropRect, ImageFormat, OutputFormat, SeedPoint, SegmentationConfig, SmoothingConfig,
    ThresholdRule,
};
use std::path::PathBuf;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "pdilab")]
#[command(about = "Classical image processing demonstrations (box blur sheets, seeded segmentation)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Box-blur an image at increasing kernel sizes and tile the results.
    Smooth(SmoothArgs),

    /// Segment a catalog sample around a seed point.
    Segment(SegmentArgs),
}

#[derive(Debug, Clone, Args)]
struct SmoothArgs {
    /// Path to the input image.
    #[arg(long)]
    input: PathBuf,

    /// JSON file with a smoothing configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the contact sheet is written.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Subsampling factor applied before blurring.
    #[arg(long)]
    subsample: Option<u32>,

    /// Comma-separated box kernel sizes.
    #[arg(long, value_delimiter = ',')]
    kernel_sizes: Option<Vec<u32>>,

    /// Tiles per sheet row.
    #[arg(long)]
    columns: Option<usize>,

    /// Open the sheet in the system image viewer.
    #[arg(long)]
    show: bool,
}

#[derive(Debug, Clone, Args)]
struct SegmentArgs {
    /// Catalog root with one subdirectory per sample kind.
    #[arg(long)]
    samples: PathBuf,

    /// Sample name (file stem) to load.
    #[arg(long, conflicts_with = "random", required_unless_present = "random")]
    sample: Option<String>,

    /// Pick a random sample from the catalog.
    #[arg(long)]
    random: bool,

    /// JSON file with a segmentation configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Crop rectangle as x,y,width,height.
    #[arg(long)]
    crop: Option<CropRect>,

    /// Seed point as x,y.
    #[arg(long)]
    seed: Option<SeedPoint>,

    /// Flood-fill tolerance.
    #[arg(long)]
    tolerance: Option<u32>,

    /// Threshold convention: keep-above or zero-above.
    #[arg(long)]
    threshold_rule: Option<ThresholdRule>,

    /// Directory receiving the outputs.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Output format: jpg, png or pnm.
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Open the side-by-side image in the system image viewer.
    #[arg(long)]
    show: bool,
}

fn smoothing_config(args: &SmoothArgs) -> CliResult<SmoothingConfig> {
    let mut config = match &args.config {
        Some(path) => SmoothingConfig::from_json_file(path)?,
        None => SmoothingConfig::default(),
    };
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if let Some(factor) = args.subsample {
        config.subsample_factor = factor;
    }
    if let Some(sizes) = &args.kernel_sizes {
        config.kernel_sizes = sizes.clone();
    }
    if let Some(columns) = args.columns {
        config.columns = columns;
    }
    Ok(config)
}

fn segmentation_config(args: &SegmentArgs) -> CliResult<SegmentationConfig> {
    let mut config = match &args.config {
        Some(path) => SegmentationConfig::from_json_file(path)?,
        None => SegmentationConfig::default(),
    };
    if args.crop.is_some() {
        config.crop = args.crop;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(tolerance) = args.tolerance {
        config.tolerance = tolerance;
    }
    if let Some(rule) = args.threshold_rule {
        config.threshold_rule = rule;
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    Ok(config)
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Smooth(args) => run_smooth(&args),
        Commands::Segment(args) => run_segment(&args),
    }
}

// ── smooth ─────────────────────────────────────────────────────────────

fn run_smooth(args: &SmoothArgs) -> CliResult<()> {
    let config = smoothing_config(args)?;
    tracing::info!("Loading image: {}", args.input.display());

    let pix = read_image(&args.input).map_err(|e| -> CliError {
        format!("Failed to open image {}: {}", args.input.display(), e).into()
    })?;
    let result = contact_sheet(&pix, &config)?;

    write_image(&result.sheet, &config.output, ImageFormat::Unknown)?;
    tracing::info!("Contact sheet written to {}", config.output.display());

    display::show(&result.sheet, &config.title, args.show)
}

// ── segment ────────────────────────────────────────────────────────────

fn run_segment(args: &SegmentArgs) -> CliResult<()> {
    let config = segmentation_config(args)?;
    let catalog = SampleSet::open(&args.samples)?;
    tracing::info!(
        "Catalog {} holds {} samples",
        catalog.root().display(),
        catalog.len()
    );

    let sample = match &args.sample {
        Some(name) => catalog.load(name)?,
        None => catalog.load_random()?,
    };
    tracing::info!("Segmenting sample {} ({})", sample.name, sample.kind);

    let result = segment(&sample.pix, &config)?;
    let (segmented, original) = result.write_outputs(&config)?;
    tracing::info!(
        "Outputs written to {} and {}",
        segmented.display(),
        original.display()
    );

    display::show(
        &result.side_by_side,
        &title(&sample.name, &sample.kind),
        args.show,
    )
}

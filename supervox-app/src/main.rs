//! Supervox command-line driver
//!
//! Feeds a stream of color + depth frames through the online supervoxel engine
//! and writes every cluster it produced as tab-separated records.
//!
//! Without image files the stream is a constant color at a constant depth.

mod error;

use clap::Parser;
use error::AppError;
use std::path::PathBuf;
use supervox_core::evaluation::{compression_error, downsample_compression_error};
use supervox_core::ingest::{RepeatStream, RgbdStream};
use supervox_core::{ContinuousSupervoxels, SupervoxelConfig};
use tracing::info;

/// Supervox - online supervoxels from RGBD streams
#[derive(Parser, Debug)]
#[command(name = "supervox")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Frame width of the synthetic stream
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Frame height of the synthetic stream
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Number of frames to process
    #[arg(short = 'n', long, default_value_t = 20)]
    steps: usize,

    /// Raw depth of the synthetic stream
    #[arg(long, default_value_t = 1000)]
    depth: u16,

    /// Color of the synthetic stream as R,G,B
    #[arg(long, default_value = "0,128,128", value_parser = parse_color)]
    color: [u8; 3],

    /// Color image to replay instead of the synthetic stream
    #[arg(long, requires = "depth_image")]
    color_image: Option<PathBuf>,

    /// 16-bit depth image matching --color-image
    #[arg(long, requires = "color_image")]
    depth_image: Option<PathBuf>,

    /// JSON file with engine parameters; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed of the jitter generator (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Output path of the cluster records
    #[arg(short, long, default_value = "clusters.tsv")]
    output: PathBuf,
}

fn parse_color(s: &str) -> Result<[u8; 3], String> {
    let channels: Vec<u8> = s
        .split(',')
        .map(|c| c.trim().parse::<u8>().map_err(|e| format!("'{}': {}", c, e)))
        .collect::<Result<_, _>>()?;
    channels
        .try_into()
        .map_err(|v: Vec<u8>| format!("expected 3 channels, got {}", v.len()))
}

fn load_config(args: &Args) -> Result<SupervoxelConfig, AppError> {
    let mut config = match &args.config {
        Some(path) => {
            let display = path.display().to_string();
            let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
                path: display.clone(),
                source,
            })?;
            serde_json::from_str(&text).map_err(|source| AppError::ConfigParse {
                path: display,
                source,
            })?
        }
        None => SupervoxelConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn open_stream(args: &Args) -> Result<RepeatStream, AppError> {
    match (&args.color_image, &args.depth_image) {
        (Some(color), Some(depth)) => Ok(RepeatStream::open(color, depth, args.steps)?),
        (None, None) => Ok(RepeatStream::uniform(
            args.width,
            args.height,
            args.color,
            args.depth,
            args.steps,
        )),
        _ => Err(AppError::IncompleteImagePair),
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = load_config(&args)?;
    let mut stream = open_stream(&args)?;
    let mut engine = ContinuousSupervoxels::new(config)?;

    let (width, height) = stream.resolution();
    engine.start(width as usize, height as usize)?;
    info!("Processing {} frames of {}x{}", args.steps, width, height);

    while let Some(frame) = stream.next_frame()? {
        engine.step(&frame.color, &frame.depth)?;
    }

    if let Some(frame) = engine.active_time().and_then(|t| engine.timeseries().frame(t)) {
        let error = compression_error(frame, engine.timeseries());
        let reference = downsample_compression_error(frame);
        info!(
            "Compression error at t={}: color={:.4} position={:.4} (grid reference: color={:.4} position={:.4})",
            frame.time(),
            error.x,
            error.y,
            reference.x,
            reference.y
        );
    }

    let clusters = engine.all_clusters();
    info!("Finished with {} supervoxels", clusters.len());
    supervox_data::save_clusters_tsv(&args.output, &clusters)?;
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("supervox error: {}", e);
        std::process::exit(1);
    }
}

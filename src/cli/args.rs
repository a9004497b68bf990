//! CLI argument definitions.

use crate::cli::validators::parse_duration_secs;
use crate::config::Placement;
use crate::constants::render::MAX_ZOOM;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Render a GPS run as a heart-rate colored map with scene-classified photos.
#[derive(Debug, Parser)]
#[command(name = "runview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// GPX track to render.
    pub track: Option<PathBuf>,

    /// Photo files or directories to place on the route.
    pub photos: Vec<PathBuf>,

    /// Map options.
    #[command(flatten)]
    pub map: MapArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List the active scene catalog.
    Scenes,
    /// Write a synthetic GPX run for trying things out.
    Mock(MockArgs),
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the `mock` subcommand.
#[derive(Debug, Args)]
pub struct MockArgs {
    /// Output GPX file.
    #[arg(short, long, default_value = "mock_run.gpx")]
    pub output: PathBuf,

    /// RNG seed for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run length in seconds.
    #[arg(long, value_parser = parse_duration_secs)]
    pub duration: Option<u32>,
}

/// Arguments for rendering a map.
#[derive(Debug, Args)]
pub struct MapArgs {
    /// Output HTML file (default from config: runview_map.html).
    #[arg(short, long, env = "RUNVIEW_OUTPUT")]
    pub output: Option<PathBuf>,

    /// How photos are placed on the track.
    #[arg(long, value_enum, env = "RUNVIEW_PLACEMENT")]
    pub placement: Option<Placement>,

    /// RNG seed for reproducible random placement.
    #[arg(long, env = "RUNVIEW_SEED")]
    pub seed: Option<u64>,

    /// Path to the CLIP vision ONNX model (overrides config).
    #[arg(long, env = "RUNVIEW_VISION_MODEL")]
    pub vision_model: Option<PathBuf>,

    /// Path to the CLIP text ONNX model (overrides config).
    #[arg(long, env = "RUNVIEW_TEXT_MODEL")]
    pub text_model: Option<PathBuf>,

    /// Path to the CLIP tokenizer.json (overrides config).
    #[arg(long, env = "RUNVIEW_TOKENIZER")]
    pub tokenizer: Option<PathBuf>,

    /// Initial map zoom level.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_ZOOM)))]
    pub zoom: Option<u8>,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace+ORT info, -vvv: trace everything).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Hide the photo progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

//! runview - GPS run maps with scene-classified photos.
//!
//! This crate loads a GPX track, places photos along it, classifies each
//! photo's scene with a CLIP model, and renders a heart-rate colored map.

pub mod cli;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod scene;
pub mod track;

use clap::Parser;
use cli::{Cli, Command, MapArgs, MockArgs};
use config::{
    Config, config_file_path, load_default_config, model_dir, save_default_config,
    validate_config,
};
use constants::synth::DEFAULT_DURATION_SECS;
use pipeline::{RunOptions, output_path, process_run};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use tracing::info;

pub use error::{Error, Result};

/// Main entry point for the runview CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.map.verbose, cli.map.quiet);

    let config = load_default_config()?;

    if let Some(command) = cli.command {
        return handle_command(command, &config);
    }

    let Some(track) = cli.track else {
        cli::help::print_smart_help(&config);
        return Ok(());
    };

    let config = apply_overrides(config, &cli.map);
    validate_config(&config)?;

    render_track(&track, &cli.photos, &config, &cli.map)
}

/// Apply command-line overrides on top of the file configuration.
pub fn apply_overrides(mut config: Config, args: &MapArgs) -> Config {
    if let Some(path) = &args.vision_model {
        config.model.vision.clone_from(path);
    }
    if let Some(path) = &args.text_model {
        config.model.text.clone_from(path);
    }
    if let Some(path) = &args.tokenizer {
        config.model.tokenizer.clone_from(path);
    }
    if let Some(placement) = args.placement {
        config.correlation.placement = placement;
    }
    if args.seed.is_some() {
        config.correlation.seed = args.seed;
    }
    if let Some(zoom) = args.zoom {
        config.render.zoom = zoom;
    }
    if let Some(output) = &args.output {
        config.output.path.clone_from(output);
    }
    config
}

fn render_track(
    track: &Path,
    photos: &[std::path::PathBuf],
    config: &Config,
    args: &MapArgs,
) -> Result<()> {
    let mut rng = config
        .correlation
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

    let options = RunOptions {
        output: output_path(args.output.as_deref(), &config.output.path),
        progress: !args.no_progress && !args.quiet,
    };

    let summary = process_run(
        track,
        photos,
        config,
        || scene::load_shared_classifier(&config.model, config.catalog()?),
        &mut rng,
        &options,
    )?;

    info!(
        "Map with {} segments and {} photos: {}",
        summary.segments,
        summary.photos,
        summary.output.display()
    );
    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // ORT stays quiet unless verbose.
    let filter_str = if quiet {
        "warn,ort=off".to_string()
    } else {
        match verbose {
            0 => "info,ort=off".to_string(),
            1 => "debug,ort=warn".to_string(),
            2 => "trace,ort=info".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn handle_command(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
        Command::Scenes => handle_scenes_command(config),
        Command::Mock(args) => handle_mock_command(&args),
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let mut config = Config::default();
                let models = model_dir()?;
                config.model.vision = models.join("vision_model.onnx");
                config.model.text = models.join("text_model.onnx");
                config.model.tokenizer = models.join("tokenizer.json");

                let saved_path = save_default_config(&config)?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nNext steps:");
                println!("  Place the CLIP ONNX exports and tokenizer.json in {}", models.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            let text = toml::to_string_pretty(&config)
                .map_err(|e| Error::ConfigSerialize { source: e })?;
            println!("{text}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[allow(clippy::print_stdout)]
fn handle_scenes_command(config: &Config) -> Result<()> {
    let catalog = config.catalog()?;
    println!("Scene catalog ({} entries):", catalog.len());
    for (i, entry) in catalog.entries().iter().enumerate() {
        println!("  {:>2}. {} {:<18} {}", i, entry.color, entry.label, entry.descriptor);
    }
    Ok(())
}

fn handle_mock_command(args: &MockArgs) -> Result<()> {
    let mut rng = args
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let duration = args.duration.unwrap_or(DEFAULT_DURATION_SECS);

    let points = track::synth::generate_run(&mut rng, duration, chrono::Utc::now());
    track::synth::write_gpx(&points, &args.output)?;

    info!(
        "Wrote synthetic run: {} ({} points)",
        args.output.display(),
        points.len()
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use config::Placement;
    use std::path::PathBuf;

    #[test]
    fn test_cli_flags_override_config() {
        let cli = Cli::try_parse_from([
            "runview",
            "run.gpx",
            "--placement",
            "nearest-time",
            "--seed",
            "3",
            "--zoom",
            "12",
            "--vision-model",
            "/m/v.onnx",
            "-o",
            "out.html",
        ])
        .unwrap();

        let config = apply_overrides(Config::default(), &cli.map);
        assert_eq!(config.correlation.placement, Placement::NearestTime);
        assert_eq!(config.correlation.seed, Some(3));
        assert_eq!(config.render.zoom, 12);
        assert_eq!(config.model.vision, PathBuf::from("/m/v.onnx"));
        assert!(config.model.text.as_os_str().is_empty());
        assert_eq!(config.output.path, PathBuf::from("out.html"));
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let cli = Cli::try_parse_from(["runview", "run.gpx"]).unwrap();
        let mut base = Config::default();
        base.correlation.seed = Some(99);
        let config = apply_overrides(base, &cli.map);
        assert_eq!(config.correlation.seed, Some(99));
        assert_eq!(config.correlation.placement, Placement::Random);
    }
}

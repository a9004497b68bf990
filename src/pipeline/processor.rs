//! One end-to-end run: track and photos in, map document out.

use crate::config::Config;
use crate::error::Result;
use crate::output::write_map;
use crate::pipeline::{Correlator, PhotoRecord, collect_photo_files, is_photo_file};
use crate::render::{MapArtifact, MapRenderer};
use crate::scene::SceneClassifier;
use crate::track::{TrackPoint, load_track};
use rand::Rng;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Options for a single run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Where the HTML map is written.
    pub output: PathBuf,
    /// Whether to show the photo progress bar.
    pub progress: bool,
}

/// Result of a run.
#[derive(Debug)]
pub struct RunSummary {
    /// Number of track points loaded.
    pub track_points: usize,
    /// Number of photos placed on the map.
    pub photos: usize,
    /// Photos that fell back to the unknown scene.
    pub unknown_photos: usize,
    /// Number of route segments drawn.
    pub segments: usize,
    /// Path of the written map.
    pub output: PathBuf,
    /// Wall-clock duration in seconds.
    pub duration_secs: f64,
}

/// Load a track, place photos on it, and write the rendered map.
///
/// `classifier` is only invoked when at least one photo file is present, so
/// track-only runs never touch the scene model.
pub fn process_run<F, R>(
    track_path: &Path,
    photo_paths: &[PathBuf],
    config: &Config,
    classifier: F,
    rng: &mut R,
    options: &RunOptions,
) -> Result<RunSummary>
where
    F: FnOnce() -> Result<Arc<SceneClassifier>>,
    R: Rng + ?Sized,
{
    let start_time = Instant::now();
    let renderer = MapRenderer::new(config.render.clone())?;

    let track = load_track(track_path)?;
    let photo_files = collect_photo_files(photo_paths)?;
    debug!("{} candidate photo files", photo_files.len());

    let records = if photo_files.iter().any(|p| is_photo_file(p)) {
        let classifier = classifier()?;
        correlate(&classifier, config, &photo_files, &track, rng, options.progress)
    } else {
        Vec::new()
    };

    let artifact = renderer.render(&track, &records);
    write_map(&options.output, &artifact.to_html()?)?;

    let summary = RunSummary {
        track_points: track.len(),
        photos: records.len(),
        unknown_photos: records.iter().filter(|r| r.prediction.is_unknown()).count(),
        segments: artifact.route.len(),
        output: options.output.clone(),
        duration_secs: start_time.elapsed().as_secs_f64(),
    };

    info!(
        "Rendered {} points and {} photos ({} unknown) in {:.2}s",
        summary.track_points, summary.photos, summary.unknown_photos, summary.duration_secs
    );

    Ok(summary)
}

/// Build the map model without touching the filesystem for output.
pub fn build_map<R: Rng + ?Sized>(
    classifier: &SceneClassifier,
    config: &Config,
    photo_files: &[PathBuf],
    track: &[TrackPoint],
    rng: &mut R,
) -> Result<(MapArtifact, Vec<PhotoRecord>)> {
    let renderer = MapRenderer::new(config.render.clone())?;
    let records = correlate(classifier, config, photo_files, track, rng, false);
    Ok((renderer.render(track, &records), records))
}

fn correlate<R: Rng + ?Sized>(
    classifier: &SceneClassifier,
    config: &Config,
    photo_files: &[PathBuf],
    track: &[TrackPoint],
    rng: &mut R,
    progress: bool,
) -> Vec<PhotoRecord> {
    info!(
        "Placing photos ({} placement, scene model {})",
        config.correlation.placement,
        if classifier.is_available() {
            "loaded"
        } else {
            "unavailable"
        }
    );

    Correlator::new(
        classifier,
        config.correlation.placement,
        config.correlation.thumbnail_size,
    )
    .with_progress(progress)
    .correlate(photo_files, track, rng)
}

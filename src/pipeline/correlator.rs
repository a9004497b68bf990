//! Photo classification and placement along a track.

use crate::config::Placement;
use crate::error::{Error, Result};
use crate::output::progress;
use crate::pipeline::is_photo_file;
use crate::scene::{SceneClassifier, ScenePrediction};
use crate::track::TrackPoint;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use image::{DynamicImage, ImageFormat};
use rand::Rng;
use serde::Serialize;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A photo classified and pinned to a track point.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoRecord {
    /// File name without directories.
    pub filename: String,
    /// Path the photo was read from.
    pub filepath: PathBuf,
    /// Latitude of the assigned track point.
    pub latitude: f64,
    /// Longitude of the assigned track point.
    pub longitude: f64,
    /// Timestamp of the assigned track point.
    pub timestamp: Option<DateTime<Utc>>,
    /// Photo file modification time, when readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
    /// Scene classification result.
    pub prediction: ScenePrediction,
    /// Index of the assigned track point.
    pub track_index: usize,
    /// JPEG thumbnail as a `data:` URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Per-photo results gathered before placement.
struct PhotoAnalysis {
    path: PathBuf,
    prediction: ScenePrediction,
    thumbnail: Option<String>,
    captured_at: Option<DateTime<Utc>>,
}

/// Classifies photos and assigns each one a track point.
pub struct Correlator<'a> {
    classifier: &'a SceneClassifier,
    placement: Placement,
    thumbnail_size: u32,
    progress: bool,
}

impl<'a> Correlator<'a> {
    /// Create a correlator using `classifier` for scene predictions.
    pub fn new(classifier: &'a SceneClassifier, placement: Placement, thumbnail_size: u32) -> Self {
        Self {
            classifier,
            placement,
            thumbnail_size,
            progress: false,
        }
    }

    /// Show a progress bar while photos are classified.
    #[must_use]
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    /// Classify `photos` and place them on `track`.
    ///
    /// Files without a photo extension are skipped. Every remaining photo
    /// yields exactly one record, falling back to the unknown prediction
    /// when it cannot be decoded or classified.
    pub fn correlate<R: Rng + ?Sized>(
        &self,
        photos: &[PathBuf],
        track: &[TrackPoint],
        rng: &mut R,
    ) -> Vec<PhotoRecord> {
        let valid: Vec<&PathBuf> = photos
            .iter()
            .filter(|p| {
                let keep = is_photo_file(p);
                if !keep {
                    debug!("Skipping non-photo file: {}", p.display());
                }
                keep
            })
            .collect();

        if valid.is_empty() || track.is_empty() {
            info!(
                "Nothing to correlate ({} photos, {} track points)",
                valid.len(),
                track.len()
            );
            return Vec::new();
        }

        let pb = progress::create_photo_progress(valid.len(), self.progress);
        let analyses: Vec<PhotoAnalysis> = valid
            .into_iter()
            .map(|path| {
                let analysis = self.analyze(path);
                progress::inc_progress(pb.as_ref());
                analysis
            })
            .collect();
        progress::finish_progress(pb, "Photos classified");

        let indices = self.place(&analyses, track, rng);

        analyses
            .into_iter()
            .zip(indices)
            .map(|(analysis, index)| {
                let point = &track[index];
                PhotoRecord {
                    filename: analysis.path.file_name().map_or_else(
                        || analysis.path.to_string_lossy().into_owned(),
                        |n| n.to_string_lossy().into_owned(),
                    ),
                    latitude: point.latitude,
                    longitude: point.longitude,
                    timestamp: point.timestamp,
                    captured_at: analysis.captured_at,
                    prediction: analysis.prediction,
                    track_index: index,
                    thumbnail: analysis.thumbnail,
                    filepath: analysis.path,
                }
            })
            .collect()
    }

    fn analyze(&self, path: &Path) -> PhotoAnalysis {
        let captured_at = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from);

        let (prediction, thumbnail) = match open_photo(path) {
            Ok(image) => {
                let prediction = self.classifier.classify(&image);
                let thumbnail = match encode_thumbnail(&image, self.thumbnail_size) {
                    Ok(uri) => Some(uri),
                    Err(e) => {
                        warn!("Thumbnail failed for {}: {e}", path.display());
                        None
                    }
                };
                (prediction, thumbnail)
            }
            Err(e) => {
                warn!("{e}, using unknown scene");
                (ScenePrediction::unknown(), None)
            }
        };

        debug!("{} -> {}", path.display(), prediction.display_text());

        PhotoAnalysis {
            path: path.to_path_buf(),
            prediction,
            thumbnail,
            captured_at,
        }
    }

    fn place<R: Rng + ?Sized>(
        &self,
        analyses: &[PhotoAnalysis],
        track: &[TrackPoint],
        rng: &mut R,
    ) -> Vec<usize> {
        if self.placement == Placement::NearestTime {
            let captures: Option<Vec<DateTime<Utc>>> =
                analyses.iter().map(|a| a.captured_at).collect();
            if let Some(indices) = captures.and_then(|c| place_nearest_time(&c, track)) {
                return indices;
            }
            warn!("Photo or track timestamps missing, falling back to random placement");
        }
        place_random(analyses.len(), track.len(), rng)
    }
}

/// Draw one track index per photo.
///
/// With more photos than points, indices are drawn with replacement.
/// Otherwise they are distinct and returned in ascending order.
pub fn place_random<R: Rng + ?Sized>(n_photos: usize, n_points: usize, rng: &mut R) -> Vec<usize> {
    if n_points == 0 {
        return Vec::new();
    }

    if n_photos > n_points {
        (0..n_photos).map(|_| rng.gen_range(0..n_points)).collect()
    } else {
        let mut indices = rand::seq::index::sample(rng, n_points, n_photos).into_vec();
        indices.sort_unstable();
        indices
    }
}

/// Match each capture time to the track point with the nearest timestamp.
///
/// Returns `None` if the track is empty or any point lacks a timestamp.
/// Equidistant neighbours resolve to the earlier point.
pub fn place_nearest_time(
    captures: &[DateTime<Utc>],
    track: &[TrackPoint],
) -> Option<Vec<usize>> {
    let mut timeline: Vec<(DateTime<Utc>, usize)> = track
        .iter()
        .enumerate()
        .map(|(i, p)| p.timestamp.map(|t| (t, i)))
        .collect::<Option<_>>()?;
    if timeline.is_empty() {
        return None;
    }
    timeline.sort_by_key(|&(t, i)| (t, i));

    let indices = captures
        .iter()
        .map(|&capture| {
            let upper = timeline.partition_point(|&(t, _)| t < capture);
            if upper == 0 {
                return timeline[0].1;
            }
            if upper == timeline.len() {
                return timeline[upper - 1].1;
            }
            let (before, before_idx) = timeline[upper - 1];
            let (after, after_idx) = timeline[upper];
            if capture - before <= after - capture {
                before_idx
            } else {
                after_idx
            }
        })
        .collect();

    Some(indices)
}

/// Decode a photo file.
pub fn open_photo(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| Error::ImageDecode {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Downscale `image` to fit within `size` pixels and encode it as a JPEG
/// `data:` URI.
pub fn encode_thumbnail(image: &DynamicImage, size: u32) -> Result<String> {
    let thumb = image.thumbnail(size, size).to_rgb8();
    let mut bytes = Vec::new();
    thumb
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .map_err(|e| Error::ThumbnailEncode { source: e })?;
    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(&bytes)))
}

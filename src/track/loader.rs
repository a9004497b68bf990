//! GPX track loading.

use crate::error::{Error, Result};
use crate::track::{TrackPoint, fill_heart_rate, parse_heart_rate};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// Load a GPX file into a chronologically acquired point sequence.
///
/// Points from every track and segment are concatenated in file order and
/// heart-rate gaps are filled. A document without points yields an empty
/// sequence.
pub fn load_track(path: &Path) -> Result<Vec<TrackPoint>> {
    let file = File::open(path).map_err(|e| Error::TrackOpen {
        path: path.to_path_buf(),
        source: e,
    })?;

    let points = parse_track(BufReader::new(file), path)?;
    info!("Track loaded: {} points", points.len());
    Ok(points)
}

/// Parse GPX content from a reader.
///
/// `origin` is only used for error reporting.
pub fn parse_track<R: Read>(reader: R, origin: &Path) -> Result<Vec<TrackPoint>> {
    let parse_error = |source: Box<dyn std::error::Error + Send + Sync>| Error::TrackParse {
        path: origin.to_path_buf(),
        source,
    };

    let gpx = gpx::read(reader).map_err(|e| parse_error(Box::new(e)))?;

    let mut points = Vec::new();
    for track in gpx.tracks {
        for segment in track.segments {
            for waypoint in segment.points {
                let position = waypoint.point();
                let latitude = position.y();
                let longitude = position.x();
                validate_coordinates(latitude, longitude)?;

                let timestamp = match waypoint.time {
                    Some(time) => {
                        let iso = time.format().map_err(|e| parse_error(Box::new(e)))?;
                        let utc = DateTime::parse_from_rfc3339(&iso)
                            .map_err(|e| parse_error(Box::new(e)))?
                            .with_timezone(&Utc);
                        Some(utc)
                    }
                    None => None,
                };

                let heart_rate = waypoint
                    .description
                    .as_deref()
                    .and_then(parse_heart_rate)
                    .or_else(|| waypoint.comment.as_deref().and_then(parse_heart_rate));

                points.push(TrackPoint {
                    timestamp,
                    latitude,
                    longitude,
                    elevation: waypoint.elevation,
                    heart_rate,
                });
            }
        }
    }

    if points.is_empty() {
        warn!("Track contains no points: {}", origin.display());
        return Ok(points);
    }

    let sampled = points.iter().filter(|p| p.heart_rate.is_some()).count();
    debug!(
        "Heart rate present on {} of {} points",
        sampled,
        points.len()
    );
    if sampled == 0 {
        warn!("Track has no heart-rate samples; route will use a neutral color");
    }

    fill_heart_rate(&mut points);
    Ok(points)
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::InvalidLatitude { value: latitude });
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::InvalidLongitude { value: longitude });
    }
    Ok(())
}

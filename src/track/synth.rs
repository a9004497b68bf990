//! Synthetic run generator.
//!
//! Produces a plausible one-point-per-second run near the Seoul Forest
//! with a three-phase heart-rate profile: warm-up ramp, interval block
//! around 155 bpm, cool-down ramp. Useful for demos and fixtures.

use crate::constants::synth::{
    COOLDOWN_SECS, M_PER_DEG_LAT, M_PER_DEG_LON, SOUTH_BOUNDARY_LAT, START, WARMUP_SECS,
};
use crate::error::{Error, Result};
use crate::track::TrackPoint;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::f64::consts::PI;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Generate a synthetic run of `duration_secs` points.
pub fn generate_run<R: Rng>(rng: &mut R, duration_secs: u32, start: DateTime<Utc>) -> Vec<TrackPoint> {
    let turn_point = duration_secs / 2;
    let cooldown_start = duration_secs.saturating_sub(COOLDOWN_SECS);

    let mut main_heading = rng.gen_range(0.0_f64..180.0).to_radians();
    let mut heading = main_heading;
    let (mut lat, mut lon) = START;

    let mut points = Vec::with_capacity(duration_secs as usize);
    for i in 0..duration_secs {
        let step_m: f64 = rng.gen_range(2.0..2.5) + rng.gen_range(-0.5..0.5);

        let mut delta_lat = (step_m / M_PER_DEG_LAT) * heading.cos();
        let delta_lon = (step_m / M_PER_DEG_LON) * heading.sin();

        if lat + delta_lat < SOUTH_BOUNDARY_LAT {
            heading = rng.gen_range(45.0_f64..135.0).to_radians();
            delta_lat = delta_lat.abs();
        }

        if i == turn_point {
            main_heading += PI;
        }

        let noise = rng.gen_range(-25.0_f64..25.0).to_radians();
        heading += noise * 0.5;
        heading += (main_heading - heading) * 0.02;

        lat += delta_lat;
        lon += delta_lon;

        points.push(TrackPoint {
            timestamp: Some(start + Duration::seconds(i64::from(i))),
            latitude: lat,
            longitude: lon,
            elevation: None,
            heart_rate: Some(phase_heart_rate(rng, i, cooldown_start, duration_secs)),
        });
    }

    points
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn phase_heart_rate<R: Rng>(rng: &mut R, i: u32, cooldown_start: u32, duration_secs: u32) -> u32 {
    let t = f64::from(i);
    let hr = if i < WARMUP_SECS {
        let progress = t / f64::from(WARMUP_SECS);
        40.0f64.mul_add(progress, 100.0) + f64::from(rng.gen_range(-2_i32..=2))
    } else if i > cooldown_start {
        let span = f64::from(duration_secs - cooldown_start).max(1.0);
        let progress = (t - f64::from(cooldown_start)) / span;
        40.0f64.mul_add(-progress, 150.0) + f64::from(rng.gen_range(-2_i32..=2))
    } else {
        let interval = 15.0 * ((t - f64::from(WARMUP_SECS)) * (2.0 * PI / 300.0)).sin();
        let short = 5.0 * (t * 0.1).sin();
        155.0 + interval + short + f64::from(rng.gen_range(-4_i32..=4))
    };
    hr.max(0.0) as u32
}

/// Write points as a single-track GPX 1.1 file with `hr=<n>` descriptions.
pub fn write_gpx(points: &[TrackPoint], path: &Path) -> Result<()> {
    let write_error = |reason: String| Error::TrackWrite {
        path: path.to_path_buf(),
        reason,
    };

    let mut segment = gpx::TrackSegment::new();
    for point in points {
        let mut waypoint = gpx::Waypoint::new(geo_types::Point::new(point.longitude, point.latitude));
        waypoint.elevation = point.elevation;
        if let Some(ts) = point.timestamp {
            let odt = time::OffsetDateTime::from_unix_timestamp(ts.timestamp())
                .map_err(|e| write_error(e.to_string()))?;
            waypoint.time = Some(odt.into());
        }
        if let Some(hr) = point.heart_rate {
            waypoint.description = Some(format!("hr={hr}"));
        }
        segment.points.push(waypoint);
    }

    let mut track = gpx::Track::new();
    track.segments.push(segment);

    let document = gpx::Gpx {
        version: gpx::GpxVersion::Gpx11,
        creator: Some(crate::constants::APP_NAME.to_string()),
        tracks: vec![track],
        ..Default::default()
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::OutputDirCreateFailed {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let file = File::create(path).map_err(|e| Error::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    gpx::write(&document, BufWriter::new(file)).map_err(|e| write_error(e.to_string()))
}

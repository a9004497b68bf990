//! Track type definitions.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single timestamped sample along a recorded route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackPoint {
    /// Acquisition time, if the source recorded one.
    pub timestamp: Option<DateTime<Utc>>,
    /// Latitude in degrees (-90.0 to 90.0).
    pub latitude: f64,
    /// Longitude in degrees (-180.0 to 180.0).
    pub longitude: f64,
    /// Elevation in meters.
    pub elevation: Option<f64>,
    /// Heart rate in beats per minute.
    pub heart_rate: Option<u32>,
}

impl TrackPoint {
    /// Create a point with only a position.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            timestamp: None,
            latitude,
            longitude,
            elevation: None,
            heart_rate: None,
        }
    }

    /// Position as `[lat, lon]`.
    pub fn position(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}

//! Linear color ramp over a numeric range.

use crate::color::HexColor;
use crate::error::{Error, Result};

/// Maps values in `[vmin, vmax]` onto evenly spaced color stops.
///
/// Values outside the range clamp to the nearest end. A degenerate range
/// (`vmin == vmax`) maps everything to the first stop.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearColormap {
    stops: Vec<HexColor>,
    vmin: f64,
    vmax: f64,
}

impl LinearColormap {
    /// Create a colormap; at least two stops are required.
    pub fn new(stops: Vec<HexColor>, vmin: f64, vmax: f64) -> Result<Self> {
        if stops.len() < 2 {
            return Err(Error::ConfigValidation {
                message: format!("colormap needs at least 2 colors, got {}", stops.len()),
            });
        }
        Ok(Self { stops, vmin, vmax })
    }

    /// Lower bound of the range.
    pub fn vmin(&self) -> f64 {
        self.vmin
    }

    /// Upper bound of the range.
    pub fn vmax(&self) -> f64 {
        self.vmax
    }

    /// Color stops, low to high.
    pub fn stops(&self) -> &[HexColor] {
        &self.stops
    }

    /// Color for `value`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn color_at(&self, value: f64) -> HexColor {
        let span = self.vmax - self.vmin;
        let t = (value - self.vmin) / span;
        if span <= 0.0 || !t.is_finite() {
            return self.stops[0];
        }

        let last = self.stops.len() - 1;
        let scaled = t.clamp(0.0, 1.0) * last as f64;
        let i = (scaled.floor() as usize).min(last - 1);
        self.stops[i].lerp(self.stops[i + 1], scaled - i as f64)
    }
}

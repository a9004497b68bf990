//! Scene prediction type.

use crate::color::HexColor;
use crate::constants::scene::{UNKNOWN_COLOR, UNKNOWN_LABEL};
use serde::Serialize;

/// Outcome of classifying one photo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenePrediction {
    /// Color of the winning scene.
    pub color: HexColor,
    /// Label of the winning scene.
    pub label: String,
    /// Probability mass of the winning scene (0.0 - 1.0).
    pub confidence: f32,
}

impl ScenePrediction {
    /// Sentinel returned whenever classification fails.
    pub fn unknown() -> Self {
        Self {
            color: UNKNOWN_COLOR,
            label: UNKNOWN_LABEL.to_string(),
            confidence: 0.0,
        }
    }

    /// Whether this is the failure sentinel.
    pub fn is_unknown(&self) -> bool {
        self.label == UNKNOWN_LABEL && self.confidence == 0.0
    }

    /// Confidence as a whole percentage, for display only.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u32
    }

    /// Display text such as `"Green Forest (87%)"`.
    pub fn display_text(&self) -> String {
        if self.is_unknown() {
            return self.label.clone();
        }
        format!("{} ({}%)", self.label, self.confidence_percent())
    }
}

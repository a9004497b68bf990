//! Heart-rate extraction and gap filling.

use crate::track::TrackPoint;
use regex::Regex;
use std::sync::LazyLock;

static HR_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"hr=(\d+)").ok());

/// Extract a heart rate from a free-text annotation such as `"hr=145"`.
///
/// Returns `None` when the annotation has no `hr=<digits>` match or the
/// number does not fit a `u32`.
pub fn parse_heart_rate(annotation: &str) -> Option<u32> {
    let pattern = HR_PATTERN.as_ref()?;
    pattern
        .captures(annotation)
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Resolve missing heart-rate samples in place.
///
/// Gaps are forward-filled from the nearest preceding sample, then any
/// leading gap is back-filled from the first sample. A sequence without
/// any sample is left untouched.
pub fn fill_heart_rate(points: &mut [TrackPoint]) {
    let Some(first) = points.iter().find_map(|p| p.heart_rate) else {
        return;
    };

    let mut last = first;
    for point in points.iter_mut() {
        match point.heart_rate {
            Some(hr) => last = hr,
            None => point.heart_rate = Some(last),
        }
    }
}

/// Minimum and maximum heart rate across the sequence.
pub fn heart_rate_range(points: &[TrackPoint]) -> Option<(u32, u32)> {
    points
        .iter()
        .filter_map(|p| p.heart_rate)
        .fold(None, |acc, hr| match acc {
            None => Some((hr, hr)),
            Some((lo, hi)) => Some((lo.min(hr), hi.max(hr))),
        })
}

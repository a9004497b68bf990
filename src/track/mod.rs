//! GPS track loading.

mod heart_rate;
mod loader;
pub mod synth;
mod types;

pub use heart_rate::{fill_heart_rate, heart_rate_range, parse_heart_rate};
pub use loader::{load_track, parse_track};
pub use types::TrackPoint;

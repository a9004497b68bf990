//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "runview";

/// Default output file for the rendered map.
pub const DEFAULT_OUTPUT_FILE: &str = "runview_map.html";

/// Photo file extensions accepted by the correlator (compared case-insensitively).
pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "heic"];

/// Scene classification constants.
pub mod scene {
    use crate::color::HexColor;

    /// Color of the sentinel prediction returned when classification fails.
    pub const UNKNOWN_COLOR: HexColor = HexColor::new(0x80, 0x80, 0x80);

    /// Label of the sentinel prediction.
    pub const UNKNOWN_LABEL: &str = "Unknown";

    /// CLIP's trained logit scale (exp of the learned temperature).
    pub const DEFAULT_LOGIT_SCALE: f32 = 100.0;

    /// Default intra-op thread count for ONNX sessions.
    pub const DEFAULT_INTRA_THREADS: usize = 1;
}

/// CLIP image preprocessing constants.
pub mod clip {
    /// Input edge length of the vision encoder.
    pub const IMAGE_SIZE: u32 = 224;

    /// Per-channel normalization mean (RGB).
    pub const MEAN: [f32; 3] = [0.481_454_66, 0.457_827_5, 0.408_210_73];

    /// Per-channel normalization standard deviation (RGB).
    pub const STD: [f32; 3] = [0.268_629_54, 0.261_302_58, 0.275_777_11];

    /// Vision model input name.
    pub const PIXEL_VALUES: &str = "pixel_values";

    /// Vision model output name.
    pub const IMAGE_EMBEDS: &str = "image_embeds";

    /// Text model token input name.
    pub const INPUT_IDS: &str = "input_ids";

    /// Text model attention mask input name.
    pub const ATTENTION_MASK: &str = "attention_mask";

    /// Text model output name.
    pub const TEXT_EMBEDS: &str = "text_embeds";
}

/// Photo correlation constants.
pub mod correlation {
    /// Longest edge of embedded popup thumbnails in pixels.
    pub const DEFAULT_THUMBNAIL_SIZE: u32 = 200;
}

/// Map rendering constants.
pub mod render {
    use crate::color::HexColor;

    /// Map center used when there is nothing to center on.
    pub const DEFAULT_CENTER: [f64; 2] = [37.5446, 127.0379];

    /// Default initial zoom level.
    pub const DEFAULT_ZOOM: u8 = 15;

    /// Maximum zoom level supported by the tile layer.
    pub const MAX_ZOOM: u8 = 20;

    /// CartoDB Positron tiles.
    pub const DEFAULT_TILE_URL: &str =
        "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png";

    /// Attribution for the default tiles.
    pub const DEFAULT_TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors &copy; CARTO";

    /// Heart-rate palette, low to high.
    pub const DEFAULT_PALETTE: &[&str] = &["#0000ff", "#00ffff", "#00ff00", "#ffff00", "#ff0000"];

    /// Route color used when the track carries no heart rate at all.
    pub const NEUTRAL_ROUTE_COLOR: HexColor = HexColor::new(0x80, 0x80, 0x80);

    /// Legend caption.
    pub const LEGEND_CAPTION: &str = "Heart Rate (bpm)";

    /// Route line weight in pixels.
    pub const DEFAULT_ROUTE_WEIGHT: f32 = 5.0;

    /// Route line opacity.
    pub const DEFAULT_ROUTE_OPACITY: f32 = 0.8;

    /// Number of concentric aura circles per photo.
    pub const DEFAULT_AURA_LAYERS: usize = 6;

    /// Radius of the outermost aura circle in pixels.
    pub const DEFAULT_AURA_MAX_RADIUS: f32 = 36.0;

    /// Radius of the innermost aura circle in pixels.
    pub const DEFAULT_AURA_MIN_RADIUS: f32 = 8.0;

    /// Opacity of the innermost aura circle.
    pub const DEFAULT_AURA_MAX_OPACITY: f32 = 0.35;

    /// Pin marker size in pixels (width, height).
    pub const PIN_SIZE: [u32; 2] = [24, 36];

    /// Leaflet release loaded by the generated page.
    pub const LEAFLET_VERSION: &str = "1.9.4";
}

/// Synthetic track generator constants.
pub mod synth {
    /// Default run duration in seconds (one point per second).
    pub const DEFAULT_DURATION_SECS: u32 = 1500;

    /// Start coordinate (north edge of Seoul Forest).
    pub const START: (f64, f64) = (37.548, 127.042);

    /// Southern boundary the route never crosses (the river bank).
    pub const SOUTH_BOUNDARY_LAT: f64 = 37.541;

    /// Warm-up phase length in seconds.
    pub const WARMUP_SECS: u32 = 180;

    /// Cool-down phase length in seconds.
    pub const COOLDOWN_SECS: u32 = 180;

    /// Meters per degree of latitude.
    pub const M_PER_DEG_LAT: f64 = 111_000.0;

    /// Meters per degree of longitude at the start latitude.
    pub const M_PER_DEG_LON: f64 = 88_800.0;
}

//! Configuration type definitions.

use crate::color::HexColor;
use crate::constants::correlation::DEFAULT_THUMBNAIL_SIZE;
use crate::constants::render::{
    DEFAULT_AURA_LAYERS, DEFAULT_AURA_MAX_OPACITY, DEFAULT_AURA_MAX_RADIUS,
    DEFAULT_AURA_MIN_RADIUS, DEFAULT_PALETTE, DEFAULT_ROUTE_OPACITY, DEFAULT_ROUTE_WEIGHT,
    DEFAULT_TILE_ATTRIBUTION, DEFAULT_TILE_URL, DEFAULT_ZOOM,
};
use crate::constants::scene::{DEFAULT_INTRA_THREADS, DEFAULT_LOGIT_SCALE};
use crate::constants::DEFAULT_OUTPUT_FILE;
use crate::error::Result;
use crate::scene::{SceneCatalog, SceneCatalogEntry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scene model files.
    pub model: ModelConfig,

    /// Photo placement settings.
    pub correlation: CorrelationConfig,

    /// Map rendering settings.
    pub render: RenderConfig,

    /// Output settings.
    pub output: OutputConfig,

    /// Scene catalog override; empty means the built-in catalog.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scenes: Vec<SceneCatalogEntry>,
}

impl Config {
    /// The active scene catalog.
    pub fn catalog(&self) -> Result<SceneCatalog> {
        if self.scenes.is_empty() {
            Ok(SceneCatalog::default())
        } else {
            SceneCatalog::new(self.scenes.clone())
        }
    }
}

/// CLIP model files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the vision tower ONNX file.
    pub vision: PathBuf,

    /// Path to the text tower ONNX file.
    pub text: PathBuf,

    /// Path to the HuggingFace `tokenizer.json`.
    pub tokenizer: PathBuf,

    /// Multiplier applied to cosine similarities before softmax.
    pub logit_scale: f32,

    /// Intra-op threads per ONNX session.
    pub intra_threads: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            vision: PathBuf::new(),
            text: PathBuf::new(),
            tokenizer: PathBuf::new(),
            logit_scale: DEFAULT_LOGIT_SCALE,
            intra_threads: DEFAULT_INTRA_THREADS,
        }
    }
}

impl ModelConfig {
    /// Whether all model paths have been set.
    pub fn is_configured(&self) -> bool {
        [&self.vision, &self.text, &self.tokenizer]
            .iter()
            .all(|p| !p.as_os_str().is_empty())
    }
}

/// How photos are assigned to track points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    /// Uniform random sampling along the track.
    #[default]
    Random,
    /// Nearest track timestamp to the photo's capture time.
    NearestTime,
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::NearestTime => write!(f, "nearest-time"),
        }
    }
}

/// Photo correlation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Placement policy.
    pub placement: Placement,

    /// RNG seed for reproducible random placement.
    pub seed: Option<u64>,

    /// Longest edge of popup thumbnails in pixels.
    pub thumbnail_size: u32,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            seed: None,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

/// Map rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Initial zoom level.
    pub zoom: u8,

    /// Tile URL template.
    pub tile_url: String,

    /// Tile attribution (HTML).
    pub tile_attribution: String,

    /// Heart-rate palette, low to high.
    pub palette: Vec<HexColor>,

    /// Route line weight in pixels.
    pub route_weight: f32,

    /// Route line opacity.
    pub route_opacity: f32,

    /// Number of concentric aura circles.
    pub aura_layers: usize,

    /// Outermost aura radius in pixels.
    pub aura_max_radius: f32,

    /// Innermost aura radius in pixels.
    pub aura_min_radius: f32,

    /// Opacity of the innermost aura circle.
    pub aura_max_opacity: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            tile_url: DEFAULT_TILE_URL.to_string(),
            tile_attribution: DEFAULT_TILE_ATTRIBUTION.to_string(),
            palette: DEFAULT_PALETTE
                .iter()
                .filter_map(|c| c.parse().ok())
                .collect(),
            route_weight: DEFAULT_ROUTE_WEIGHT,
            route_opacity: DEFAULT_ROUTE_OPACITY,
            aura_layers: DEFAULT_AURA_LAYERS,
            aura_max_radius: DEFAULT_AURA_MAX_RADIUS,
            aura_min_radius: DEFAULT_AURA_MIN_RADIUS,
            aura_max_opacity: DEFAULT_AURA_MAX_OPACITY,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default map output path.
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            placement: Placement,
        }
        let w: Wrapper = toml::from_str("placement = \"nearest-time\"").unwrap();
        assert_eq!(w.placement, Placement::NearestTime);
        assert_eq!(Placement::NearestTime.to_string(), "nearest-time");
    }

    #[test]
    fn test_render_defaults() {
        let render = RenderConfig::default();
        assert_eq!(render.zoom, 15);
        assert_eq!(render.palette.len(), 5);
        assert_eq!(render.palette[0].to_string(), "#0000ff");
        assert_eq!(render.route_opacity, 0.8);
    }

    #[test]
    fn test_model_is_configured() {
        let mut model = ModelConfig::default();
        assert!(!model.is_configured());
        model.vision = "v.onnx".into();
        model.text = "t.onnx".into();
        model.tokenizer = "tokenizer.json".into();
        assert!(model.is_configured());
    }

    #[test]
    fn test_catalog_override() {
        let config: Config = toml::from_str(
            r##"
[[scenes]]
descriptor = "a muddy trail"
color = "#654321"
label = "Mud"
"##,
        )
        .unwrap();
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].label, "Mud");
        assert_eq!(Config::default().catalog().unwrap().len(), 12);
    }
}

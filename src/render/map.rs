//! Layered map model built from a track and its photos.

use crate::color::HexColor;
use crate::config::{RenderConfig, validate_render_config};
use crate::constants::render::{DEFAULT_CENTER, LEGEND_CAPTION, NEUTRAL_ROUTE_COLOR, PIN_SIZE};
use crate::error::Result;
use crate::pipeline::PhotoRecord;
use crate::render::LinearColormap;
use crate::track::{TrackPoint, heart_rate_range};
use serde::Serialize;
use tracing::debug;

/// Everything needed to draw one run.
#[derive(Debug, Clone, Serialize)]
pub struct MapArtifact {
    /// Initial viewport.
    pub view: MapView,
    /// Base tile layer.
    pub tiles: TileLayer,
    /// Route segments in track order.
    pub route: Vec<RouteSegment>,
    /// Heart-rate legend, present only when the track has heart rate.
    pub legend: Option<Legend>,
    /// One marker per photo.
    pub markers: Vec<PhotoMarker>,
}

/// Initial map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    /// `[lat, lon]` center.
    pub center: [f64; 2],
    /// Zoom level.
    pub zoom: u8,
}

/// Base map tiles.
#[derive(Debug, Clone, Serialize)]
pub struct TileLayer {
    /// URL template.
    pub url: String,
    /// Attribution HTML.
    pub attribution: String,
}

/// Line between two consecutive track points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSegment {
    /// Start `[lat, lon]`.
    pub from: [f64; 2],
    /// End `[lat, lon]`.
    pub to: [f64; 2],
    /// Heart rate at the start point.
    pub heart_rate: Option<u32>,
    /// Stroke color.
    pub color: HexColor,
    /// Stroke weight in pixels.
    pub weight: f32,
    /// Stroke opacity.
    pub opacity: f32,
}

/// Heart-rate color legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    /// Caption text.
    pub caption: String,
    /// Lowest observed heart rate.
    pub min: u32,
    /// Highest observed heart rate.
    pub max: u32,
    /// Palette stops, low to high.
    pub colors: Vec<HexColor>,
}

/// Photo marker: aura rings under a pin with a popup.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoMarker {
    /// `[lat, lon]` of the assigned track point.
    pub position: [f64; 2],
    /// Scene color.
    pub color: HexColor,
    /// Concentric circles, outermost first.
    pub aura: Vec<AuraRing>,
    /// Pin icon.
    pub pin: Pin,
    /// Popup content.
    pub popup: Popup,
}

/// One aura circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AuraRing {
    /// Radius in pixels.
    pub radius: f32,
    /// Fill opacity.
    pub opacity: f32,
}

/// SVG pin icon.
#[derive(Debug, Clone, Serialize)]
pub struct Pin {
    /// Inline SVG markup.
    pub svg: String,
    /// `[width, height]` in pixels.
    pub size: [u32; 2],
    /// Anchor point (tip of the pin).
    pub anchor: [u32; 2],
}

/// Popup content for a photo. All fields are plain text or a data URI.
#[derive(Debug, Clone, Serialize)]
pub struct Popup {
    /// Photo file name.
    pub filename: String,
    /// Scene display text, e.g. `"Green Forest (87%)"`.
    pub text: String,
    /// Thumbnail `data:` URI; `None` shows a placeholder.
    pub thumbnail: Option<String>,
}

/// Builds [`MapArtifact`]s from render settings.
#[derive(Debug, Clone)]
pub struct MapRenderer {
    config: RenderConfig,
}

impl MapRenderer {
    /// Create a renderer, validating `config`.
    pub fn new(config: RenderConfig) -> Result<Self> {
        validate_render_config(&config)?;
        Ok(Self { config })
    }

    /// Build the map model for a track and its photos.
    ///
    /// Either input may be empty.
    pub fn render(&self, track: &[TrackPoint], photos: &[PhotoRecord]) -> MapArtifact {
        let colormap = heart_rate_range(track).and_then(|(lo, hi)| {
            LinearColormap::new(self.config.palette.clone(), f64::from(lo), f64::from(hi)).ok()
        });

        let route = self.route(track, colormap.as_ref());
        let legend = heart_rate_range(track).map(|(min, max)| Legend {
            caption: LEGEND_CAPTION.to_string(),
            min,
            max,
            colors: self.config.palette.clone(),
        });
        let markers: Vec<PhotoMarker> = photos.iter().map(|p| self.marker(p)).collect();

        debug!(
            "Rendered {} route segments, {} markers",
            route.len(),
            markers.len()
        );

        MapArtifact {
            view: MapView {
                center: view_center(track),
                zoom: self.config.zoom,
            },
            tiles: TileLayer {
                url: self.config.tile_url.clone(),
                attribution: self.config.tile_attribution.clone(),
            },
            route,
            legend,
            markers,
        }
    }

    fn route(&self, track: &[TrackPoint], colormap: Option<&LinearColormap>) -> Vec<RouteSegment> {
        track
            .windows(2)
            .map(|pair| {
                let (start, end) = (&pair[0], &pair[1]);
                let color = match (colormap, start.heart_rate) {
                    (Some(cmap), Some(hr)) => cmap.color_at(f64::from(hr)),
                    _ => NEUTRAL_ROUTE_COLOR,
                };
                RouteSegment {
                    from: start.position(),
                    to: end.position(),
                    heart_rate: start.heart_rate,
                    color,
                    weight: self.config.route_weight,
                    opacity: self.config.route_opacity,
                }
            })
            .collect()
    }

    fn marker(&self, photo: &PhotoRecord) -> PhotoMarker {
        let color = photo.prediction.color;
        PhotoMarker {
            position: [photo.latitude, photo.longitude],
            color,
            aura: aura_rings(
                self.config.aura_layers,
                self.config.aura_max_radius,
                self.config.aura_min_radius,
                self.config.aura_max_opacity,
            ),
            pin: pin(color),
            popup: Popup {
                filename: photo.filename.clone(),
                text: photo.prediction.display_text(),
                thumbnail: photo.thumbnail.clone(),
            },
        }
    }
}

/// Concentric aura rings, outermost first.
///
/// Radii shrink linearly from `max_radius` to `min_radius` while opacity
/// grows as `max_opacity * (k + 1) / layers`.
#[allow(clippy::cast_precision_loss)]
pub fn aura_rings(layers: usize, max_radius: f32, min_radius: f32, max_opacity: f32) -> Vec<AuraRing> {
    let steps = layers.saturating_sub(1).max(1) as f32;
    (0..layers)
        .map(|k| {
            let k = k as f32;
            AuraRing {
                radius: max_radius - (max_radius - min_radius) * k / steps,
                opacity: max_opacity * (k + 1.0) / layers as f32,
            }
        })
        .collect()
}

fn pin(color: HexColor) -> Pin {
    let [w, h] = PIN_SIZE;
    let svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 24 36\">\
         <path d=\"M12 0C5.4 0 0 5.4 0 12c0 9 12 24 12 24s12-15 12-24C24 5.4 18.6 0 12 0z\" \
         fill=\"{color}\" stroke=\"#ffffff\" stroke-width=\"1.5\"/>\
         <circle cx=\"12\" cy=\"12\" r=\"4.5\" fill=\"#ffffff\"/></svg>"
    );
    Pin {
        svg,
        size: PIN_SIZE,
        anchor: [w / 2, h],
    }
}

/// Mean of track coordinates, or the default center for an empty track.
#[allow(clippy::cast_precision_loss)]
pub fn view_center(track: &[TrackPoint]) -> [f64; 2] {
    if track.is_empty() {
        return DEFAULT_CENTER;
    }
    let n = track.len() as f64;
    let (lat, lon) = track
        .iter()
        .fold((0.0, 0.0), |(a, b), p| (a + p.latitude, b + p.longitude));
    [lat / n, lon / n]
}

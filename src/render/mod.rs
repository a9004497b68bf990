//! Interactive map rendering.

mod colormap;
mod html;
mod map;

pub use colormap::LinearColormap;
pub use map::{
    AuraRing, Legend, MapArtifact, MapRenderer, MapView, PhotoMarker, Pin, Popup, RouteSegment,
    TileLayer, aura_rings, view_center,
};

//! Configuration validation.

use crate::config::{Config, RenderConfig};
use crate::constants::render::MAX_ZOOM;
use crate::error::{Error, Result};

fn invalid(message: String) -> Error {
    Error::ConfigValidation { message }
}

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_model(config)?;
    validate_render_config(&config.render)?;

    if config.correlation.thumbnail_size == 0 {
        return Err(invalid("thumbnail_size must be at least 1".to_string()));
    }

    // Catalog override must be non-empty when present; colors are already
    // checked by deserialization.
    config.catalog()?;
    Ok(())
}

fn validate_model(config: &Config) -> Result<()> {
    let model = &config.model;

    if !(model.logit_scale.is_finite() && model.logit_scale > 0.0) {
        return Err(invalid(format!(
            "logit_scale must be positive, got {}",
            model.logit_scale
        )));
    }

    if model.intra_threads == 0 {
        return Err(invalid("intra_threads must be at least 1".to_string()));
    }

    Ok(())
}

/// Validate render settings.
pub fn validate_render_config(render: &RenderConfig) -> Result<()> {
    if render.palette.len() < 2 {
        return Err(invalid(format!(
            "palette needs at least 2 colors, got {}",
            render.palette.len()
        )));
    }

    if render.zoom > MAX_ZOOM {
        return Err(invalid(format!(
            "zoom must be between 0 and {MAX_ZOOM}, got {}",
            render.zoom
        )));
    }

    if !(0.0..=1.0).contains(&render.route_opacity) {
        return Err(invalid(format!(
            "route_opacity must be between 0.0 and 1.0, got {}",
            render.route_opacity
        )));
    }

    if render.route_weight <= 0.0 {
        return Err(invalid(format!(
            "route_weight must be positive, got {}",
            render.route_weight
        )));
    }

    if render.aura_layers == 0 {
        return Err(invalid("aura_layers must be at least 1".to_string()));
    }

    if !(render.aura_min_radius > 0.0 && render.aura_min_radius <= render.aura_max_radius) {
        return Err(invalid(format!(
            "aura radii must satisfy 0 < min <= max, got min={} max={}",
            render.aura_min_radius, render.aura_max_radius
        )));
    }

    if render.aura_layers > 1 && render.aura_min_radius >= render.aura_max_radius {
        return Err(invalid(
            "aura_max_radius must exceed aura_min_radius when aura_layers > 1".to_string(),
        ));
    }

    if !(render.aura_max_opacity > 0.0 && render.aura_max_opacity <= 1.0) {
        return Err(invalid(format!(
            "aura_max_opacity must be in (0.0, 1.0], got {}",
            render.aura_max_opacity
        )));
    }

    Ok(())
}

//! Encoder seam between the classifier and a concrete model.

use crate::error::Result;
use image::DynamicImage;

/// Maps images and scene descriptors into a shared embedding space.
///
/// Implementations must be usable from several threads; any internal
/// mutable model state has to be guarded by the implementation.
pub trait SceneEncoder: Send + Sync {
    /// Embed a scene descriptor.
    fn encode_text(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed an image.
    fn encode_image(&self, image: &DynamicImage) -> Result<Vec<f32>>;
}

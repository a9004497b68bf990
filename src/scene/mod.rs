//! Scene classification of photos with a CLIP-style embedding model.

mod catalog;
mod classifier;
mod clip;
mod encoder;
mod scoring;
mod types;

pub use catalog::{SceneCatalog, SceneCatalogEntry};
pub use classifier::{SceneClassifier, load_shared_classifier, shared_classifier};
pub use clip::ClipEncoder;
pub use encoder::SceneEncoder;
pub use scoring::{argmax, cosine_logits, l2_normalize, softmax};
pub use types::ScenePrediction;

//! Scene classifier over a fixed catalog.

use crate::config::ModelConfig;
use crate::error::{Error, Result};
use crate::scene::{
    ClipEncoder, SceneCatalog, SceneEncoder, ScenePrediction, argmax, cosine_logits,
    l2_normalize, softmax,
};
use image::DynamicImage;
use std::sync::{Arc, OnceLock};
use tracing::{error, info, warn};

static SHARED: OnceLock<Arc<SceneClassifier>> = OnceLock::new();

/// Return the process-wide classifier, building it with `init` on first use.
///
/// A failed `init` is not cached, so a later call may retry. If two threads
/// race, the first stored classifier wins and is returned to both.
pub fn shared_classifier<F>(init: F) -> Result<Arc<SceneClassifier>>
where
    F: FnOnce() -> Result<SceneClassifier>,
{
    if let Some(existing) = SHARED.get() {
        return Ok(Arc::clone(existing));
    }
    let built = Arc::new(init()?);
    Ok(Arc::clone(SHARED.get_or_init(|| built)))
}

/// Return the process-wide CLIP classifier for `model`.
///
/// A missing or broken model does not fail the run: the classifier is
/// replaced by [`SceneClassifier::unavailable`] and every photo reports the
/// unknown scene.
pub fn load_shared_classifier(
    model: &ModelConfig,
    catalog: SceneCatalog,
) -> Result<Arc<SceneClassifier>> {
    shared_classifier(|| {
        if !model.is_configured() {
            error!("No scene model configured, photos will be marked Unknown");
            return Ok(SceneClassifier::unavailable(catalog));
        }

        let built = ClipEncoder::from_config(model).and_then(|encoder| {
            SceneClassifier::new(Box::new(encoder), catalog.clone(), model.logit_scale)
        });
        Ok(built.unwrap_or_else(|e| {
            error!("Scene model unavailable ({e}), photos will be marked Unknown");
            SceneClassifier::unavailable(catalog)
        }))
    })
}

/// Zero-shot scene classifier.
///
/// Descriptor embeddings are computed once at construction and reused for
/// every image.
pub struct SceneClassifier {
    catalog: SceneCatalog,
    encoder: Option<Box<dyn SceneEncoder>>,
    descriptor_embeddings: Vec<Vec<f32>>,
    logit_scale: f32,
}

impl SceneClassifier {
    /// Build a classifier, embedding every catalog descriptor.
    pub fn new(
        encoder: Box<dyn SceneEncoder>,
        catalog: SceneCatalog,
        logit_scale: f32,
    ) -> Result<Self> {
        let mut descriptor_embeddings = Vec::with_capacity(catalog.len());
        for descriptor in catalog.descriptors() {
            let mut embedding = encoder.encode_text(descriptor)?;
            if embedding.is_empty() {
                return Err(Error::ClassifierBuild {
                    reason: format!("empty embedding for descriptor '{descriptor}'"),
                });
            }
            l2_normalize(&mut embedding);
            descriptor_embeddings.push(embedding);
        }

        info!(
            "Scene classifier ready: {} scenes, logit scale {}",
            catalog.len(),
            logit_scale
        );

        Ok(Self {
            catalog,
            encoder: Some(encoder),
            descriptor_embeddings,
            logit_scale,
        })
    }

    /// A classifier without a model; every photo classifies as unknown.
    pub fn unavailable(catalog: SceneCatalog) -> Self {
        Self {
            catalog,
            encoder: None,
            descriptor_embeddings: Vec::new(),
            logit_scale: 1.0,
        }
    }

    /// Whether a model is loaded.
    pub fn is_available(&self) -> bool {
        self.encoder.is_some()
    }

    /// The catalog this classifier scores against.
    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    /// Probability of each catalog entry for `image`, in catalog order.
    pub fn probabilities(&self, image: &DynamicImage) -> Result<Vec<f32>> {
        let encoder = self.encoder.as_ref().ok_or_else(|| Error::Inference {
            reason: "no scene model loaded".to_string(),
        })?;

        let mut embedding = encoder.encode_image(image)?;
        l2_normalize(&mut embedding);

        let logits = cosine_logits(&embedding, &self.descriptor_embeddings, self.logit_scale)
            .ok_or_else(|| Error::Inference {
                reason: format!(
                    "image embedding has {} dimensions, descriptors differ",
                    embedding.len()
                ),
            })?;
        Ok(softmax(&logits))
    }

    /// Classify an image, surfacing any failure.
    pub fn try_classify(&self, image: &DynamicImage) -> Result<ScenePrediction> {
        let probs = self.probabilities(image)?;
        let best = argmax(&probs).ok_or_else(|| Error::Inference {
            reason: "scene scores are not finite".to_string(),
        })?;
        let entry = self.catalog.get(best).ok_or_else(|| Error::Internal {
            message: format!("winning index {best} outside catalog"),
        })?;

        Ok(ScenePrediction {
            color: entry.color,
            label: entry.label.clone(),
            confidence: probs[best],
        })
    }

    /// Classify an image; failures yield the unknown sentinel.
    pub fn classify(&self, image: &DynamicImage) -> ScenePrediction {
        match self.try_classify(image) {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!("Scene classification failed: {e}");
                ScenePrediction::unknown()
            }
        }
    }
}

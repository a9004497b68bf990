//! CLIP encoder backed by ONNX Runtime.

use crate::config::ModelConfig;
use crate::constants::clip::{
    ATTENTION_MASK, IMAGE_EMBEDS, IMAGE_SIZE, INPUT_IDS, MEAN, PIXEL_VALUES, STD, TEXT_EMBEDS,
};
use crate::error::{Error, Result};
use crate::scene::SceneEncoder;
use image::DynamicImage;
use image::imageops::FilterType;
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tokenizers::Tokenizer;
use tracing::{debug, info};

/// CLIP vision and text towers exported as separate ONNX models.
///
/// The vision model takes `pixel_values` `[1, 3, 224, 224]` and yields
/// `image_embeds`; the text model takes `input_ids` and `attention_mask`
/// and yields `text_embeds`. Sessions need exclusive access to run, so each
/// sits behind its own mutex.
pub struct ClipEncoder {
    vision: Mutex<Session>,
    text: Mutex<Session>,
    tokenizer: Tokenizer,
}

impl ClipEncoder {
    /// Load both towers and the tokenizer described by `config`.
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        for path in [&config.vision, &config.text, &config.tokenizer] {
            if !path.exists() {
                return Err(Error::ModelFileNotFound { path: path.clone() });
            }
        }

        let tokenizer = Tokenizer::from_file(&config.tokenizer).map_err(|e| Error::TokenizerLoad {
            path: config.tokenizer.clone(),
            reason: e.to_string(),
        })?;

        let vision = load_session(&config.vision, config.intra_threads)?;
        let text = load_session(&config.text, config.intra_threads)?;

        info!(
            "Loaded CLIP encoders: vision={}, text={}",
            config.vision.display(),
            config.text.display()
        );

        Ok(Self {
            vision: Mutex::new(vision),
            text: Mutex::new(text),
            tokenizer,
        })
    }
}

impl SceneEncoder for ClipEncoder {
    fn encode_text(&self, text: &str) -> Result<Vec<f32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| inference_error(&e))?;

        let ids: Vec<i64> = encoding.get_ids().iter().map(|&id| i64::from(id)).collect();
        let mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| i64::from(m))
            .collect();
        let len = ids.len();
        debug!("Encoding descriptor ({len} tokens): {text}");

        let ids = Tensor::from_array(([1, len], ids)).map_err(|e| inference_error(&e))?;
        let mask = Tensor::from_array(([1, len], mask)).map_err(|e| inference_error(&e))?;

        let mut session = lock(&self.text)?;
        let outputs = session
            .run(ort::inputs![INPUT_IDS => ids, ATTENTION_MASK => mask])
            .map_err(|e| inference_error(&e))?;
        let (_shape, data) = outputs[TEXT_EMBEDS]
            .try_extract_tensor::<f32>()
            .map_err(|e| inference_error(&e))?;
        Ok(data.to_vec())
    }

    fn encode_image(&self, image: &DynamicImage) -> Result<Vec<f32>> {
        let side = IMAGE_SIZE as usize;
        let pixels = preprocess(image);
        let input =
            Tensor::from_array(([1, 3, side, side], pixels)).map_err(|e| inference_error(&e))?;

        let mut session = lock(&self.vision)?;
        let outputs = session
            .run(ort::inputs![PIXEL_VALUES => input])
            .map_err(|e| inference_error(&e))?;
        let (_shape, data) = outputs[IMAGE_EMBEDS]
            .try_extract_tensor::<f32>()
            .map_err(|e| inference_error(&e))?;
        Ok(data.to_vec())
    }
}

/// Resize-to-fill, center crop and normalize an image into CHW order.
pub(crate) fn preprocess(image: &DynamicImage) -> Vec<f32> {
    let rgb = image
        .resize_to_fill(IMAGE_SIZE, IMAGE_SIZE, FilterType::CatmullRom)
        .to_rgb8();

    let plane = (IMAGE_SIZE * IMAGE_SIZE) as usize;
    let mut out = vec![0.0_f32; plane * 3];
    for (i, pixel) in rgb.pixels().enumerate() {
        for c in 0..3 {
            let value = f32::from(pixel.0[c]) / 255.0;
            out[c * plane + i] = (value - MEAN[c]) / STD[c];
        }
    }
    out
}

fn load_session(path: &Path, intra_threads: usize) -> Result<Session> {
    let build_error = |e: &dyn std::fmt::Display| Error::ClassifierBuild {
        reason: format!("{}: {e}", path.display()),
    };

    let builder = Session::builder().map_err(|e| build_error(&e))?;
    let mut builder = builder
        .with_intra_threads(intra_threads)
        .map_err(|e| build_error(&e))?;
    builder.commit_from_file(path).map_err(|e| build_error(&e))
}

fn lock(session: &Mutex<Session>) -> Result<MutexGuard<'_, Session>> {
    session.lock().map_err(|_| Error::Inference {
        reason: "model session lock poisoned".to_string(),
    })
}

fn inference_error(e: &dyn std::fmt::Display) -> Error {
    Error::Inference {
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_preprocess_shape_and_normalization() {
        let white = DynamicImage::ImageRgb8(RgbImage::from_pixel(320, 240, Rgb([255, 255, 255])));
        let pixels = preprocess(&white);

        let plane = (IMAGE_SIZE * IMAGE_SIZE) as usize;
        assert_eq!(pixels.len(), plane * 3);
        for c in 0..3 {
            let expected = (1.0 - MEAN[c]) / STD[c];
            assert!((pixels[c * plane] - expected).abs() < 1e-4);
            assert!((pixels[c * plane + plane - 1] - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_preprocess_channel_planes() {
        let red = DynamicImage::ImageRgb8(RgbImage::from_pixel(224, 224, Rgb([255, 0, 0])));
        let pixels = preprocess(&red);
        let plane = (IMAGE_SIZE * IMAGE_SIZE) as usize;
        assert!(pixels[0] > 0.0);
        assert!(pixels[plane] < 0.0);
        assert!(pixels[2 * plane] < 0.0);
    }

    #[test]
    fn test_missing_model_files_error() {
        let config = ModelConfig {
            vision: "/nonexistent/vision_model.onnx".into(),
            ..ModelConfig::default()
        };
        let result = ClipEncoder::from_config(&config);
        assert!(matches!(result, Err(Error::ModelFileNotFound { .. })));
    }
}

use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::config::EngineOptions;
use crate::error::{OcrError, Result};

pub const DETECTOR_MODEL: &str = "ch_PP-OCRv5_mobile_det.onnx";
pub const CLASSIFIER_MODEL: &str = "ch_ppocr_mobile_v2.0_cls_infer.onnx";
pub const RECOGNIZER_MODEL: &str = "latin_PP-OCRv5_rec_mobile_infer.onnx";
pub const CHARACTER_DICT: &str = "ppocrv5_latin_dict.txt";

/// The four on-disk artifacts an engine needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelBundle {
    pub detector: PathBuf,
    pub classifier: PathBuf,
    pub recognizer: PathBuf,
    pub dictionary: PathBuf,
}

impl ModelBundle {
    pub fn in_dir(models_dir: &Path) -> Self {
        Self {
            detector: models_dir.join(DETECTOR_MODEL),
            classifier: models_dir.join(CLASSIFIER_MODEL),
            recognizer: models_dir.join(RECOGNIZER_MODEL),
            dictionary: models_dir.join(CHARACTER_DICT),
        }
    }

    pub fn paths(&self) -> [&Path; 4] {
        [
            &self.detector,
            &self.classifier,
            &self.recognizer,
            &self.dictionary,
        ]
    }

    pub fn missing(&self) -> Vec<&Path> {
        self.paths()
            .into_iter()
            .filter(|path| !path.is_file())
            .collect()
    }

    pub fn ensure_present(&self) -> Result<()> {
        let missing = self.missing();
        if missing.is_empty() {
            return Ok(());
        }

        let names = missing
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(OcrError::EngineInit(format!("model files not found: {names}")))
    }
}

/// Raw engine output for one detected region
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NativeTextBlock {
    pub text: String,
    pub box_points: Vec<(f32, f32)>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NativeOcrResult {
    pub text_blocks: Vec<NativeTextBlock>,
}

/// A loaded detection + classification + recognition engine.
///
/// `detect` is a single blocking call with no cancellation checkpoints.
pub trait InferenceEngine: Send {
    fn detect(&mut self, image: &RgbImage, options: &EngineOptions) -> Result<NativeOcrResult>;
}

/// Builds engines from a model bundle
pub trait EngineFactory: Send + Sync {
    fn create(&self, models: &ModelBundle, num_threads: usize)
        -> Result<Box<dyn InferenceEngine>>;
}

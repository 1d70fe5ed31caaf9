use image::RgbImage;
use paddle_ocr_rs::ocr_lite::OcrLite;
use tracing::{debug, info};

use crate::config::EngineOptions;
use crate::error::{OcrError, Result};

use super::engine::{EngineFactory, InferenceEngine, ModelBundle, NativeOcrResult, NativeTextBlock};

/// Builds [`PaddleEngine`]s backed by ONNX Runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleEngineFactory;

impl EngineFactory for PaddleEngineFactory {
    fn create(
        &self,
        models: &ModelBundle,
        num_threads: usize,
    ) -> Result<Box<dyn InferenceEngine>> {
        models.ensure_present()?;

        let threads = resolve_threads(num_threads);
        info!(
            detector = %models.detector.display(),
            recognizer = %models.recognizer.display(),
            threads,
            "Loading PaddleOCR models"
        );

        let det = models.detector.to_string_lossy().to_string();
        let cls = models.classifier.to_string_lossy().to_string();
        let rec = models.recognizer.to_string_lossy().to_string();
        let dict = models.dictionary.to_string_lossy().to_string();

        let mut ocr = OcrLite::new();
        ocr.init_models_with_dict(&det, &cls, &rec, &dict, threads)
            .map_err(|e| OcrError::EngineInit(format!("failed to load models: {e}")))?;

        Ok(Box::new(PaddleEngine { ocr }))
    }
}

/// RapidOCR pipeline (DB detector, angle classifier, CRNN recognizer)
pub struct PaddleEngine {
    ocr: OcrLite,
}

impl InferenceEngine for PaddleEngine {
    fn detect(&mut self, image: &RgbImage, options: &EngineOptions) -> Result<NativeOcrResult> {
        debug!(
            width = image.width(),
            height = image.height(),
            "Running PaddleOCR detection"
        );

        let result = self
            .ocr
            .detect(
                image,
                options.padding,
                options.max_side_len,
                options.box_score_thresh,
                options.box_thresh,
                options.unclip_ratio,
                options.do_angle,
                options.most_angle,
            )
            .map_err(|e| OcrError::Recognition(format!("detection failed: {e}")))?;

        let text_blocks = result
            .text_blocks
            .into_iter()
            .map(|block| NativeTextBlock {
                text: block.text,
                box_points: block
                    .box_points
                    .iter()
                    .map(|p| (p.x as f32, p.y as f32))
                    .collect(),
            })
            .collect();

        Ok(NativeOcrResult { text_blocks })
    }
}

fn resolve_threads(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }

    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2)
        .clamp(1, 4)
}

#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use image::{DynamicImage, ImageFormat, RgbImage};
use paddle_onnx_ocr::ocr::{
    EngineFactory, InferenceEngine, ModelBundle, NativeOcrResult, NativeTextBlock,
    CHARACTER_DICT, CLASSIFIER_MODEL, DETECTOR_MODEL, RECOGNIZER_MODEL,
};
use paddle_onnx_ocr::{EngineOptions, OcrConfig, OcrError, Result};

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Encode a blank RGB image as PNG bytes
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::new_rgb8(width, height);
    let mut output = Vec::new();
    img.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)
        .expect("Failed to encode PNG");
    output
}

/// Write placeholder files for all four model artifacts
pub fn write_model_stubs(dir: &Path) {
    fs::create_dir_all(dir).expect("Failed to create models directory");
    for name in [DETECTOR_MODEL, CLASSIFIER_MODEL, RECOGNIZER_MODEL, CHARACTER_DICT] {
        fs::write(dir.join(name), b"stub").expect("Failed to write model stub");
    }
}

pub fn test_config() -> OcrConfig {
    OcrConfig {
        timeout_secs: 30,
        num_threads: 1,
        reuse_engine: false,
        engine: EngineOptions::default(),
    }
}

pub fn quad(x: f32, y: f32, w: f32, h: f32) -> Vec<(f32, f32)> {
    vec![(x, y), (x + w, y), (x + w, y + h), (x, y + h)]
}

pub fn native_block(text: &str, points: Vec<(f32, f32)>) -> NativeTextBlock {
    NativeTextBlock {
        text: text.to_string(),
        box_points: points,
    }
}

/// What a [`FakeEngine`] does when asked to detect
#[derive(Debug, Clone)]
pub enum Detection {
    Blocks(Vec<NativeTextBlock>),
    Fail(String),
    Panic,
}

/// Engine factory double that tracks how many engines are alive
#[derive(Clone)]
pub struct FakeEngineFactory {
    detection: Detection,
    detect_delay: Duration,
    load_delay: Duration,
    init_error: Option<String>,
    created: Arc<AtomicUsize>,
    live: Arc<AtomicUsize>,
}

impl FakeEngineFactory {
    pub fn returning(blocks: Vec<NativeTextBlock>) -> Self {
        Self {
            detection: Detection::Blocks(blocks),
            detect_delay: Duration::ZERO,
            load_delay: Duration::ZERO,
            init_error: None,
            created: Arc::new(AtomicUsize::new(0)),
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing_detect(message: &str) -> Self {
        Self {
            detection: Detection::Fail(message.to_string()),
            ..Self::returning(vec![])
        }
    }

    pub fn panicking() -> Self {
        Self {
            detection: Detection::Panic,
            ..Self::returning(vec![])
        }
    }

    pub fn failing_init(message: &str) -> Self {
        Self {
            init_error: Some(message.to_string()),
            ..Self::returning(vec![])
        }
    }

    pub fn with_detect_delay(mut self, delay: Duration) -> Self {
        self.detect_delay = delay;
        self
    }

    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl EngineFactory for FakeEngineFactory {
    fn create(&self, _models: &ModelBundle, _num_threads: usize) -> Result<Box<dyn InferenceEngine>> {
        if !self.load_delay.is_zero() {
            std::thread::sleep(self.load_delay);
        }
        if let Some(message) = &self.init_error {
            return Err(OcrError::EngineInit(message.clone()));
        }

        self.created.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeEngine {
            detection: self.detection.clone(),
            delay: self.detect_delay,
            live: Arc::clone(&self.live),
        }))
    }
}

pub struct FakeEngine {
    detection: Detection,
    delay: Duration,
    live: Arc<AtomicUsize>,
}

impl InferenceEngine for FakeEngine {
    fn detect(&mut self, _image: &RgbImage, _options: &EngineOptions) -> Result<NativeOcrResult> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        match &self.detection {
            Detection::Blocks(blocks) => Ok(NativeOcrResult {
                text_blocks: blocks.clone(),
            }),
            Detection::Fail(message) => Err(OcrError::Recognition(message.clone())),
            Detection::Panic => panic!("engine crashed"),
        }
    }
}

impl Drop for FakeEngine {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

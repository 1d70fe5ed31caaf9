//! PaddleOCR (PP-OCRv5, ONNX) recognition plugin.
//!
//! Wraps a RapidOCR-style engine for a host translation application: the host
//! hands over image bytes and a cancellation token, the plugin runs detection,
//! angle classification and recognition off the async runtime, enforces a
//! deadline, and returns text lines with their bounding quadrilaterals.
//!
//! ```rust,ignore
//! use paddle_onnx_ocr::{FsPluginContext, OcrPlugin, PaddleOnnxPlugin, RecognitionRequest};
//!
//! let mut plugin = PaddleOnnxPlugin::new();
//! plugin.init(Arc::new(FsPluginContext::new(metadata, settings_path)))?;
//! let result = plugin.recognize(RecognitionRequest::new(bytes), &token).await;
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod ocr;
pub mod plugin;

pub use config::{EngineOptions, OcrConfig};
pub use error::{FailureKind, OcrError, Result};
pub use models::{
    BoxPoint, Language, PluginMetadata, RecognitionRequest, RecognitionResult, Settings,
    TextBlock,
};
pub use ocr::Recognizer;
pub use plugin::{FsPluginContext, OcrPlugin, PaddleOnnxPlugin, PluginContext};

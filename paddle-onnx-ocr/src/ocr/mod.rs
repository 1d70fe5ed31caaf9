//! OCR (Optical Character Recognition) Module
//!
//! Runs PP-OCRv5 detection, orientation classification and recognition over a
//! single image and maps the output onto the host's result schema.
//!
//! # Architecture
//!
//! - `InferenceEngine` / `EngineFactory` abstract the model runtime;
//!   `PaddleEngineFactory` implements them with `paddle-ocr-rs` on ONNX Runtime
//! - `Recognizer` owns one request end to end: it links the caller's
//!   cancellation token with an internal deadline, runs load → decode → detect
//!   → normalize on the blocking pool, and classifies the outcome
//! - `normalize` converts engine blocks into `TextBlock`s
//!
//! Cancellation is checked between stages only. A running `detect` call is
//! never interrupted, so a cancelled request returns once it finishes, with
//! its engine and bitmap already dropped.
//!
//! # Usage
//!
//! ```rust,ignore
//! let recognizer = Recognizer::new(models_dir, &OcrConfig::from_env());
//! let result = recognizer.recognize(RecognitionRequest::new(bytes), &token).await;
//! ```

mod cancellation;
mod decode;
mod engine;
mod normalize;
mod paddle;
mod recognizer;

pub use cancellation::{ensure_active, CancelCause, LinkedCancellation};
pub use decode::decode_image;
pub use engine::{
    EngineFactory, InferenceEngine, ModelBundle, NativeOcrResult, NativeTextBlock,
    CHARACTER_DICT, CLASSIFIER_MODEL, DETECTOR_MODEL, RECOGNIZER_MODEL,
};
pub use normalize::normalize;
pub use paddle::{PaddleEngine, PaddleEngineFactory};
pub use recognizer::Recognizer;

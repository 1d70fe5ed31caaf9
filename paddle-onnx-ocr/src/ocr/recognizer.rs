use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use image::RgbImage;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::{EngineOptions, OcrConfig};
use crate::error::{OcrError, Result};
use crate::models::{RecognitionRequest, RecognitionResult, TextBlock};

use super::cancellation::{ensure_active, LinkedCancellation};
use super::decode::decode_image;
use super::engine::{EngineFactory, InferenceEngine, ModelBundle};
use super::normalize::normalize;
use super::paddle::PaddleEngineFactory;

type EngineSlot = Arc<Mutex<Option<Box<dyn InferenceEngine>>>>;

/// Runs recognition requests against a models directory.
///
/// Each call loads its own engine unless `reuse_engine` is set, in which case
/// one engine is created on first use and shared behind a mutex.
pub struct Recognizer {
    models: ModelBundle,
    models_dir: PathBuf,
    factory: Arc<dyn EngineFactory>,
    options: EngineOptions,
    num_threads: usize,
    timeout: Duration,
    shared: Option<EngineSlot>,
}

impl Recognizer {
    pub fn new(models_dir: impl Into<PathBuf>, config: &OcrConfig) -> Self {
        Self::with_factory(models_dir, config, Arc::new(PaddleEngineFactory))
    }

    pub fn with_factory(
        models_dir: impl Into<PathBuf>,
        config: &OcrConfig,
        factory: Arc<dyn EngineFactory>,
    ) -> Self {
        let models_dir = models_dir.into();
        Self {
            models: ModelBundle::in_dir(&models_dir),
            models_dir,
            factory,
            options: config.engine.clone(),
            num_threads: config.num_threads,
            timeout: config.timeout(),
            shared: config.reuse_engine.then(|| Arc::new(Mutex::new(None))),
        }
    }

    /// Override the recognition deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn models(&self) -> &ModelBundle {
        &self.models
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// True when every model file is on disk
    pub fn is_available(&self) -> bool {
        self.models.missing().is_empty()
    }

    /// Recognize text in `request`. Never fails: every error, cancellation and
    /// timeout comes back as a failed [`RecognitionResult`].
    pub async fn recognize(
        &self,
        request: RecognitionRequest,
        cancel: &CancellationToken,
    ) -> RecognitionResult {
        let start = Instant::now();
        let image_len = request.image_data.len();

        match self.recognize_internal(request, cancel).await {
            Ok(blocks) => {
                info!(
                    blocks = blocks.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Recognition completed"
                );
                RecognitionResult::success(blocks)
            }
            Err(e) => {
                warn!(
                    kind = %e.kind(),
                    image_len,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Recognition failed: {}",
                    e
                );
                RecognitionResult::failure(&e)
            }
        }
    }

    async fn recognize_internal(
        &self,
        request: RecognitionRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<TextBlock>> {
        let scope = LinkedCancellation::new(cancel, self.timeout);

        let job = RecognitionJob {
            image_data: request.image_data,
            models: self.models.clone(),
            factory: Arc::clone(&self.factory),
            options: self.options.clone(),
            num_threads: self.num_threads,
            shared: self.shared.clone(),
        };
        let token = scope.token();
        let handle = tokio::task::spawn_blocking(move || job.run(&token));

        // The worker owns the engine and bitmap, so it is awaited even after the
        // combined token fires. It stops at its next checkpoint.
        let outcome = handle
            .await
            .map_err(|e| OcrError::Recognition(format!("recognition task panicked: {e}")))?;

        match outcome {
            Ok(_) if scope.cause().is_some() => Err(scope.interrupted()),
            other => other.map_err(|e| scope.classify(e)),
        }
    }
}

/// Everything one blocking worker needs, owned so it can outlive the caller
struct RecognitionJob {
    image_data: Vec<u8>,
    models: ModelBundle,
    factory: Arc<dyn EngineFactory>,
    options: EngineOptions,
    num_threads: usize,
    shared: Option<EngineSlot>,
}

impl RecognitionJob {
    fn run(self, token: &CancellationToken) -> Result<Vec<TextBlock>> {
        ensure_active(token)?;

        match &self.shared {
            None => {
                let mut engine = self.load_engine()?;
                self.run_stages(engine.as_mut(), token)
            }
            Some(slot) => {
                let mut guard = slot.blocking_lock();
                let mut engine = match guard.take() {
                    Some(engine) => engine,
                    None => self.load_engine()?,
                };
                let result = self.run_stages(engine.as_mut(), token);
                *guard = Some(engine);
                result
            }
        }
    }

    fn load_engine(&self) -> Result<Box<dyn InferenceEngine>> {
        let start = Instant::now();
        let engine = self.factory.create(&self.models, self.num_threads)?;
        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "OCR engine loaded"
        );
        Ok(engine)
    }

    fn run_stages(
        &self,
        engine: &mut dyn InferenceEngine,
        token: &CancellationToken,
    ) -> Result<Vec<TextBlock>> {
        ensure_active(token)?;

        let bitmap: RgbImage = decode_image(&self.image_data)?;
        debug!(
            width = bitmap.width(),
            height = bitmap.height(),
            "Image decoded"
        );

        ensure_active(token)?;

        let native = engine.detect(&bitmap, &self.options)?;
        debug!(blocks = native.text_blocks.len(), "Detection finished");

        normalize(native)
    }
}

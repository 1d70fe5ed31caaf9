//! Host-facing plugin shell
//!
//! The host constructs the plugin, calls `init` once with a [`PluginContext`],
//! then issues any number of concurrent `recognize` calls before `dispose`.

mod context;

pub use context::{FsPluginContext, PluginContext};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::OcrConfig;
use crate::error::{OcrError, Result};
use crate::models::{
    Language, PluginMetadata, RecognitionRequest, RecognitionResult, Settings,
    SUPPORTED_LANGUAGES,
};
use crate::ocr::{EngineFactory, PaddleEngineFactory, Recognizer};

const MODELS_SUBDIR: &str = "models";
const MODELS_VERSION: &str = "v5";

/// Contract an OCR plugin exposes to the host
#[async_trait]
pub trait OcrPlugin: Send + Sync {
    fn init(&mut self, context: Arc<dyn PluginContext>) -> Result<()>;

    fn supported_languages(&self) -> &'static [Language];

    /// Settings surface. Empty for now.
    fn settings(&self) -> Option<&Settings>;

    async fn recognize(
        &self,
        request: RecognitionRequest,
        cancel: &CancellationToken,
    ) -> RecognitionResult;

    fn dispose(&mut self);
}

/// `<directory name of plugin dir>/<assembly name>/models/v5`.
///
/// The directory name drops the last path segment, so a trailing separator
/// keeps the plugin directory itself as the base. Falls back to the
/// executable's directory when there is no directory name.
pub fn models_directory(metadata: &PluginMetadata) -> PathBuf {
    let base = directory_name(&metadata.plugin_directory).unwrap_or_else(executable_dir);

    base.join(&metadata.assembly_name)
        .join(MODELS_SUBDIR)
        .join(MODELS_VERSION)
}

fn directory_name(path: &Path) -> Option<PathBuf> {
    let raw = path.to_string_lossy();
    if raw.ends_with(std::path::is_separator) {
        let trimmed = raw.trim_end_matches(std::path::is_separator);
        return (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
    }

    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// PaddleOCR ONNX plugin
pub struct PaddleOnnxPlugin {
    factory: Arc<dyn EngineFactory>,
    context: Option<Arc<dyn PluginContext>>,
    settings: Option<Settings>,
    recognizer: Option<Recognizer>,
}

impl Default for PaddleOnnxPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl PaddleOnnxPlugin {
    pub fn new() -> Self {
        Self::with_factory(Arc::new(PaddleEngineFactory))
    }

    pub fn with_factory(factory: Arc<dyn EngineFactory>) -> Self {
        Self {
            factory,
            context: None,
            settings: None,
            recognizer: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.recognizer.is_some()
    }

    pub fn models_dir(&self) -> Option<&Path> {
        self.recognizer.as_ref().map(Recognizer::models_dir)
    }

    pub fn context(&self) -> Option<&Arc<dyn PluginContext>> {
        self.context.as_ref()
    }

    pub fn recognizer(&self) -> Option<&Recognizer> {
        self.recognizer.as_ref()
    }
}

#[async_trait]
impl OcrPlugin for PaddleOnnxPlugin {
    fn init(&mut self, context: Arc<dyn PluginContext>) -> Result<()> {
        let metadata = context.metadata().clone();

        let settings = match context.load_settings() {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load plugin settings: {} - using defaults", e);
                Settings::default()
            }
        };

        let env_file = metadata.plugin_directory.join(".env");
        if dotenvy::from_path(&env_file).is_ok() {
            debug!(path = %env_file.display(), "Loaded plugin environment file");
        }

        let config = OcrConfig::from_env();
        let models_dir = models_directory(&metadata);
        let recognizer = Recognizer::with_factory(&models_dir, &config, Arc::clone(&self.factory));

        info!(
            assembly = %metadata.assembly_name,
            models_dir = %models_dir.display(),
            timeout_secs = config.timeout_secs,
            reuse_engine = config.reuse_engine,
            "PaddleOCR plugin initialized"
        );
        if !recognizer.is_available() {
            warn!(
                models_dir = %models_dir.display(),
                "OCR model files missing - recognition will fail until they are installed"
            );
        }

        self.context = Some(context);
        self.settings = Some(settings);
        self.recognizer = Some(recognizer);
        Ok(())
    }

    fn supported_languages(&self) -> &'static [Language] {
        SUPPORTED_LANGUAGES
    }

    fn settings(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }

    async fn recognize(
        &self,
        request: RecognitionRequest,
        cancel: &CancellationToken,
    ) -> RecognitionResult {
        match &self.recognizer {
            Some(recognizer) => recognizer.recognize(request, cancel).await,
            None => RecognitionResult::failure(&OcrError::NotInitialized),
        }
    }

    fn dispose(&mut self) {
        if self.recognizer.take().is_some() {
            info!("PaddleOCR plugin disposed");
        }
        self.settings = None;
        self.context = None;
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::models::{PluginMetadata, Settings};

/// What the host hands the plugin at init time
pub trait PluginContext: Send + Sync {
    fn metadata(&self) -> &PluginMetadata;

    fn load_settings(&self) -> Result<Settings>;
}

/// Context backed by a JSON settings file on disk.
///
/// A missing file yields default settings.
#[derive(Debug, Clone)]
pub struct FsPluginContext {
    metadata: PluginMetadata,
    settings_path: PathBuf,
}

impl FsPluginContext {
    pub fn new(metadata: PluginMetadata, settings_path: impl Into<PathBuf>) -> Self {
        Self {
            metadata,
            settings_path: settings_path.into(),
        }
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.settings_path, serde_json::to_vec_pretty(settings)?)?;
        Ok(())
    }
}

impl PluginContext for FsPluginContext {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn load_settings(&self) -> Result<Settings> {
        if !self.settings_path.exists() {
            debug!(path = %self.settings_path.display(), "No settings file, using defaults");
            return Ok(Settings::default());
        }

        let raw = fs::read(&self.settings_path)?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

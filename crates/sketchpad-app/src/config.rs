//! Application configuration file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sketchpad_core::{EditorConfig, FileStorage};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the document blobs. Defaults to the platform data dir.
    pub storage_dir: Option<PathBuf>,
    pub editor: EditorConfig,
}

impl AppConfig {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sketchpad").join("config.json"))
    }

    /// Load from `path`, or from [`default_path`](Self::default_path) when
    /// `None`. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Ok(Self::default());
        };
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Open the blob store, preferring `override_dir` over the configured one.
    pub fn open_storage(&self, override_dir: Option<&Path>) -> Result<FileStorage> {
        let storage = match override_dir.or(self.storage_dir.as_deref()) {
            Some(dir) => FileStorage::new(dir.to_path_buf()),
            None => FileStorage::default_location(),
        }
        .context("Failed to open storage")?;
        log::debug!("Using storage at {}", storage.base_path().display());
        Ok(storage)
    }
}

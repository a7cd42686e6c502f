//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml`, creating the file with
//! defaults when it is missing.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use webforge_core::config::RootConfig;
use webforge_core::error::Result;

use crate::paths::WebforgePaths;

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    file_path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Uses the platform config directory, or `base_path` when given.
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        Ok(Self {
            file_path: WebforgePaths::new(base_path).config_file()?,
            config: Arc::new(RwLock::new(None)),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Gets the root configuration, loading from file if not cached.
    ///
    /// An unreadable or malformed file falls back to the defaults.
    pub fn get_config(&self) -> RootConfig {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref config) = *cached {
                return config.clone();
            }
        }

        let loaded = self.load_config().unwrap_or_else(|err| {
            tracing::warn!("[ConfigService] Using defaults: {}", err);
            RootConfig::default()
        });
        if !loaded.is_supported_model() {
            tracing::warn!(
                "[ConfigService] Model '{}' is not in the supported list",
                loaded.model.name
            );
        }

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Reads `config.toml`, writing the defaults first if it does not exist.
    pub fn load_config(&self) -> Result<RootConfig> {
        if !self.file_path.exists() {
            let default_config = RootConfig::default();
            self.save_config(&default_config)?;
            return Ok(default_config);
        }
        let content = std::fs::read_to_string(&self.file_path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save_config(&self, config: &RootConfig) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.file_path, toml::to_string_pretty(config)?)?;
        self.invalidate_cache();
        tracing::debug!("[ConfigService] Saved {}", self.file_path.display());
        Ok(())
    }
}

//! Secret service implementation.
//!
//! Reads `secret.json` once and caches it. The `GEMINI_API_KEY` environment
//! variable, when set, wins over the file's key.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use webforge_core::config::{GeminiConfig, SecretConfig};
use webforge_core::error::Result;
use webforge_core::secret::SecretService;

use crate::paths::WebforgePaths;

/// Environment variable overriding the stored API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Service for managing secret configuration.
#[derive(Clone)]
pub struct SecretServiceImpl {
    file_path: PathBuf,
    env_key: Option<String>,
    /// Cached secret config loaded from disk.
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    /// Uses the platform config directory, or `base_path` when given.
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let file_path = WebforgePaths::new(base_path).secret_file()?;
        Ok(Self {
            file_path,
            env_key: std::env::var(API_KEY_ENV).ok().filter(|key| !key.trim().is_empty()),
            secrets: Arc::new(RwLock::new(None)),
        })
    }

    /// Replaces the key picked up from the environment.
    pub fn with_env_key(mut self, key: Option<String>) -> Self {
        self.env_key = key;
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn read_file(&self) -> Result<SecretConfig> {
        if !self.file_path.exists() {
            tracing::debug!(
                "[SecretService] No secret file at {}",
                self.file_path.display()
            );
            return Ok(SecretConfig::default());
        }
        let content = std::fs::read_to_string(&self.file_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn load_secrets_internal(&self) -> Result<SecretConfig> {
        {
            let cached = self.secrets.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref secrets) = *cached {
                return Ok(secrets.clone());
            }
        }

        let mut loaded = self.read_file()?;
        if let Some(key) = &self.env_key {
            tracing::debug!("[SecretService] Using API key from {}", API_KEY_ENV);
            let model_name = loaded.gemini.take().and_then(|gemini| gemini.model_name);
            loaded.gemini = Some(GeminiConfig {
                api_key: key.clone(),
                model_name,
            });
        }

        *self.secrets.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        Ok(loaded)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        self.load_secrets_internal()
    }

    async fn secret_file_exists(&self) -> bool {
        self.file_path.exists()
    }
}

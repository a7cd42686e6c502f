//! Unified path management for webforge configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/webforge/          # Config directory (dirs::config_dir)
//! ├── config.toml              # Model and generation settings
//! └── secret.json              # API keys
//! ```

use std::path::{Path, PathBuf};

use webforge_core::config::{GeminiConfig, SecretConfig};
use webforge_core::error::{ForgeError, Result};

const APP_DIR: &str = "webforge";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for ForgeError {
    fn from(err: PathError) -> Self {
        ForgeError::config(err.to_string())
    }
}

/// Resolves webforge's files, optionally under an explicit base directory.
#[derive(Debug, Clone, Default)]
pub struct WebforgePaths {
    base: Option<PathBuf>,
}

impl WebforgePaths {
    /// `base` replaces the platform config directory (tests, portable setups).
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the webforge configuration directory.
    pub fn config_dir(&self) -> std::result::Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> std::result::Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    pub fn secret_file(&self) -> std::result::Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    /// Ensures the secret file exists, creating an empty-key template if it
    /// doesn't. On Unix the file is created with mode 600.
    pub fn ensure_secret_file(&self) -> Result<PathBuf> {
        let secret_path = self.secret_file()?;
        if secret_path.exists() {
            return Ok(secret_path);
        }
        if let Some(parent) = secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
                model_name: None,
            }),
        };
        std::fs::write(&secret_path, serde_json::to_string_pretty(&template)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&secret_path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::info!("[WebforgePaths] Created secret template at {}", secret_path.display());
        Ok(secret_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dirs_end_with_app_name() {
        let paths = WebforgePaths::default();
        if let Ok(config_dir) = paths.config_dir() {
            assert!(config_dir.ends_with("webforge"));
            assert!(paths.config_file().unwrap().starts_with(&config_dir));
        }
    }

    #[test]
    fn test_base_override() {
        let dir = tempfile::tempdir().unwrap();
        let paths = WebforgePaths::new(Some(dir.path()));
        assert_eq!(paths.config_file().unwrap(), dir.path().join("config.toml"));
        assert_eq!(paths.secret_file().unwrap(), dir.path().join("secret.json"));
    }

    #[test]
    fn test_ensure_secret_file_writes_template_once() {
        let dir = tempfile::tempdir().unwrap();
        let paths = WebforgePaths::new(Some(&dir.path().join("nested")));

        let path = paths.ensure_secret_file().unwrap();
        let written: SecretConfig =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.api_key(), None);
        assert_eq!(written.model_name(), None);

        std::fs::write(&path, r#"{"gemini":{"api_key":"kept"}}"#).unwrap();
        paths.ensure_secret_file().unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("kept"));
    }
}

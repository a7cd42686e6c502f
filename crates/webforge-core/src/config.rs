//! Configuration types.
//!
//! `RootConfig` is the shape of `config.toml`; `SecretConfig` the shape of
//! `secret.json`. Loading lives in `webforge-infrastructure`.

use serde::{Deserialize, Serialize};

/// Model used when nothing else is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-pro-exp-02-05";

/// Models offered for selection.
pub const SUPPORTED_MODELS: [&str; 2] = [DEFAULT_MODEL, "gemini-2.0-flash-thinking-exp-01-21"];

/// Sampling parameters sent with every request.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RootConfig {
    pub model: ModelConfig,
    pub generation: GenerationConfig,
}

impl RootConfig {
    /// Whether the configured model is one of [`SUPPORTED_MODELS`].
    pub fn is_supported_model(&self) -> bool {
        SUPPORTED_MODELS.contains(&self.model.name.as_str())
    }
}

/// Root of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API credentials.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

impl SecretConfig {
    /// The API key, if one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .map(|gemini| gemini.api_key.trim())
            .filter(|key| !key.is_empty())
    }

    /// Model override stored next to the key.
    pub fn model_name(&self) -> Option<&str> {
        self.gemini.as_ref().and_then(|gemini| gemini.model_name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: RootConfig = toml::from_str("").unwrap();
        assert_eq!(config, RootConfig::default());
        assert_eq!(config.model.name, DEFAULT_MODEL);
        assert_eq!(config.generation.max_output_tokens, 8192);
        assert!(config.is_supported_model());
    }

    #[test]
    fn test_partial_generation_section() {
        let config: RootConfig = toml::from_str(
            "[model]\nname = \"gemini-2.0-flash-thinking-exp-01-21\"\n\n[generation]\ntemperature = 0.2\n",
        )
        .unwrap();
        assert_eq!(config.generation.temperature, 0.2);
        assert_eq!(config.generation.top_k, 40);
        assert!(config.is_supported_model());
    }

    #[test]
    fn test_secret_api_key() {
        let secret: SecretConfig =
            serde_json::from_str(r#"{"gemini":{"api_key":"  "}}"#).unwrap();
        assert_eq!(secret.api_key(), None);

        let secret: SecretConfig = serde_json::from_str(
            r#"{"gemini":{"api_key":"abc","model_name":"gemini-2.0-pro-exp-02-05"}}"#,
        )
        .unwrap();
        assert_eq!(secret.api_key(), Some("abc"));
        assert_eq!(secret.model_name(), Some(DEFAULT_MODEL));

        assert_eq!(SecretConfig::default().api_key(), None);
    }
}

//! GeminiApiClient - Direct REST API implementation for Gemini.
//!
//! One `generateContent` call per prompt, no streaming and no retries.
//! Credentials come from `secret.json` (see `webforge-infrastructure`).

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use webforge_core::config::{DEFAULT_MODEL, GenerationConfig, SecretConfig};
use webforge_core::error::{ForgeError, Result};

use crate::CompletionClient;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Raised before any network call when no key is configured.
pub const MISSING_KEY_MESSAGE: &str =
    "API ключ не указан. Пожалуйста, добавьте API ключ в настройках.";

/// Reply used when the response carries no text.
pub const EMPTY_REPLY_FALLBACK: &str = "Извините, не удалось получить ответ от API.";

/// Client that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiClient {
    client: Client,
    api_key: String,
    model: String,
    generation: GenerationConfig,
    base_url: String,
}

impl std::fmt::Debug for GeminiApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiApiClient")
            .field("model", &self.model)
            .field("generation", &self.generation)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiApiClient {
    /// Creates a new client with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            generation: GenerationConfig::default(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Builds a client from loaded secrets.
    ///
    /// A missing key is not an error here; it surfaces on the first
    /// [`CompletionClient::complete`] call, like in the settings-driven UI.
    pub fn from_secrets(secrets: &SecretConfig) -> Self {
        Self::new(
            secrets.api_key().unwrap_or_default(),
            secrets.model_name().unwrap_or(DEFAULT_MODEL),
        )
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// Points the client at another endpoint root (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfigPayload::from(&self.generation),
        }
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                // reqwest includes the URL, and with it the key, in its Display.
                ForgeError::transport(format!(
                    "Gemini API request failed: {}",
                    err.without_url()
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, &body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            ForgeError::transport(format!("Failed to parse Gemini response: {}", err.without_url()))
        })?;

        Ok(extract_text_response(parsed))
    }
}

#[async_trait]
impl CompletionClient for GeminiApiClient {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        if self.api_key.trim().is_empty() {
            return Err(ForgeError::missing_credential(MISSING_KEY_MESSAGE));
        }
        tracing::debug!(
            "[GeminiApiClient] generateContent model={} prompt_len={}",
            self.model,
            prompt.len()
        );
        let request = self.build_request(prompt);
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfigPayload,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfigPayload {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

impl From<&GenerationConfig> for GenerationConfigPayload {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_k: config.top_k,
            top_p: config.top_p,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// `candidates[0].content.parts[0].text`, or the fixed apology.
fn extract_text_response(response: GenerateContentResponse) -> String {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string())
}

/// The body's `error.message`, else the status text.
fn map_http_error(status: StatusCode, body: &str) -> ForgeError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| wrapper.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());
    tracing::warn!("[GeminiApiClient] HTTP {}: {}", status.as_u16(), message);
    ForgeError::api(status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_request_body_shape() {
        let client = GeminiApiClient::new("k", DEFAULT_MODEL);
        let body = serde_json::to_value(client.build_request("hi")).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{ "parts": [{ "text": "hi" }] }],
                "generationConfig": {
                    "temperature": 0.7f32,
                    "topK": 40,
                    "topP": 0.95f32,
                    "maxOutputTokens": 8192
                }
            })
        );
    }

    #[test]
    fn test_extracts_first_part_of_first_candidate() {
        let response = parse(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first" }, { "text": "second" }] } },
                { "content": { "parts": [{ "text": "other" }] } }
            ]
        }));
        assert_eq!(extract_text_response(response), "first");
    }

    #[test]
    fn test_missing_text_falls_back_to_apology() {
        for value in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{}] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{}] } }] }),
        ] {
            assert_eq!(extract_text_response(parse(value)), EMPTY_REPLY_FALLBACK);
        }
    }

    #[test]
    fn test_http_error_prefers_body_message() {
        let err = map_http_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#,
        );
        assert_eq!(err, ForgeError::api(400, "API key not valid"));
        assert_eq!(err.to_string(), "API Error: API key not valid");
    }

    #[test]
    fn test_http_error_falls_back_to_status_text() {
        let err = map_http_error(StatusCode::SERVICE_UNAVAILABLE, "<html>oops</html>");
        assert_eq!(err.to_string(), "API Error: Service Unavailable");
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let client = GeminiApiClient::from_secrets(&SecretConfig::default())
            .with_base_url("http://127.0.0.1:1");
        let err = client.complete("hi").await.unwrap_err();
        assert!(err.is_missing_credential());
        assert_eq!(err.to_string(), MISSING_KEY_MESSAGE);
    }

    #[test]
    fn test_debug_hides_key() {
        let client = GeminiApiClient::new("secret-key", DEFAULT_MODEL);
        assert!(!format!("{client:?}").contains("secret-key"));
    }
}

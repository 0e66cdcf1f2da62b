// Gemini API client.
//
// One non-streaming generateContent call per summary request. The response's
// candidate text is returned verbatim; every failure mode (auth, quota,
// network, malformed response) is converted into a `SummaryError` rather
// than propagating an uncaught fault.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SummaryError {
    /// Network failure or timeout while calling the provider.
    #[error("summary request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success HTTP status.
    #[error("summary request returned status {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The provider response did not contain candidate text.
    #[error("unexpected summary response: {0}")]
    Shape(String),

    /// No API key configured; the summary feature is disabled.
    #[error("summary generation is not configured (no API key)")]
    NotConfigured,
}

// ---------------------------------------------------------------------------
// GeminiClient
// ---------------------------------------------------------------------------

/// Low-level Gemini generateContent client.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client with the given API key and model identifier.
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, model, GEMINI_API_BASE.to_string())
    }

    /// Create a client against an alternate endpoint root. Used by tests to
    /// point at a local mock server.
    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        GeminiClient {
            http: reqwest::Client::new(),
            api_key,
            model,
            base_url,
        }
    }

    /// Send one prompt and return the generated text verbatim.
    pub async fn generate(&self, prompt: &str) -> Result<String, SummaryError> {
        if self.api_key.is_empty() {
            return Err(SummaryError::NotConfigured);
        }

        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        debug!(model = %self.model, "sending summary request");

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Pull the provider's error message out of the body when it has
            // the documented error envelope.
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| parse_error_message(&v))
                .unwrap_or_else(|| "no error detail".to_string());
            return Err(SummaryError::Status { status, message });
        }

        let payload: Value = response.json().await?;
        parse_candidate_text(&payload)
            .ok_or_else(|| SummaryError::Shape("no candidate text in response".into()))
    }
}

// ---------------------------------------------------------------------------
// LlmClient wrapper
// ---------------------------------------------------------------------------

/// High-level wrapper that is either an active Gemini client or disabled.
///
/// A missing or placeholder API key disables only summary generation; draft
/// browsing never depends on the key.
pub enum LlmClient {
    Active(GeminiClient),
    Disabled,
}

impl LlmClient {
    /// Build an `LlmClient` from the application config.
    pub fn from_config(config: &Config) -> Self {
        match config.credentials.usable_api_key() {
            Some(key) => LlmClient::Active(GeminiClient::new(
                key.to_string(),
                config.llm.model.clone(),
            )),
            None => LlmClient::Disabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, LlmClient::Active(_))
    }

    /// Generate a summary, delegating to the inner client or failing
    /// immediately when disabled.
    pub async fn generate(&self, prompt: &str) -> Result<String, SummaryError> {
        match self {
            LlmClient::Active(client) => client.generate(prompt).await,
            LlmClient::Disabled => Err(SummaryError::NotConfigured),
        }
    }
}

// ---------------------------------------------------------------------------
// Response parsing helpers
// ---------------------------------------------------------------------------

/// Extract the generated text from a generateContent response.
///
/// Expected shape:
/// `{ "candidates": [ { "content": { "parts": [ { "text": "..." } ] } } ] }`
/// Multiple parts are concatenated in order.
pub(crate) fn parse_candidate_text(payload: &Value) -> Option<String> {
    let parts = payload
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let mut text = String::new();
    for part in parts {
        if let Some(chunk) = part.get("text").and_then(Value::as_str) {
            text.push_str(chunk);
        }
    }

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Extract the provider's error message from an error envelope.
///
/// Expected shape: `{ "error": { "code": N, "message": "...", "status": "..." } }`
pub(crate) fn parse_error_message(payload: &Value) -> Option<String> {
    payload
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

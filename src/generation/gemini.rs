//! Google Gemini provider implementation

use super::{GenerationError, GenerationResult, TextGenerator};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Gemini `generateContent` client
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model_id: String,
}

impl GeminiClient {
    /// Build a client for `{base_url}/models/{model}:generateContent`.
    ///
    /// No request timeout is set; the transport default applies.
    pub fn new(api_key: String, model: &str, base_url: &str) -> Result<Self, GenerationError> {
        let client = Client::builder().build()?;
        let endpoint = format!(
            "{}/models/{model}:generateContent",
            base_url.trim_end_matches('/')
        );

        Ok(Self {
            client,
            api_key,
            endpoint,
            model_id: model.to_string(),
        })
    }

    async fn request(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::info!(
            model = %self.model_id,
            status = status.as_u16(),
            body = %body,
            "Generation response received"
        );

        if !status.is_success() {
            return Err(GenerationError::Status { status, body });
        }

        let value: Value = serde_json::from_str(&body)?;
        extract_text(&value)
            .map(str::to_string)
            .ok_or(GenerationError::MissingText)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> GenerationResult {
        let start = Instant::now();
        match self.request(prompt).await {
            Ok(text) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %start.elapsed().as_millis(),
                    chars = text.chars().count(),
                    "Generation completed"
                );
                GenerationResult::success(text)
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %start.elapsed().as_millis(),
                    kind = e.kind(),
                    error = %e,
                    "Generation failed, using fallback text"
                );
                GenerationResult::fallback()
            }
        }
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// First text segment of the first candidate.
///
/// Every level may be missing or of the wrong type; any gap yields `None`,
/// as does blank text (the transport cannot send an empty message).
fn extract_text(response: &Value) -> Option<&str> {
    response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .filter(|text| !text.trim().is_empty())
}

// Gemini API types

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

//! Text generation provider abstraction
//!
//! A single-shot prompt goes in, a block of text comes out. Provider
//! failures never cross this boundary: they collapse into a fixed fallback
//! text with `succeeded == false`.

mod error;
mod gemini;
pub mod prompts;

pub use error::GenerationError;
pub use gemini::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};

use async_trait::async_trait;
use std::sync::Arc;

/// Shown to the user whenever the provider could not produce text.
pub const FALLBACK_TEXT: &str = "Error fetching question/answer. Please try again later.";

/// Outcome of a generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub text: String,
    pub succeeded: bool,
}

impl GenerationResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            succeeded: true,
        }
    }

    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_TEXT.to_string(),
            succeeded: false,
        }
    }
}

/// Common interface for text generation providers
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Issue a single prompt and return the extracted text
    async fn generate(&self, prompt: &str) -> GenerationResult;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    async fn generate(&self, prompt: &str) -> GenerationResult {
        (**self).generate(prompt).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}

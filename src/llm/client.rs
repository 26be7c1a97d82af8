//! LLM client abstraction
//!
//! The chat pipeline only needs one capability from a provider: take an
//! ordered list of turns and produce text. Providers implement
//! [`LLMClient`]; tests substitute their own implementation.

use crate::types::{Result, Turn};
use async_trait::async_trait;

/// Generic LLM client trait for provider abstraction
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a reply for the given conversation, oldest turn first.
    ///
    /// An empty `content` in the response is not an error; callers decide
    /// what to show instead.
    async fn generate_content(&self, contents: &[Turn]) -> Result<LLMResponse>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}

/// Response from an LLM generation request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LLMResponse {
    /// Generated text, possibly empty
    pub content: String,
    /// The reason generation stopped as reported by the provider (e.g. "STOP", "SAFETY")
    pub finish_reason: Option<String>,
}

impl LLMResponse {
    /// Response carrying only text.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            finish_reason: None,
        }
    }
}

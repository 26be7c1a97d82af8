//! Google Gemini LLM client implementation
//!
//! Talks to the `generateContent` REST endpoint directly with `reqwest`.
//! Turns are sent in the provider's own shape, so images travel as
//! `inline_data` parts next to text.
//!
//! # Example
//!
//! ```rust,ignore
//! use andyx::llm::{GeminiClient, LLMClient, DEFAULT_API_BASE};
//! use std::time::Duration;
//!
//! let client = GeminiClient::new(
//!     "AIza...".to_string(),
//!     DEFAULT_API_BASE.to_string(),
//!     "gemini-1.5-flash".to_string(),
//!     Duration::from_secs(60),
//! )?;
//! ```

use crate::llm::client::{LLMClient, LLMResponse};
use crate::types::{AppError, Result, Turn};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public Gemini API base URL.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini client for API-based inference
pub struct GeminiClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key
    /// * `api_base` - API base URL, usually [`DEFAULT_API_BASE`]
    /// * `model` - Model identifier (e.g., "gemini-1.5-flash")
    /// * `timeout` - Upper bound for a whole request
    pub fn new(api_key: String, api_base: String, model: String, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            api_base.trim_end_matches('/'),
            model
        );

        Ok(Self {
            http_client,
            endpoint,
            api_key,
            model,
            timeout,
        })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_send_error(&self, err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            AppError::Timeout(self.timeout)
        } else {
            AppError::LLM(format!("Gemini request failed: {}", err))
        }
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: &'a [Turn],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts joined. Empty when the provider
    /// returned no candidate (e.g. the prompt was blocked).
    fn into_llm_response(self) -> LLMResponse {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return LLMResponse::default();
        };

        let content = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        LLMResponse {
            content,
            finish_reason: candidate.finish_reason,
        }
    }
}

/// Provider message from an error body, or the body itself when it is not
/// the documented envelope.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[async_trait]
impl LLMClient for GeminiClient {
    async fn generate_content(&self, contents: &[Turn]) -> Result<LLMResponse> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest { contents })
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::LLM(format!("Invalid Gemini response: {}", e)))?;

        Ok(parsed.into_llm_response())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

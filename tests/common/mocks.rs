//! Mock implementations for testing.
//!
//! Provides a mock LLM client that can be shared across test files without
//! duplication.

use andyx::llm::{LLMClient, LLMResponse};
use andyx::types::{AppError, Result, Turn};
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock LLM client with a fixed outcome.
///
/// Every context it receives is recorded so tests can check what was sent
/// upstream.
pub struct MockLLMClient {
    response: String,
    error: Option<fn() -> AppError>,
    calls: Mutex<Vec<Vec<Turn>>>,
}

impl MockLLMClient {
    /// Create a new mock client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock client that always fails with the error built by `make`.
    pub fn failing(make: fn() -> AppError) -> Self {
        Self {
            response: String::new(),
            error: Some(make),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Contexts received so far, one entry per call.
    pub fn calls(&self) -> Vec<Vec<Turn>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate_content(&self, contents: &[Turn]) -> Result<LLMResponse> {
        self.calls.lock().unwrap().push(contents.to_vec());
        match self.error {
            Some(make) => Err(make()),
            None => Ok(LLMResponse::text(self.response.clone())),
        }
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

//! Chat orchestration.
//!
//! [`ChatService`] turns one inbound message into one reply: it normalizes
//! the input, replays the recent conversation to the model, maps provider
//! failures to user-facing text and records the exchange.

/// Request normalization into a user turn.
pub mod input;

pub use input::{build_user_turn, DEFAULT_IMAGE_MIME, MIN_IMAGE_LEN};

use crate::llm::LLMClient;
use crate::memory::ConversationHistory;
use crate::types::{AppError, Result, Turn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Reply sent when the provider reports quota exhaustion or rate limiting.
pub const QUOTA_REPLY: &str =
    "⚠️ Andyx are nevoie de o mică pauză (limită de mesaje atinsă). Revino în un minut!";

/// Reply used when the model answered without any text.
pub const EMPTY_REPLY: &str = "Andyx a primit mesajul, dar nu a putut genera un răspuns text.";

/// Default bound on a single model call.
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(60);

/// Process-wide chat state: the model client and the shared history.
///
/// The history lock is held from context assembly until the exchange is
/// committed, so concurrent requests are served one at a time and can never
/// interleave their turns.
pub struct ChatService {
    client: Arc<dyn LLMClient>,
    history: Mutex<ConversationHistory>,
    timeout: Duration,
}

impl ChatService {
    /// Service with an empty default history.
    pub fn new(client: Arc<dyn LLMClient>, timeout: Duration) -> Self {
        Self::with_history(client, ConversationHistory::new(), timeout)
    }

    /// Service starting from an existing history.
    pub fn with_history(
        client: Arc<dyn LLMClient>,
        history: ConversationHistory,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            history: Mutex::new(history),
            timeout,
        }
    }

    /// Answer one message.
    ///
    /// Quota failures resolve to [`QUOTA_REPLY`]; every other model failure
    /// (including timeout) is returned as an error. History is only written
    /// after a successful model call.
    pub async fn handle(&self, message: &str, image: Option<&str>) -> Result<String> {
        let user_turn = build_user_turn(message, image);

        let mut history = self.history.lock().await;
        let context = history.assemble(&user_turn);

        debug!(
            model = self.client.model_name(),
            context_turns = context.len(),
            history_turns = history.len(),
            "sending conversation to model"
        );

        let outcome = tokio::time::timeout(self.timeout, self.client.generate_content(&context))
            .await
            .unwrap_or(Err(AppError::Timeout(self.timeout)));

        let response = match outcome {
            Ok(response) => response,
            Err(err) if err.is_quota() => {
                warn!(error = %err, "model quota exhausted");
                return Ok(QUOTA_REPLY.to_string());
            }
            Err(err) => return Err(err),
        };

        let reply = match response.content.trim() {
            "" => {
                debug!(finish_reason = ?response.finish_reason, "model returned no text");
                EMPTY_REPLY.to_string()
            }
            text => text.to_string(),
        };

        history.commit(user_turn, Turn::model_text(reply.clone()));

        Ok(reply)
    }

    /// Snapshot of the committed history, oldest first.
    pub async fn history(&self) -> Vec<Turn> {
        self.history.lock().await.turns().to_vec()
    }

    /// Identifier of the model behind this service.
    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }
}

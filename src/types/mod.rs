use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============= API Request/Response Types =============

/// Body of `POST /chat`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Free-form user text. May be empty when only an image is sent.
    #[serde(default)]
    pub message: String,
    /// Base64 encoded image, optionally wrapped in a `data:` URL.
    #[serde(default)]
    pub image: Option<String>,
}

/// Body returned by `POST /chat`, for successes and failures alike.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Text shown to the user.
    pub reply: String,
}

impl ChatResponse {
    /// Wrap a reply string.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

// ============= Conversation Types =============

/// Greeting sent upstream when a request carries neither text nor image.
pub const FALLBACK_GREETING: &str = "Salut!";

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human participant.
    User,
    /// The language model.
    Model,
}

/// Binary payload carried inline in a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineData {
    /// MIME type tag, e.g. `image/jpeg`.
    pub mime_type: String,
    /// Base64 encoded bytes.
    pub data: String,
}

/// One content fragment of a turn.
///
/// Serializes to the Gemini wire shape: `{"text": ...}` or
/// `{"inline_data": {"mime_type": ..., "data": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Plain text fragment.
    Text {
        /// The text.
        text: String,
    },
    /// Inline binary fragment (images).
    InlineData {
        /// The payload.
        inline_data: InlineData,
    },
}

impl Part {
    /// Build a text fragment.
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// Build an inline-data fragment.
    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }

    /// Text content of this fragment, if it is a text fragment.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            Part::InlineData { .. } => None,
        }
    }
}

/// One attributed exchange unit. `parts` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Author of the turn.
    pub role: Role,
    /// Ordered content fragments.
    pub parts: Vec<Part>,
}

impl Turn {
    /// Create a turn, substituting [`FALLBACK_GREETING`] when `parts` is empty.
    pub fn new(role: Role, mut parts: Vec<Part>) -> Self {
        if parts.is_empty() {
            parts.push(Part::text(FALLBACK_GREETING));
        }
        Self { role, parts }
    }

    /// User turn from a list of parts.
    pub fn user(parts: Vec<Part>) -> Self {
        Self::new(Role::User, parts)
    }

    /// Model turn holding a single text fragment.
    pub fn model_text(text: impl Into<String>) -> Self {
        Self::new(Role::Model, vec![Part::text(text)])
    }
}

// ============= Error Types =============

/// Failures surfaced by the chat pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Transport or protocol failure talking to the model provider.
    #[error("LLM error: {0}")]
    LLM(String),

    /// The provider answered with a non-success HTTP status.
    #[error("{status} {message}")]
    Upstream {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Provider error message, or the raw body when it was not JSON.
        message: String,
    },

    /// The model call did not finish in time.
    #[error("LLM request timed out after {0:?}")]
    Timeout(Duration),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    /// Whether this failure signals quota exhaustion or rate limiting.
    ///
    /// A structured 429 status wins; otherwise provider failures are
    /// searched for `429` or `quota` (any case), which is what untyped
    /// provider errors carry. Local failures never count.
    pub fn is_quota(&self) -> bool {
        let text = match self {
            AppError::Upstream { status: 429, .. } => return true,
            AppError::Upstream { .. } | AppError::LLM(_) => self.to_string(),
            AppError::Timeout(_) | AppError::Configuration(_) => return false,
        };
        text.contains("429") || text.to_lowercase().contains("quota")
    }
}

/// Prefix of the reply sent when a request fails for a non-quota reason.
pub const TECHNICAL_ERROR_PREFIX: &str = "Eroare tehnică: ";

// Application failures never leave as non-200 responses: the client only
// ever reads `reply`.
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!(error = %self, "chat request failed");

        let body = ChatResponse::new(format!("{}{}", TECHNICAL_ERROR_PREFIX, self));

        (axum::http::StatusCode::OK, axum::Json(body)).into_response()
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AppError>;

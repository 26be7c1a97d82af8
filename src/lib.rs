//! # Andyx - chat relay server
//!
//! A small HTTP backend that forwards chat messages, optionally with an
//! image, to Google Gemini and returns the reply. The last few exchanges are
//! kept in process memory and replayed to the model so conversations feel
//! continuous.
//!
//! ## Overview
//!
//! The crate can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `andyx-server` binary
//! 2. **As a library** - Mount [`api::routes::create_router`] or drive
//!    [`ChatService`] directly with your own [`LLMClient`]
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use andyx::{ChatService, GeminiClient};
//! use std::{sync::Arc, time::Duration};
//!
//! let client = GeminiClient::new(api_key, base, "gemini-1.5-flash".into(), Duration::from_secs(60))?;
//! let chat = ChatService::new(Arc::new(client), Duration::from_secs(60));
//! let reply = chat.handle("hello", None).await?;
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST handler and router
//! - [`chat`] - Request orchestration and reply mapping
//! - [`llm`] - LLM client trait and the Gemini client
//! - [`memory`] - Bounded conversation history
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration and logging setup

#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Chat orchestration.
pub mod chat;
/// LLM provider clients and abstractions.
pub mod llm;
/// Conversation memory and context management.
pub mod memory;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration and logging utilities.
pub mod utils;

// Re-export commonly used types
pub use chat::ChatService;
pub use llm::{GeminiClient, LLMClient, LLMResponse};
pub use memory::ConversationHistory;
pub use types::{AppError, Result};
pub use utils::config::{Config, ConfigError};

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Runtime configuration
    pub config: Arc<Config>,
    /// Chat pipeline owning the shared history
    pub chat: Arc<ChatService>,
}

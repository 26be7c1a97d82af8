//! Conversation memory for the chat relay.
//!
//! History lives only in process memory and is shared by every caller. The
//! [`ConversationHistory`] type keeps it bounded and decides which turns are
//! replayed to the model on each request.

/// Bounded conversation history and context window assembly.
pub mod history;

pub use history::{ConversationHistory, CONTEXT_WINDOW, HISTORY_CAPACITY};

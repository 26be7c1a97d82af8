//! API request handlers.

/// Chat handler.
pub mod chat;

//! LLM Provider Clients and Abstractions
//!
//! - [`LLMClient`] - The trait the chat pipeline calls
//! - [`GeminiClient`] - Google Gemini `generateContent` over HTTPS
//!
//! # Example
//!
//! ```ignore
//! use andyx::llm::{GeminiClient, LLMClient};
//! use andyx::types::{Part, Turn};
//!
//! let client = GeminiClient::new(api_key, DEFAULT_API_BASE, "gemini-1.5-flash", timeout)?;
//! let response = client
//!     .generate_content(&[Turn::user(vec![Part::text("What is 2+2?")])])
//!     .await?;
//! println!("{}", response.content);
//! ```

/// Core LLM client trait and response type.
pub mod client;
/// Google Gemini REST client.
pub mod gemini;

pub use client::{LLMClient, LLMResponse};
pub use gemini::{GeminiClient, DEFAULT_API_BASE, DEFAULT_MODEL};

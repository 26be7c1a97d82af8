//! HTTP API Handlers and Routes
//!
//! Built on the Axum web framework.
//!
//! # API Endpoints
//!
//! - `POST /chat` - Send a message (and optionally an image), receive `{"reply": ...}`
//!
//! Every application-level outcome, including failures, is returned as
//! HTTP 200 with a `reply` field. CORS is fully open.

/// Request handlers.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

//! Gemini client integration tests
//!
//! These tests use wiremock to stand in for the Gemini REST API and validate:
//! - Request wire format (path, API key header, turn encoding)
//! - Text extraction from candidates
//! - Empty and blocked generations
//! - Error and timeout mapping

use andyx::chat::{ChatService, QUOTA_REPLY};
use andyx::llm::{GeminiClient, LLMClient};
use andyx::types::{AppError, Part, Turn};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============= Helper Functions =============

const MODEL_PATH: &str = "/models/gemini-1.5-flash:generateContent";

fn client_for(server: &MockServer, timeout: Duration) -> GeminiClient {
    GeminiClient::new(
        "test-key".to_string(),
        server.uri(),
        "gemini-1.5-flash".to_string(),
        timeout,
    )
    .expect("client should build")
}

/// Create a mock Gemini generateContent response
fn mock_generate_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": { "promptTokenCount": 4, "candidatesTokenCount": 3, "totalTokenCount": 7 }
    })
}

fn mock_error_response(code: u16, message: &str, status: &str) -> serde_json::Value {
    json!({ "error": { "code": code, "message": message, "status": status } })
}

// ============= Tests =============

#[tokio::test]
async fn test_generate_sends_turns_in_wire_format() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_json(json!({
            "contents": [
                { "role": "user", "parts": [{ "text": "hello" }] },
                { "role": "model", "parts": [{ "text": "hi" }] },
                { "role": "user", "parts": [
                    { "text": "what is this?" },
                    { "inline_data": { "mime_type": "image/jpeg", "data": "QUJD" } }
                ]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_generate_response("A cat.")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    let contents = vec![
        Turn::user(vec![Part::text("hello")]),
        Turn::model_text("hi"),
        Turn::user(vec![Part::text("what is this?"), Part::inline("image/jpeg", "QUJD")]),
    ];

    let response = client.generate_content(&contents).await.unwrap();

    assert_eq!(response.content, "A cat.");
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
}

#[tokio::test]
async fn test_blocked_prompt_yields_empty_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    let response = client
        .generate_content(&[Turn::user(vec![Part::text("hello")])])
        .await
        .unwrap();

    assert!(response.content.is_empty());
}

#[tokio::test]
async fn test_rate_limit_maps_to_upstream_429() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(mock_error_response(
            429,
            "Resource has been exhausted (e.g. check quota).",
            "RESOURCE_EXHAUSTED",
        )))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    let err = client
        .generate_content(&[Turn::user(vec![Part::text("hello")])])
        .await
        .unwrap_err();

    match &err {
        AppError::Upstream { status, message } => {
            assert_eq!(*status, 429);
            assert_eq!(message, "Resource has been exhausted (e.g. check quota).");
        }
        other => panic!("Expected upstream error, got {other:?}"),
    }
    assert!(err.is_quota());
}

#[tokio::test]
async fn test_server_error_is_not_quota() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    let err = client
        .generate_content(&[Turn::user(vec![Part::text("hello")])])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Upstream { status: 500, ref message } if message == "upstream exploded"
    ));
    assert!(!err.is_quota());
}

#[tokio::test]
async fn test_invalid_json_is_llm_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    let err = client
        .generate_content(&[Turn::user(vec![Part::text("hello")])])
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::LLM(_)));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(mock_generate_response("too late"))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_millis(50));
    let err = client
        .generate_content(&[Turn::user(vec![Part::text("hello")])])
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Timeout(_)));
}

#[tokio::test]
async fn test_chat_service_over_gemini_quota() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(mock_error_response(
            429,
            "Quota exceeded for quota metric 'Generate Content API requests per minute'",
            "RESOURCE_EXHAUSTED",
        )))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    let chat = ChatService::new(Arc::new(client), Duration::from_secs(5));

    let reply = chat.handle("hello", None).await.unwrap();

    assert_eq!(reply, QUOTA_REPLY);
    assert!(chat.history().await.is_empty());
}

#[tokio::test]
async fn test_chat_service_over_gemini_conversation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_generate_response(" Bună! ")))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    let chat = ChatService::new(Arc::new(client), Duration::from_secs(5));

    assert_eq!(chat.handle("salut", None).await.unwrap(), "Bună!");
    assert_eq!(chat.handle("ce faci?", None).await.unwrap(), "Bună!");

    let requests = mock_server.received_requests().await.unwrap();
    let second: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(second["contents"].as_array().unwrap().len(), 3);
    assert_eq!(second["contents"][1], json!({ "role": "model", "parts": [{ "text": "Bună!" }] }));
}

//! Mock chat-completions server for testing
//!
//! This module provides a mock HTTP server that simulates an
//! OpenAI-compatible chat-completions endpoint. Each dialogue component
//! calls the endpoint with a distinct temperature and token limit, so
//! mocks can be mounted per call profile.

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock chat-completions server
pub struct LlmMockServer {
    pub server: MockServer,
}

impl LlmMockServer {
    /// Start a fresh mock server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to point the client's `api_url` at
    pub fn api_url(&self) -> String {
        self.server.uri()
    }

    /// Mount a reply for the intent-classification profile
    pub async fn mock_classification(&self, content: &str) {
        self.mock_profile(0.3, 2000, content).await;
    }

    /// Mount a reply for the attribute-extraction profile.
    ///
    /// Limited to `calls` responses so successive extractions can be
    /// staged with different payloads.
    pub async fn mock_extraction(&self, content: &str, calls: u64) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({"temperature": 0.2, "max_tokens": 150})))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
            .up_to_n_times(calls)
            .mount(&self.server)
            .await;
    }

    /// Mount a reply for the clarifying-question profile
    pub async fn mock_slot_question(&self, content: &str) {
        self.mock_profile(0.7, 100, content).await;
    }

    /// Mount a reply for the product-formatting profile
    pub async fn mock_formatting(&self, content: &str) {
        self.mock_profile(0.7, 300, content).await;
    }

    /// Mount a reply for the small-talk profile
    pub async fn mock_small_talk(&self, content: &str) {
        self.mock_profile(0.7, 200, content).await;
    }

    /// Mount a non-JSON body for every completion request
    pub async fn mock_garbage(&self) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
            .mount(&self.server)
            .await;
    }

    /// Mount a server failure for every completion request
    pub async fn mock_server_error(&self) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&self.server)
            .await;
    }

    async fn mock_profile(&self, temperature: f64, max_tokens: u32, content: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "temperature": temperature,
                "max_tokens": max_tokens,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
            .mount(&self.server)
            .await;
    }
}

/// A minimal well-formed chat-completions response body
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

//! OpenAI-compatible chat completion client
//!
//! This service wraps the chat completions endpoint used by intent
//! classification, attribute extraction and response formatting. An empty
//! API key puts the client in disabled mode so every caller falls back to
//! its deterministic path.

use std::time::Duration;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::OpenAiConfig;
use crate::models::ChatMessage;
use crate::utils::errors::{LlmError, LlmResult, Result, StyleBuddyError};
use crate::utils::logging::log_api_error;

/// Chat completion request body
#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
}

/// Chat completion response structure
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionMessage {
    pub content: Option<String>,
}

/// Chat completion client
#[derive(Debug, Clone)]
pub struct LlmClient {
    client: Client,
    config: OpenAiConfig,
}

impl LlmClient {
    /// Create a new LlmClient instance
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("StyleBuddy/0.1")
            .build()
            .map_err(StyleBuddyError::Http)?;

        Ok(Self { client, config })
    }

    /// Whether an API key is configured
    pub fn is_enabled(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    /// Run one chat completion and return the assistant text
    pub async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        temperature: f64,
        max_tokens: u32,
    ) -> LlmResult<String> {
        if !self.is_enabled() {
            return Err(LlmError::Disabled);
        }

        let url = format!("{}/chat/completions", self.config.api_url.trim_end_matches('/'));
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            temperature,
            max_tokens,
        };

        debug!(model = %self.config.model, message_count = messages.len(), "Requesting chat completion");

        let response = self.client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else if e.is_connect() {
                    LlmError::ServiceUnavailable
                } else {
                    LlmError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            log_api_error("chat_completions", &format!("HTTP {status}"), Some(&error_text));
            return Err(LlmError::RequestFailed(format!("HTTP {}: {}", status, error_text)));
        }

        let completion: ChatCompletionResponse = response.json().await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let content = completion.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .ok_or_else(|| LlmError::InvalidResponse("completion contained no content".to_string()))?;

        Ok(content.trim().to_string())
    }
}

/// Strip markdown code fences from a model reply before JSON parsing.
///
/// A ```json fence takes priority over a bare ``` fence; an unclosed fence
/// keeps everything after the opener.
pub fn strip_code_fences(text: &str) -> &str {
    let inner = if let Some((_, rest)) = text.split_once("```json") {
        match rest.find("```") {
            Some(end) => &rest[..end],
            None => rest,
        }
    } else if let Some((_, rest)) = text.split_once("```") {
        match rest.find("```") {
            Some(end) => &rest[..end],
            None => rest,
        }
    } else {
        text
    };
    inner.trim()
}

//! Small-talk handler
//!
//! Free conversation goes through the language model with a system prompt
//! that keeps the assistant anchored to shopping. Without a model the
//! handler answers with a fixed greeting.

use std::sync::Arc;

use crate::handlers::HandlerReply;
use crate::models::ChatMessage;
use crate::services::llm::LlmClient;
use crate::state::SessionContext;
use crate::utils::errors::LlmResult;
use crate::utils::logging::log_llm_fallback;

/// How many recent messages the small-talk completion sees
const SMALLTALK_CONTEXT_WINDOW: usize = 6;

const SHOPPING_ASSISTANT_PROMPT: &str =
    "You are a helpful e-commerce shopping assistant. Keep responses concise and friendly. \
     If the user asks about non-shopping topics, gently redirect them to shopping-related \
     topics. You can make small talk but always try to be helpful with their shopping needs.";

#[derive(Debug, Clone)]
pub struct SmalltalkHandler {
    llm: Arc<LlmClient>,
}

impl SmalltalkHandler {
    pub fn new(llm: Arc<LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn handle(&self, context: &SessionContext) -> HandlerReply {
        if !self.llm.is_enabled() {
            return HandlerReply::text(
                "friendly_chat",
                "Hello! I'm here to help you find products and manage your shopping. What can I do for you?",
            );
        }

        let response = match self.chat_with_llm(context).await {
            Ok(text) => text,
            Err(e) => {
                log_llm_fallback("friendly_chat", &e.to_string());
                "I'm here to help with your shopping! Feel free to ask about products or your cart.".to_string()
            }
        };

        HandlerReply::text("friendly_chat", response)
    }

    async fn chat_with_llm(&self, context: &SessionContext) -> LlmResult<String> {
        let mut messages = vec![ChatMessage::system(SHOPPING_ASSISTANT_PROMPT)];
        messages.extend_from_slice(context.recent_messages(SMALLTALK_CONTEXT_WINDOW));
        self.llm.chat_completion(&messages, 0.7, 200).await
    }
}

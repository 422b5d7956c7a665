//! Intent classification service
//!
//! Classifies each user message into one of the six dialogue intents,
//! preferring the language model and falling back to keyword rules when
//! the model is unavailable or returns something unusable.

use std::sync::Arc;

use tracing::warn;

use crate::models::{ChatMessage, Intent, IntentResult};
use crate::services::llm::{strip_code_fences, LlmClient};
use crate::utils::errors::{LlmError, LlmResult};
use crate::utils::helpers::contains_numeric_token;
use crate::utils::logging::log_llm_fallback;

/// How many recent messages the classification prompt includes
const CLASSIFICATION_CONTEXT_WINDOW: usize = 6;

#[derive(Debug, Clone)]
pub struct IntentClassifier {
    llm: Arc<LlmClient>,
}

impl IntentClassifier {
    pub fn new(llm: Arc<LlmClient>) -> Self {
        Self { llm }
    }

    /// Classify a message, never failing: any model problem engages the
    /// deterministic keyword rules.
    pub async fn classify(&self, message: &str, history: &[ChatMessage]) -> IntentResult {
        if !self.llm.is_enabled() {
            return fallback_classify(message);
        }

        match self.classify_with_llm(message, history).await {
            Ok(result) => result,
            Err(e) => {
                log_llm_fallback("intent_classification", &e.to_string());
                fallback_classify(message)
            }
        }
    }

    async fn classify_with_llm(&self, message: &str, history: &[ChatMessage]) -> LlmResult<IntentResult> {
        let prompt = build_classification_prompt(message, history);
        let messages = vec![
            ChatMessage::system(
                "You are a precise intent classifier. Always respond with valid JSON only, no additional text.",
            ),
            ChatMessage::user(prompt),
        ];

        let reply = self.llm.chat_completion(&messages, 0.3, 2000).await?;
        parse_classification(&reply)
    }
}

/// Parse and validate a model classification reply.
///
/// Unknown intent labels are rejected so a hallucinated label can never
/// reach the dispatcher.
pub fn parse_classification(reply: &str) -> LlmResult<IntentResult> {
    let cleaned = strip_code_fences(reply);
    let result: IntentResult = serde_json::from_str(cleaned).map_err(|e| {
        warn!(reply = %cleaned, "Unparseable classification reply");
        LlmError::InvalidResponse(e.to_string())
    })?;
    Ok(result)
}

fn build_classification_prompt(message: &str, history: &[ChatMessage]) -> String {
    let window = history.len().saturating_sub(CLASSIFICATION_CONTEXT_WINDOW);
    let transcript = history[window..]
        .iter()
        .map(|msg| format!("{}: {}", msg.role.as_str(), msg.content))
        .collect::<Vec<_>>()
        .join("\n");

    let definitions = Intent::all()
        .iter()
        .map(|intent| format!("- {}: {}", intent.as_str(), intent.definition()))
        .collect::<Vec<_>>()
        .join("\n");

    let intent_list = Intent::all()
        .iter()
        .map(|intent| intent.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are an intent classifier for an e-commerce chatbot.\n\n\
         Based on the conversation history and the current user message, classify the intent.\n\n\
         Available intents:\n{definitions}\n\n\
         Conversation history:\n{transcript}\n\n\
         Current user message: {message}\n\n\
         Respond with a JSON object containing:\n\
         - \"intent\": one of [{intent_list}]\n\
         - \"confidence\": a number between 0 and 1\n\
         - \"entities\": extracted entities like product_ids, colors, styles, categories, etc.\n\n\
         Examples:\n\
         User: \"I want to buy a black shirt\"\n\
         Response: {{\"intent\": \"search_products\", \"confidence\": 0.9, \"entities\": {{\"color\": \"black\", \"category\": \"shirt\"}}}}\n\n\
         User: \"add product 123 to cart\"\n\
         Response: {{\"intent\": \"add_to_cart\", \"confidence\": 0.95, \"entities\": {{\"product_ids\": [123]}}}}\n\n\
         User: \"tell me more about product 456\"\n\
         Response: {{\"intent\": \"product_view\", \"confidence\": 0.9, \"entities\": {{\"product_ids\": [456]}}}}"
    )
}

/// Rule-based classification used whenever the model path is unavailable.
///
/// Cart wording is checked first so "add to cart" never reads as a search,
/// then product lookups, then search verbs. Anything else is small talk.
pub fn fallback_classify(message: &str) -> IntentResult {
    let lowered = message.to_lowercase();
    let has_any = |words: &[&str]| words.iter().any(|word| lowered.contains(word));

    if has_any(&["cart", "basket"]) {
        if has_any(&["add", "put"]) {
            IntentResult::new(Intent::AddToCart, 0.8)
        } else if has_any(&["remove", "delete"]) {
            IntentResult::new(Intent::RemoveFromCart, 0.8)
        } else {
            IntentResult::new(Intent::ViewCart, 0.8)
        }
    } else if has_any(&["product", "item"]) && contains_numeric_token(message) {
        IntentResult::new(Intent::ProductView, 0.8)
    } else if has_any(&["find", "search", "looking", "want", "need", "show"]) {
        IntentResult::new(Intent::SearchProducts, 0.8)
    } else {
        IntentResult::new(Intent::FriendlyChat, 0.7)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_fallback_cart_rules() {
        assert_eq!(fallback_classify("add this to my cart").intent, Intent::AddToCart);
        assert_eq!(fallback_classify("put it in the basket").intent, Intent::AddToCart);
        assert_eq!(fallback_classify("remove that from my cart").intent, Intent::RemoveFromCart);
        assert_eq!(fallback_classify("delete item from basket").intent, Intent::RemoveFromCart);
        assert_eq!(fallback_classify("what's in my cart?").intent, Intent::ViewCart);
    }

    #[test]
    fn test_fallback_cart_wins_over_search_verbs() {
        // "show" is a search verb, but cart wording takes precedence
        let result = fallback_classify("show my cart");
        assert_eq!(result.intent, Intent::ViewCart);
        assert_eq!(result.confidence, 0.8);
    }

    #[test]
    fn test_fallback_product_view_needs_a_number() {
        assert_eq!(fallback_classify("tell me about product 42").intent, Intent::ProductView);
        assert_eq!(fallback_classify("details on item 7 please").intent, Intent::ProductView);
        // Without a number this reads as a search ("product" is not enough)
        assert_eq!(fallback_classify("I want that product").intent, Intent::SearchProducts);
    }

    #[test]
    fn test_fallback_search_verbs() {
        for message in [
            "find me a jacket",
            "search for dresses",
            "I'm looking for shoes",
            "I want a shirt",
            "need new jeans",
            "show me sneakers",
        ] {
            assert_eq!(fallback_classify(message).intent, Intent::SearchProducts, "{message}");
        }
    }

    #[test]
    fn test_fallback_small_talk_has_lower_confidence() {
        let result = fallback_classify("hello there");
        assert_eq!(result.intent, Intent::FriendlyChat);
        assert_eq!(result.confidence, 0.7);
    }

    #[test]
    fn test_parse_classification_plain_json() {
        let result = parse_classification(
            r#"{"intent": "search_products", "confidence": 0.9, "entities": {"color": "black"}}"#,
        )
        .unwrap();
        assert_eq!(result.intent, Intent::SearchProducts);
        assert_eq!(result.confidence, 0.9);
        assert_eq!(result.entities["color"], "black");
    }

    #[test]
    fn test_parse_classification_fenced_json() {
        let reply = "```json\n{\"intent\": \"view_cart\", \"confidence\": 0.8}\n```";
        let result = parse_classification(reply).unwrap();
        assert_eq!(result.intent, Intent::ViewCart);
        assert!(result.entities.is_null());
    }

    #[test]
    fn test_parse_classification_rejects_unknown_intent() {
        let reply = r#"{"intent": "checkout", "confidence": 0.9}"#;
        assert_matches!(parse_classification(reply), Err(LlmError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_classification_rejects_prose() {
        assert!(parse_classification("The user wants to buy a shirt.").is_err());
    }
}

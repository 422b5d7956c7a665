//! Product attribute extraction service
//!
//! Pulls category, style, color and price hints out of a message for the
//! slot-filling engine. The model path is constrained to the catalog
//! vocabulary; the fallback scans that vocabulary directly.

use std::sync::Arc;

use regex::Regex;

use crate::models::{ChatMessage, ExtractedAttributes, PriceRange};
use crate::services::llm::{strip_code_fences, LlmClient};
use crate::services::vocabulary;
use crate::utils::errors::{LlmError, LlmResult};
use crate::utils::logging::log_llm_fallback;

#[derive(Debug, Clone)]
pub struct AttributeExtractor {
    llm: Arc<LlmClient>,
}

impl AttributeExtractor {
    pub fn new(llm: Arc<LlmClient>) -> Self {
        Self { llm }
    }

    /// Extract attributes from a message, never failing: model problems
    /// engage the vocabulary scan.
    pub async fn extract(&self, message: &str) -> ExtractedAttributes {
        if !self.llm.is_enabled() {
            return fallback_extract(message);
        }

        match self.extract_with_llm(message).await {
            Ok(attributes) => attributes,
            Err(e) => {
                log_llm_fallback("attribute_extraction", &e.to_string());
                fallback_extract(message)
            }
        }
    }

    async fn extract_with_llm(&self, message: &str) -> LlmResult<ExtractedAttributes> {
        let prompt = format!(
            "Extract product attributes from the user message.\n\n\
             Categories: {}\n\
             Styles: {}\n\
             Colors: {}\n\n\
             User message: {}\n\n\
             Return a JSON object with any found attributes:\n\
             {{\"category\": \"...\", \"style\": \"...\", \"color\": \"...\", \"price_range\": {{\"min\": ..., \"max\": ...}}}}\n\n\
             Only include attributes that are explicitly mentioned.",
            vocabulary::all_category_keywords().join(", "),
            vocabulary::STYLES.join(", "),
            vocabulary::COLORS.join(", "),
            message,
        );

        let messages = vec![
            ChatMessage::system("You are a product attribute extractor. Return only valid JSON."),
            ChatMessage::user(prompt),
        ];

        let reply = self.llm.chat_completion(&messages, 0.2, 150).await?;
        let cleaned = strip_code_fences(&reply);
        serde_json::from_str(cleaned).map_err(|e| LlmError::InvalidResponse(e.to_string()))
    }
}

/// Vocabulary-scan extraction used whenever the model path is unavailable
pub fn fallback_extract(message: &str) -> ExtractedAttributes {
    let lowered = message.to_lowercase();

    ExtractedAttributes {
        category: vocabulary::match_category(&lowered).map(str::to_string),
        style: vocabulary::match_style(&lowered).map(str::to_string),
        color: vocabulary::match_color(&lowered).map(str::to_string),
        price_range: parse_price_hint(&lowered),
    }
}

/// Read a price hint from free text.
///
/// The first number found becomes a band of plus or minus 20 percent
/// around it. A "k" suffix multiplies by 1000 only when it directly
/// follows the digits, so "200k" is 200000 but "200 kinds" stays 200.
pub fn parse_price_hint(text: &str) -> Option<PriceRange> {
    let pattern = Regex::new(r"(\d+)(k)?").ok()?;
    let captures = pattern.captures(text)?;

    let mut value: f64 = captures.get(1)?.as_str().parse().ok()?;
    if captures.get(2).is_some() {
        value *= 1000.0;
    }

    Some(PriceRange {
        min: value * 0.8,
        max: value * 1.2,
    })
}

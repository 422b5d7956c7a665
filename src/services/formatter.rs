//! Response formatting service
//!
//! Renders product lists, cart contents and slot-filling questions. The
//! model path rewrites results conversationally; the fallback templates
//! are fixed and always available.

use std::sync::Arc;

use serde_json::json;
use tracing::warn;

use crate::models::{CartLine, ChatMessage, ProductSnapshot, SlotState};
use crate::services::llm::LlmClient;
use crate::utils::errors::LlmResult;
use crate::utils::helpers::format_price;
use crate::utils::logging::log_llm_fallback;

/// How many recent messages the formatting prompt includes
const FORMATTER_CONTEXT_WINDOW: usize = 4;

#[derive(Debug, Clone)]
pub struct ResponseFormatter {
    llm: Arc<LlmClient>,
    max_products_shown: usize,
}

impl ResponseFormatter {
    pub fn new(llm: Arc<LlmClient>, max_products_shown: usize) -> Self {
        Self { llm, max_products_shown }
    }

    /// Render search results, conversationally when the model is available
    pub async fn format_product_results(
        &self,
        products: &[ProductSnapshot],
        history: &[ChatMessage],
    ) -> String {
        if !self.llm.is_enabled() {
            return simple_format_products(products, self.max_products_shown);
        }

        match self.format_with_llm(products, history).await {
            Ok(text) => text,
            Err(e) => {
                log_llm_fallback("result_formatting", &e.to_string());
                simple_format_products(products, self.max_products_shown)
            }
        }
    }

    async fn format_with_llm(
        &self,
        products: &[ProductSnapshot],
        history: &[ChatMessage],
    ) -> LlmResult<String> {
        let window = history.len().saturating_sub(FORMATTER_CONTEXT_WINDOW);
        let transcript = history[window..]
            .iter()
            .map(|msg| format!("{}: {}", msg.role.as_str(), msg.content))
            .collect::<Vec<_>>()
            .join("\n");

        let shown = &products[..products.len().min(self.max_products_shown)];
        let listing = serde_json::to_string_pretty(shown).unwrap_or_else(|e| {
            warn!(error = %e, "Could not serialize products for the formatting prompt");
            String::from("[]")
        });

        let prompt = format!(
            "Format these product search results conversationally based on the user's request.\n\n\
             Recent conversation:\n{transcript}\n\n\
             Products found:\n{listing}\n\n\
             Create a natural, helpful response that:\n\
             1. Acknowledges what the user was looking for\n\
             2. Presents the products in an easy-to-read format\n\
             3. Mentions key details like price, color, and style\n\
             4. Suggests next actions (view details, add to cart)\n\n\
             Keep it concise but informative."
        );

        self.llm.chat_completion(&[ChatMessage::user(prompt)], 0.7, 300).await
    }

    /// Produce a clarifying question for the missing slots
    pub async fn slot_question(&self, missing: &[&str], slots: &SlotState) -> String {
        if !self.llm.is_enabled() {
            return fallback_slot_question(missing);
        }

        match self.slot_question_with_llm(missing, slots).await {
            Ok(text) => text,
            Err(e) => {
                log_llm_fallback("slot_question", &e.to_string());
                fallback_slot_question(missing)
            }
        }
    }

    async fn slot_question_with_llm(&self, missing: &[&str], slots: &SlotState) -> LlmResult<String> {
        let current = json!({
            "category": slots.category,
            "style": slots.style,
            "color": slots.color,
        });

        let prompt = format!(
            "Generate a natural, friendly question to ask for missing product information.\n\n\
             Current information: {current}\n\
             Missing information: {missing:?}\n\n\
             Generate a conversational question that asks for the missing information naturally.\n\
             Examples:\n\
             - \"What type of product are you looking for?\"\n\
             - \"Do you have a preferred color or style in mind?\"\n\
             - \"What style would you prefer - casual, formal, or something else?\"\n\n\
             Keep it brief and natural."
        );

        self.llm.chat_completion(&[ChatMessage::user(prompt)], 0.7, 100).await
    }
}

/// Fixed product list rendering
pub fn simple_format_products(products: &[ProductSnapshot], limit: usize) -> String {
    if products.is_empty() {
        return "No products found matching your criteria.".to_string();
    }

    let mut response = format!("I found {} products for you:\n\n", products.len());
    for (i, product) in products.iter().take(limit).enumerate() {
        response.push_str(&format!("{}. {} (ID: {})\n", i + 1, product.name, product.id));
        response.push_str(&format!("   💰 Price: {}\n", format_price(product.price)));
        response.push_str(&format!("   🎨 Color: {} | Style: {}\n", product.color, product.style));
        response.push_str(&format!("   📦 Stock: {} available\n\n", product.stock));
    }

    response.push_str("Would you like to see more details or add any to your cart?");
    response
}

/// Fixed cart rendering with per-line and grand totals
pub fn format_cart_contents(lines: &[CartLine]) -> String {
    let mut response = format!("🛒 Your cart has {} item(s):\n\n", lines.len());
    let mut total = 0.0;

    for (i, line) in lines.iter().enumerate() {
        let line_total = line.line_total();
        total += line_total;
        response.push_str(&format!("{}. {} (ID: {})\n", i + 1, line.product.name, line.product.id));
        response.push_str(&format!(
            "   💰 {} x {} = {}\n",
            format_price(line.product.price),
            line.quantity,
            format_price(line_total)
        ));
        response.push_str(&format!("   🎨 {} | {}\n\n", line.product.color, line.product.style));
    }

    response.push_str(&format!("📊 Total: {}\n\n", format_price(total)));
    response.push_str("Would you like to checkout or continue shopping?");
    response
}

/// Fixed single-product detail rendering
pub fn format_product_details(product: &ProductSnapshot) -> String {
    let mut response = format!("📦 **{}** (ID: {})\n\n", product.name, product.id);
    response.push_str(&format!("📝 {}\n\n", product.description));
    response.push_str(&format!("💰 Price: {}\n", format_price(product.price)));
    response.push_str(&format!("🎨 Color: {}\n", product.color));
    response.push_str(&format!("👔 Style: {}\n", product.style));
    response.push_str(&format!("📊 Stock: {} available\n\n", product.stock));

    if product.in_stock() {
        response.push_str("Would you like to add this to your cart?");
    } else {
        response.push_str("⚠️ This product is currently out of stock.");
    }

    response
}

/// Fixed clarifying questions keyed on which slots are missing
pub fn fallback_slot_question(missing: &[&str]) -> String {
    let message = if missing.contains(&"category") {
        "What type of product are you looking for? (shirt, pants, shoes, etc.)"
    } else if missing.contains(&"style") && missing.contains(&"color") {
        "Do you have a preferred style or color in mind?"
    } else if missing.contains(&"style") {
        "What style would you prefer? (casual, formal, trendy, etc.)"
    } else if missing.contains(&"color") {
        "What color would you like?"
    } else {
        "Could you provide more details about what you're looking for?"
    };
    message.to_string()
}

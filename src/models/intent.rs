//! Intent classification models

use serde::{Deserialize, Serialize};

/// The closed set of intents the dialogue manager routes on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SearchProducts,
    AddToCart,
    ViewCart,
    ProductView,
    RemoveFromCart,
    FriendlyChat,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::SearchProducts => "search_products",
            Intent::AddToCart => "add_to_cart",
            Intent::ViewCart => "view_cart",
            Intent::ProductView => "product_view",
            Intent::RemoveFromCart => "remove_from_cart",
            Intent::FriendlyChat => "friendly_chat",
        }
    }

    /// Parse an intent label, rejecting anything outside the closed set
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "search_products" => Some(Intent::SearchProducts),
            "add_to_cart" => Some(Intent::AddToCart),
            "view_cart" => Some(Intent::ViewCart),
            "product_view" => Some(Intent::ProductView),
            "remove_from_cart" => Some(Intent::RemoveFromCart),
            "friendly_chat" => Some(Intent::FriendlyChat),
            _ => None,
        }
    }

    /// One-line definitions used in the classification prompt
    pub fn definition(&self) -> &'static str {
        match self {
            Intent::SearchProducts => "User wants to search for or find products",
            Intent::AddToCart => "User wants to add a product to their shopping cart",
            Intent::ViewCart => "User wants to see what's in their shopping cart",
            Intent::ProductView => "User wants detailed information about a specific product",
            Intent::RemoveFromCart => "User wants to remove a product from their cart",
            Intent::FriendlyChat => "User is making general conversation or small talk",
        }
    }

    pub fn all() -> [Intent; 6] {
        [
            Intent::SearchProducts,
            Intent::AddToCart,
            Intent::ViewCart,
            Intent::ProductView,
            Intent::RemoveFromCart,
            Intent::FriendlyChat,
        ]
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of classifying a single message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    pub intent: Intent,
    pub confidence: f64,
    #[serde(default)]
    pub entities: serde_json::Value,
}

impl IntentResult {
    pub fn new(intent: Intent, confidence: f64) -> Self {
        Self {
            intent,
            confidence,
            entities: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

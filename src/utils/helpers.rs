//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use uuid::Uuid;

/// Lower bound for product ids accepted from free text
pub const MIN_PRODUCT_ID: i64 = 1;

/// Upper bound for product ids accepted from free text
pub const MAX_PRODUCT_ID: i64 = 9999;

/// Generate a short opaque session identifier
pub fn generate_session_id() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}

/// Format a price with two decimal places
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Extract candidate product ids from free text.
///
/// Numbers outside [MIN_PRODUCT_ID, MAX_PRODUCT_ID] are discarded so that
/// prices, years and phone numbers are not mistaken for product ids.
pub fn extract_product_ids(text: &str) -> Vec<i64> {
    let mut ids = Vec::new();
    for token in text.split(|c: char| !c.is_ascii_digit()) {
        if token.is_empty() || token.len() > 4 {
            continue;
        }
        if let Ok(id) = token.parse::<i64>() {
            if (MIN_PRODUCT_ID..=MAX_PRODUCT_ID).contains(&id) && !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    ids
}

/// Check whether the text contains any standalone numeric token
pub fn contains_numeric_token(text: &str) -> bool {
    text.split(|c: char| !c.is_ascii_digit())
        .any(|token| !token.is_empty())
}

//! Slot-filling state for product searches

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Numeric price bounds extracted from a message
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Attributes extracted from a single message.
///
/// Only fields the user explicitly mentioned are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedAttributes {
    pub category: Option<String>,
    pub style: Option<String>,
    pub color: Option<String>,
    pub price_range: Option<PriceRange>,
}

impl ExtractedAttributes {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.style.is_none()
            && self.color.is_none()
            && self.price_range.is_none()
    }
}

/// Partial product-search criteria accumulated across turns.
///
/// The state is complete once a category is known together with at least
/// one of style or color; it is cleared right after a search executes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotState {
    pub category: Option<String>,
    pub style: Option<String>,
    pub color: Option<String>,
    pub price_range: Option<PriceRange>,
    pub additional_attributes: HashMap<String, String>,
}

impl SlotState {
    /// Merge newly extracted attributes; set fields overwrite, unset
    /// fields never clear a previously filled slot.
    pub fn merge(&mut self, extracted: &ExtractedAttributes) {
        if let Some(category) = &extracted.category {
            self.category = Some(category.clone());
        }
        if let Some(style) = &extracted.style {
            self.style = Some(style.clone());
        }
        if let Some(color) = &extracted.color {
            self.color = Some(color.clone());
        }
        if let Some(price_range) = extracted.price_range {
            self.price_range = Some(price_range);
        }
    }

    /// Whether enough criteria exist to run a search
    pub fn is_complete(&self) -> bool {
        self.category.is_some() && (self.style.is_some() || self.color.is_some())
    }

    /// Which slots still need filling.
    ///
    /// Category is checked first and reported alone; once a category is
    /// known, style and color are reported missing together.
    pub fn missing_slots(&self) -> Vec<&'static str> {
        if self.category.is_none() {
            return vec!["category"];
        }
        if self.style.is_none() && self.color.is_none() {
            return vec!["style", "color"];
        }
        Vec::new()
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.style.is_none()
            && self.color.is_none()
            && self.price_range.is_none()
            && self.additional_attributes.is_empty()
    }

    pub fn clear(&mut self) {
        *self = SlotState::default();
    }
}

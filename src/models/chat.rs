//! Chat boundary models

use serde::{Deserialize, Serialize};

use super::product::ProductSnapshot;

/// Payload of a slot-filling action descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotFillingPrompt {
    pub slot: String,
    pub prompt: String,
}

/// An action descriptor with structured payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum DetailedAction {
    SlotFilling(SlotFillingPrompt),
}

/// One entry of `actions_performed`: either a bare action label or a
/// structured descriptor such as a slot-filling prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionPerformed {
    Named(String),
    Detailed(DetailedAction),
}

impl ActionPerformed {
    pub fn named(label: impl Into<String>) -> Self {
        ActionPerformed::Named(label.into())
    }

    pub fn slot_filling(slot: impl Into<String>, prompt: impl Into<String>) -> Self {
        ActionPerformed::Detailed(DetailedAction::SlotFilling(SlotFillingPrompt {
            slot: slot.into(),
            prompt: prompt.into(),
        }))
    }

    /// Short label for logging and `last_action` tracking
    pub fn label(&self) -> &str {
        match self {
            ActionPerformed::Named(label) => label,
            ActionPerformed::Detailed(DetailedAction::SlotFilling(_)) => "slot_filling",
        }
    }
}

/// The structured result returned to the boundary for every chat turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResult {
    pub response: String,
    pub products: Vec<ProductSnapshot>,
    pub actions_performed: Vec<ActionPerformed>,
    pub conversation_id: Option<i64>,
    pub intent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl ChatResult {
    /// Generic apology returned when a turn fails in an unhandled way
    pub fn apology() -> Self {
        Self {
            response: "I apologize, but I encountered an error. Please try again.".to_string(),
            products: Vec::new(),
            actions_performed: vec![ActionPerformed::named("error")],
            conversation_id: None,
            intent: "error".to_string(),
            session_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_action_serializes_as_bare_string() {
        let action = ActionPerformed::named("view_cart");
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json, serde_json::json!("view_cart"));
    }

    #[test]
    fn test_slot_filling_action_serializes_with_type_and_data() {
        let action = ActionPerformed::slot_filling("category", "What type of product?");
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "slot_filling",
                "data": {"slot": "category", "prompt": "What type of product?"}
            })
        );
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(ActionPerformed::named("search_products").label(), "search_products");
        assert_eq!(ActionPerformed::slot_filling("category", "?").label(), "slot_filling");
    }

    #[test]
    fn test_session_id_omitted_when_absent() {
        let result = ChatResult::apology();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("session_id").is_none());
        assert_eq!(json["intent"], "error");
    }
}

//! Session context management
//!
//! This module defines the per-user conversational state that spans
//! multiple chat turns: message history, slot-filling progress, the last
//! products shown and the last dispatched action.

use serde::Serialize;
use chrono::{DateTime, Utc};

use crate::models::{ChatMessage, Intent, ProductSnapshot, SlotState};

/// Per-user conversation state
#[derive(Debug, Clone, Serialize)]
pub struct SessionContext {
    /// User ID this context belongs to
    pub user_id: i64,
    /// Ordered message history, oldest first
    pub messages: Vec<ChatMessage>,
    /// Last classified intent
    pub current_intent: Option<Intent>,
    /// Partial search criteria being collected
    pub slot_state: SlotState,
    /// Products from the most recent search or view, for reference resolution
    pub last_products_shown: Vec<ProductSnapshot>,
    /// Label of the last dispatched action
    pub last_action: Option<String>,
    /// When this context was created
    pub created_at: DateTime<Utc>,
    /// When this context was last updated
    pub updated_at: DateTime<Utc>,
}

impl SessionContext {
    /// Create a fresh context for a user
    pub fn new(user_id: i64) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            messages: Vec::new(),
            current_intent: None,
            slot_state: SlotState::default(),
            last_products_shown: Vec::new(),
            last_action: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a user message
    pub fn push_user_message(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
        self.updated_at = Utc::now();
    }

    /// Append an assistant message
    pub fn push_assistant_message(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
        self.updated_at = Utc::now();
    }

    /// Prepend persisted history when the in-memory context is still new.
    ///
    /// Only contexts holding at most the current exchange accept history,
    /// so an established session is never polluted with duplicates.
    pub fn bootstrap_history(&mut self, history: Vec<ChatMessage>) {
        if self.messages.len() <= 2 && !history.is_empty() {
            let mut combined = history;
            combined.append(&mut self.messages);
            self.messages = combined;
            self.updated_at = Utc::now();
        }
    }

    /// The most recent `window` messages, oldest first
    pub fn recent_messages(&self, window: usize) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(window);
        &self.messages[start..]
    }

    /// Record the outcome of a dispatched turn
    pub fn record_outcome(&mut self, intent: Intent, action_label: &str, reply: &str) {
        self.current_intent = Some(intent);
        self.last_action = Some(action_label.to_string());
        self.push_assistant_message(reply);
    }

    /// Replace the reference-resolution product list
    pub fn show_products(&mut self, products: Vec<ProductSnapshot>) {
        self.last_products_shown = products;
        self.updated_at = Utc::now();
    }

    /// Create a summary of the context for logging
    pub fn summary(&self) -> ContextSummary {
        ContextSummary {
            user_id: self.user_id,
            message_count: self.messages.len(),
            current_intent: self.current_intent.map(|i| i.as_str()),
            slot_complete: self.slot_state.is_complete(),
            products_shown: self.last_products_shown.len(),
            last_action: self.last_action.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// Context summary for logging and debugging
#[derive(Debug, Clone, Serialize)]
pub struct ContextSummary {
    pub user_id: i64,
    pub message_count: usize,
    pub current_intent: Option<&'static str>,
    pub slot_complete: bool,
    pub products_shown: usize,
    pub last_action: Option<String>,
    pub updated_at: DateTime<Utc>,
}

//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod product;
pub mod cart;
pub mod conversation;
pub mod slots;
pub mod intent;
pub mod chat;

// Re-export commonly used models
pub use product::{ProductSnapshot, SearchFilters};
pub use cart::CartLine;
pub use conversation::{MessageRole, ChatMessage, ConversationTurn, CreateTurnRequest};
pub use slots::{SlotState, ExtractedAttributes, PriceRange};
pub use intent::{Intent, IntentResult};
pub use chat::{ChatResult, ActionPerformed, DetailedAction, SlotFillingPrompt};

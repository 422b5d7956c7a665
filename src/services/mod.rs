//! Services module
//!
//! This module contains the dialogue business logic: the language-model
//! client, intent classification, attribute extraction, reference
//! resolution, response formatting and the chat orchestration facade.

pub mod chat;
pub mod extraction;
pub mod formatter;
pub mod intent;
pub mod llm;
pub mod resolver;
pub mod vocabulary;

// Re-export commonly used services
pub use chat::ChatService;
pub use extraction::AttributeExtractor;
pub use formatter::ResponseFormatter;
pub use intent::IntentClassifier;
pub use llm::LlmClient;
pub use resolver::resolve_product_reference;

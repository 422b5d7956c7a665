//! StyleBuddy shopping assistant
//!
//! A conversational dialogue manager for an e-commerce catalog. This
//! library provides modular components for intent classification, slot
//! filling, reference resolution, cart and product handling, and
//! conversation persistence, with language-model assistance and
//! deterministic fallbacks throughout.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{StyleBuddyError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use models::ChatResult;
pub use services::ChatService;
pub use state::{SessionStore, SessionStoreManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}

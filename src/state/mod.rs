//! State management module
//!
//! This module handles conversation state and user context

pub mod context;
pub mod store;

// Re-export commonly used state components
pub use context::{SessionContext, ContextSummary};
pub use store::{SessionStore, SessionStoreManager, StoreStats};

//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod product;
pub mod cart;
pub mod conversation;

// Re-export repositories
pub use product::ProductRepository;
pub use cart::CartRepository;
pub use conversation::ConversationRepository;

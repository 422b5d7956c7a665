//! Database service layer
//!
//! This module provides a high-level interface to database operations

use std::sync::Arc;

use crate::database::{DatabasePool, ProductRepository, CartRepository, ConversationRepository};
use crate::database::traits::{CartStore, ConversationLog, ProductStore};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub products: ProductRepository,
    pub carts: CartRepository,
    pub conversations: ConversationRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            products: ProductRepository::new(pool.clone()),
            carts: CartRepository::new(pool.clone()),
            conversations: ConversationRepository::new(pool),
        }
    }

    /// Catalog access as a shareable trait object
    pub fn product_store(&self) -> Arc<dyn ProductStore> {
        Arc::new(self.products.clone())
    }

    /// Cart access as a shareable trait object
    pub fn cart_store(&self) -> Arc<dyn CartStore> {
        Arc::new(self.carts.clone())
    }

    /// Conversation history access as a shareable trait object
    pub fn conversation_log(&self) -> Arc<dyn ConversationLog> {
        Arc::new(self.conversations.clone())
    }
}

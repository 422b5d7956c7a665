//! Collaborator interfaces consumed by the dialogue core
//!
//! The dialogue manager talks to the product catalog, the cart and the
//! conversation log only through these traits, so tests can swap the
//! SQL-backed repositories for in-memory implementations.

use async_trait::async_trait;

use crate::models::{CartLine, ConversationTurn, CreateTurnRequest, ProductSnapshot, SearchFilters};
use crate::utils::errors::Result;

/// Read-only product query surface
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Search in-stock products matching the filters, newest first
    async fn search_products(&self, filters: &SearchFilters, limit: i64) -> Result<Vec<ProductSnapshot>>;

    /// Fetch a single product by id
    async fn get_product(&self, product_id: i64) -> Result<Option<ProductSnapshot>>;
}

/// Cart read/write surface
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Id of the user's cart, creating one on first use
    async fn get_or_create_cart(&self, user_id: i64) -> Result<i64>;

    /// Id of the user's cart if one exists
    async fn find_cart(&self, user_id: i64) -> Result<Option<i64>>;

    /// Add `delta_quantity` to a cart line, inserting it when absent
    async fn upsert_cart_line(&self, cart_id: i64, product_id: i64, delta_quantity: i32) -> Result<()>;

    /// Delete a cart line; returns whether one was deleted
    async fn delete_cart_line(&self, cart_id: i64, product_id: i64) -> Result<bool>;

    /// All lines of a cart joined with their product details
    async fn list_cart_lines(&self, cart_id: i64) -> Result<Vec<CartLine>>;
}

/// Append-only conversation log
#[async_trait]
pub trait ConversationLog: Send + Sync {
    /// Persist one turn and return its row id
    async fn append_turn(&self, request: CreateTurnRequest) -> Result<i64>;

    /// Load up to `limit` turns for a user, most recent first
    async fn load_recent_turns(&self, user_id: i64, limit: i64) -> Result<Vec<ConversationTurn>>;
}

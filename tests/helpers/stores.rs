//! In-memory store fakes for dialogue tests
//!
//! These implement the database traits over plain vectors so the full
//! chat pipeline can run without a live Postgres instance. Matching
//! semantics mirror the SQL repositories: conjunctive filters,
//! case-insensitive substring matching for text and newest-first result
//! order.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use StyleBuddy::database::traits::{CartStore, ConversationLog, ProductStore};
use StyleBuddy::models::{
    CartLine, ConversationTurn, CreateTurnRequest, ProductSnapshot, SearchFilters,
};
use StyleBuddy::utils::errors::Result;

/// Helper function to create a catalog product
pub fn test_product(
    id: i64,
    name: &str,
    price: f64,
    stock: i32,
    color: &str,
    style: &str,
    category_id: i32,
) -> ProductSnapshot {
    ProductSnapshot {
        id,
        name: name.to_string(),
        description: format!("{} test article", name),
        price,
        stock,
        color: color.to_string(),
        style: style.to_string(),
        category_id,
    }
}

/// A small catalog covering several categories, colors and styles.
///
/// Category ids follow the shared vocabulary: 1 tops, 2 bottoms,
/// 3 dresses, 4 outerwear, 5 shoes, 6 accessories.
pub fn seed_products() -> Vec<ProductSnapshot> {
    vec![
        test_product(1, "Classic White Button-Down Shirt", 250_000.0, 40, "white", "formal", 1),
        test_product(2, "Relaxed Fit Black Tee", 120_000.0, 80, "black", "casual", 1),
        test_product(3, "Midnight Dress Shirt", 380_000.0, 12, "black", "elegant", 1),
        test_product(4, "High-Waist Denim Jeans", 380_000.0, 25, "blue", "casual", 2),
        test_product(5, "Low-Top Canvas Sneakers", 300_000.0, 0, "white", "casual", 5),
        test_product(6, "Leather Ankle Boots", 780_000.0, 12, "brown", "classic", 5),
    ]
}

/// Fixed product catalog
pub struct InMemoryCatalog {
    products: Vec<ProductSnapshot>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<ProductSnapshot>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductStore for InMemoryCatalog {
    async fn search_products(
        &self,
        filters: &SearchFilters,
        limit: i64,
    ) -> Result<Vec<ProductSnapshot>> {
        let mut matches: Vec<ProductSnapshot> = self
            .products
            .iter()
            .filter(|product| filters.category_id.map_or(true, |id| product.category_id == id))
            .filter(|product| {
                filters.color.as_ref().map_or(true, |color| {
                    product.color.to_lowercase().contains(&color.to_lowercase())
                })
            })
            .filter(|product| {
                filters.style.as_ref().map_or(true, |style| {
                    product.style.to_lowercase().contains(&style.to_lowercase())
                })
            })
            .filter(|product| filters.min_price.map_or(true, |min| product.price >= min))
            .filter(|product| filters.max_price.map_or(true, |max| product.price <= max))
            .cloned()
            .collect();

        // The repositories order by creation time descending, which for
        // ascending seed ids means highest id first
        matches.reverse();
        matches.truncate(limit as usize);
        Ok(matches)
    }

    async fn get_product(&self, product_id: i64) -> Result<Option<ProductSnapshot>> {
        Ok(self.products.iter().find(|product| product.id == product_id).cloned())
    }
}

#[derive(Default)]
struct CartState {
    carts: Vec<(i64, i64)>,
    lines: Vec<(i64, i64, i32)>,
    next_cart_id: i64,
}

/// Per-user carts with quantity-tracking lines
pub struct InMemoryCart {
    products: Vec<ProductSnapshot>,
    state: Mutex<CartState>,
}

impl InMemoryCart {
    pub fn new(products: Vec<ProductSnapshot>) -> Self {
        Self {
            products,
            state: Mutex::new(CartState::default()),
        }
    }

    /// The (product id, quantity) pairs currently in a cart
    pub fn cart_contents(&self, cart_id: i64) -> Vec<(i64, i32)> {
        let state = self.state.lock().unwrap();
        state
            .lines
            .iter()
            .filter(|(cart, _, _)| *cart == cart_id)
            .map(|&(_, product_id, quantity)| (product_id, quantity))
            .collect()
    }
}

#[async_trait]
impl CartStore for InMemoryCart {
    async fn get_or_create_cart(&self, user_id: i64) -> Result<i64> {
        let mut state = self.state.lock().unwrap();
        if let Some(&(cart_id, _)) = state.carts.iter().find(|(_, owner)| *owner == user_id) {
            return Ok(cart_id);
        }
        state.next_cart_id += 1;
        let cart_id = state.next_cart_id;
        state.carts.push((cart_id, user_id));
        Ok(cart_id)
    }

    async fn find_cart(&self, user_id: i64) -> Result<Option<i64>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .carts
            .iter()
            .find(|(_, owner)| *owner == user_id)
            .map(|&(cart_id, _)| cart_id))
    }

    async fn upsert_cart_line(
        &self,
        cart_id: i64,
        product_id: i64,
        delta_quantity: i32,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(line) = state
            .lines
            .iter_mut()
            .find(|(cart, product, _)| *cart == cart_id && *product == product_id)
        {
            line.2 += delta_quantity;
        } else {
            state.lines.push((cart_id, product_id, delta_quantity));
        }
        Ok(())
    }

    async fn delete_cart_line(&self, cart_id: i64, product_id: i64) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.lines.len();
        state
            .lines
            .retain(|(cart, product, _)| !(*cart == cart_id && *product == product_id));
        Ok(state.lines.len() < before)
    }

    async fn list_cart_lines(&self, cart_id: i64) -> Result<Vec<CartLine>> {
        let state = self.state.lock().unwrap();
        let lines = state
            .lines
            .iter()
            .filter(|(cart, _, _)| *cart == cart_id)
            .enumerate()
            .filter_map(|(index, &(_, product_id, quantity))| {
                self.products
                    .iter()
                    .find(|product| product.id == product_id)
                    .map(|product| CartLine {
                        cart_item_id: index as i64 + 1,
                        product: product.clone(),
                        quantity,
                    })
            })
            .collect();
        Ok(lines)
    }
}

/// Append-only conversation log kept in memory
#[derive(Default)]
pub struct InMemoryLog {
    rows: Mutex<Vec<ConversationTurn>>,
}

impl InMemoryLog {
    pub fn turn_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn last_turn(&self) -> Option<ConversationTurn> {
        self.rows.lock().unwrap().last().cloned()
    }

    pub fn turns_for(&self, user_id: i64) -> Vec<ConversationTurn> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ConversationLog for InMemoryLog {
    async fn append_turn(&self, request: CreateTurnRequest) -> Result<i64> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        rows.push(ConversationTurn {
            id,
            user_id: request.user_id,
            role: request.role.db_code(),
            content: request.content,
            intent: request.intent,
            session_id: request.session_id,
            metadata: request.metadata,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn load_recent_turns(&self, user_id: i64, limit: i64) -> Result<Vec<ConversationTurn>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|row| row.user_id == user_id)
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

//! Cart models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::product::ProductSnapshot;

/// A cart line joined with the product it refers to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CartLine {
    pub cart_item_id: i64,
    #[sqlx(flatten)]
    pub product: ProductSnapshot,
    pub quantity: i32,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.product.price * self.quantity as f64
    }
}

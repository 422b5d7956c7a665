//! Product model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Read-only projection of a product row.
///
/// Sourced from the product store and never mutated by the dialogue core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductSnapshot {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub color: String,
    pub style: String,
    pub category_id: i32,
}

impl ProductSnapshot {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Filters for a product search, assembled from filled slots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub category_id: Option<i32>,
    pub color: Option<String>,
    pub style: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.color.is_none()
            && self.style.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> ProductSnapshot {
        ProductSnapshot {
            id: 1,
            name: "Classic Oxford Shirt".to_string(),
            description: "A crisp button-down".to_string(),
            price: 49.99,
            stock: 3,
            color: "white".to_string(),
            style: "formal".to_string(),
            category_id: 1,
        }
    }

    #[test]
    fn test_in_stock() {
        let mut product = sample_product();
        assert!(product.in_stock());

        product.stock = 0;
        assert!(!product.in_stock());
    }

    #[test]
    fn test_empty_filters() {
        assert!(SearchFilters::default().is_empty());

        let filters = SearchFilters {
            category_id: Some(1),
            ..Default::default()
        };
        assert!(!filters.is_empty());
    }
}

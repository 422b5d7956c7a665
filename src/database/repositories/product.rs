//! Product repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::traits::ProductStore;
use crate::models::{ProductSnapshot, SearchFilters};
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    /// Search in-stock products; color and style match as case-insensitive
    /// substrings, results come newest first
    async fn search_products(&self, filters: &SearchFilters, limit: i64) -> Result<Vec<ProductSnapshot>> {
        let products = sqlx::query_as::<_, ProductSnapshot>(
            r#"
            SELECT id, name, description, price, stock, color, style, category_id
            FROM products
            WHERE stock > 0
              AND ($1::INTEGER IS NULL OR category_id = $1)
              AND ($2::TEXT IS NULL OR color ILIKE '%' || $2 || '%')
              AND ($3::TEXT IS NULL OR style ILIKE '%' || $3 || '%')
              AND ($4::DOUBLE PRECISION IS NULL OR price >= $4)
              AND ($5::DOUBLE PRECISION IS NULL OR price <= $5)
            ORDER BY id DESC
            LIMIT $6
            "#
        )
        .bind(filters.category_id)
        .bind(filters.color.as_deref())
        .bind(filters.style.as_deref())
        .bind(filters.min_price)
        .bind(filters.max_price)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn get_product(&self, product_id: i64) -> Result<Option<ProductSnapshot>> {
        let product = sqlx::query_as::<_, ProductSnapshot>(
            "SELECT id, name, description, price, stock, color, style, category_id FROM products WHERE id = $1"
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }
}

//! Cart repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::traits::CartStore;
use crate::models::CartLine;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: PgPool,
}

impl CartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartStore for CartRepository {
    async fn get_or_create_cart(&self, user_id: i64) -> Result<i64> {
        // The no-op update makes the statement return the id on conflict too
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO carts (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id
            "#
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    async fn find_cart(&self, user_id: i64) -> Result<Option<i64>> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM carts WHERE user_id = $1"
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id,)| id))
    }

    async fn upsert_cart_line(&self, cart_id: i64, product_id: i64, delta_quantity: i32) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO cart_items (cart_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
            "#
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(delta_quantity)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_cart_line(&self, cart_id: i64, product_id: i64) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2"
        )
        .bind(cart_id)
        .bind(product_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_cart_lines(&self, cart_id: i64) -> Result<Vec<CartLine>> {
        let lines = sqlx::query_as::<_, CartLine>(
            r#"
            SELECT ci.id AS cart_item_id, ci.quantity,
                   p.id, p.name, p.description, p.price, p.stock, p.color, p.style, p.category_id
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.cart_id = $1
            ORDER BY ci.id
            "#
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }
}

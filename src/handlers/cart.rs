//! Cart handlers for add, view and remove
//!
//! Adding accepts explicit product ids or a reference to the products
//! just shown. Removing deliberately accepts explicit ids only, so a
//! vague "remove the first one" never deletes the wrong line.

use std::sync::Arc;

use tracing::error;

use crate::database::traits::{CartStore, ProductStore};
use crate::handlers::HandlerReply;
use crate::models::CartLine;
use crate::services::formatter::format_cart_contents;
use crate::services::resolver::resolve_product_reference;
use crate::state::SessionContext;
use crate::utils::errors::Result;
use crate::utils::helpers::extract_product_ids;
use crate::utils::logging::log_cart_action;

#[derive(Clone)]
pub struct CartHandler {
    products: Arc<dyn ProductStore>,
    carts: Arc<dyn CartStore>,
}

impl std::fmt::Debug for CartHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartHandler").finish()
    }
}

impl CartHandler {
    pub fn new(products: Arc<dyn ProductStore>, carts: Arc<dyn CartStore>) -> Self {
        Self { products, carts }
    }

    /// Add explicitly named or referenced products to the user's cart
    pub async fn add(&self, message: &str, context: &mut SessionContext) -> HandlerReply {
        let mut product_ids = extract_product_ids(message);

        if product_ids.is_empty() && !context.last_products_shown.is_empty() {
            if let Some(product_id) = resolve_product_reference(message, &context.last_products_shown) {
                product_ids.push(product_id);
            }
        }

        if product_ids.is_empty() {
            return HandlerReply::text(
                "add_to_cart",
                "I'm not sure which product you want to add. Could you specify the product ID or describe it?",
            );
        }

        log_cart_action(context.user_id, "add", &product_ids);

        let response = match self.add_products(context.user_id, &product_ids).await {
            Ok(added) => {
                if added.is_empty() {
                    "❌ Could not add products to cart. They may be out of stock.".to_string()
                } else if added.len() == 1 {
                    format!("✅ Added {} to your cart!", added[0])
                } else {
                    format!("✅ Added {} items to your cart: {}", added.len(), added.join(", "))
                }
            }
            Err(e) => {
                error!(user_id = context.user_id, error = %e, "Add to cart failed");
                "Sorry, there was an error adding to your cart. Please try again.".to_string()
            }
        };

        HandlerReply::text("add_to_cart", response)
    }

    /// Names of the products that existed, had stock and were added
    async fn add_products(&self, user_id: i64, product_ids: &[i64]) -> Result<Vec<String>> {
        let cart_id = self.carts.get_or_create_cart(user_id).await?;

        let mut added = Vec::new();
        for &product_id in product_ids {
            match self.products.get_product(product_id).await? {
                Some(product) if product.in_stock() => {
                    self.carts.upsert_cart_line(cart_id, product_id, 1).await?;
                    added.push(product.name);
                }
                _ => {
                    // Unknown or out-of-stock ids are skipped, not fatal
                }
            }
        }

        Ok(added)
    }

    /// Show the cart contents without creating a cart
    pub async fn view(&self, context: &SessionContext) -> HandlerReply {
        match self.load_cart_lines(context.user_id).await {
            Ok(lines) if lines.is_empty() => HandlerReply::text(
                "view_cart",
                "Your cart is empty. Would you like to browse some products?",
            ),
            Ok(lines) => {
                let response = format_cart_contents(&lines);
                let products = lines.into_iter().map(|line| line.product).collect();
                HandlerReply::with_products("view_cart", response, products)
            }
            Err(e) => {
                error!(user_id = context.user_id, error = %e, "View cart failed");
                HandlerReply::text("view_cart", "Sorry, I couldn't retrieve your cart. Please try again.")
            }
        }
    }

    async fn load_cart_lines(&self, user_id: i64) -> Result<Vec<CartLine>> {
        match self.carts.find_cart(user_id).await? {
            Some(cart_id) => self.carts.list_cart_lines(cart_id).await,
            None => Ok(Vec::new()),
        }
    }

    /// Remove explicitly named products from the cart
    pub async fn remove(&self, message: &str, context: &SessionContext) -> HandlerReply {
        let product_ids = extract_product_ids(message);

        if product_ids.is_empty() {
            return HandlerReply::text(
                "remove_from_cart",
                "Please specify which product to remove (e.g., 'remove product 123').",
            );
        }

        log_cart_action(context.user_id, "remove", &product_ids);

        let response = match self.remove_products(context.user_id, &product_ids).await {
            Ok(None) => "You don't have a cart yet. Try adding some products first!".to_string(),
            Ok(Some((0, _))) => "❌ Could not find those items in your cart.".to_string(),
            Ok(Some((removed, remaining))) => {
                let mut response = format!("✅ Removed {} item(s) from your cart.\n\n", removed);
                if remaining > 0 {
                    response.push_str(&format!("You still have {} item(s) in your cart.", remaining));
                } else {
                    response.push_str("Your cart is now empty.");
                }
                response
            }
            Err(e) => {
                error!(user_id = context.user_id, error = %e, "Remove from cart failed");
                "Sorry, there was an error removing items. Please try again.".to_string()
            }
        };

        HandlerReply::text("remove_from_cart", response)
    }

    /// Removed and remaining line counts, or None when no cart exists
    async fn remove_products(&self, user_id: i64, product_ids: &[i64]) -> Result<Option<(usize, usize)>> {
        let cart_id = match self.carts.find_cart(user_id).await? {
            Some(cart_id) => cart_id,
            None => return Ok(None),
        };

        let mut removed = 0;
        for &product_id in product_ids {
            if self.carts.delete_cart_line(cart_id, product_id).await? {
                removed += 1;
            }
        }

        let remaining = self.carts.list_cart_lines(cart_id).await?.len();
        Ok(Some((removed, remaining)))
    }
}

//! Product detail handler

use std::sync::Arc;

use tracing::error;

use crate::database::traits::ProductStore;
use crate::handlers::HandlerReply;
use crate::services::formatter::format_product_details;
use crate::services::resolver::resolve_product_reference;
use crate::state::SessionContext;
use crate::utils::helpers::extract_product_ids;

#[derive(Clone)]
pub struct ProductViewHandler {
    products: Arc<dyn ProductStore>,
}

impl std::fmt::Debug for ProductViewHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductViewHandler").finish()
    }
}

impl ProductViewHandler {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    pub async fn handle(&self, message: &str, context: &SessionContext) -> HandlerReply {
        let mut product_ids = extract_product_ids(message);

        if product_ids.is_empty() {
            if let Some(product_id) = resolve_product_reference(message, &context.last_products_shown) {
                product_ids.push(product_id);
            }
        }

        let product_id = match product_ids.first() {
            Some(&product_id) => product_id,
            None => {
                return HandlerReply::text(
                    "product_view",
                    "Please specify which product you'd like to see details for (e.g., 'show product 123').",
                );
            }
        };

        match self.products.get_product(product_id).await {
            Ok(Some(product)) => {
                let response = format_product_details(&product);
                HandlerReply::with_products("product_view", response, vec![product])
            }
            Ok(None) => HandlerReply::text(
                "product_view",
                format!("I couldn't find product {}. Please check the product ID.", product_id),
            ),
            Err(e) => {
                error!(user_id = context.user_id, product_id = product_id, error = %e, "Product lookup failed");
                HandlerReply::text(
                    "product_view",
                    "Sorry, I couldn't retrieve product details. Please try again.",
                )
            }
        }
    }
}

//! Intent handlers module
//!
//! This module contains one handler per dialogue intent:
//! - Search handler with slot filling
//! - Cart handlers for add, view and remove
//! - Product detail handler
//! - Small-talk handler for everything else

pub mod search;
pub mod cart;
pub mod product;
pub mod smalltalk;

pub use search::SearchHandler;
pub use cart::CartHandler;
pub use product::ProductViewHandler;
pub use smalltalk::SmalltalkHandler;

use crate::models::{ActionPerformed, Intent, ProductSnapshot};
use crate::state::SessionContext;

/// What a handler produced for one turn.
///
/// Handlers never fail: internal errors become apologetic response text so
/// the dialogue always moves forward.
#[derive(Debug, Clone)]
pub struct HandlerReply {
    pub response: String,
    pub actions: Vec<ActionPerformed>,
    pub products: Vec<ProductSnapshot>,
}

impl HandlerReply {
    pub fn text(action: &str, response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            actions: vec![ActionPerformed::named(action)],
            products: Vec::new(),
        }
    }

    pub fn with_products(action: &str, response: impl Into<String>, products: Vec<ProductSnapshot>) -> Self {
        Self {
            response: response.into(),
            actions: vec![ActionPerformed::named(action)],
            products,
        }
    }

    pub fn slot_filling(slot: &str, prompt: String) -> Self {
        Self {
            response: prompt.clone(),
            actions: vec![ActionPerformed::slot_filling(slot, prompt)],
            products: Vec::new(),
        }
    }

    /// Label of the first recorded action, for `last_action` tracking
    pub fn primary_action_label(&self) -> &str {
        self.actions.first().map(|action| action.label()).unwrap_or("friendly_chat")
    }
}

/// Routes a classified message to its intent handler
#[derive(Debug, Clone)]
pub struct Dispatcher {
    pub search: SearchHandler,
    pub cart: CartHandler,
    pub product: ProductViewHandler,
    pub smalltalk: SmalltalkHandler,
}

impl Dispatcher {
    pub async fn dispatch(
        &self,
        intent: Intent,
        message: &str,
        context: &mut SessionContext,
    ) -> HandlerReply {
        match intent {
            Intent::SearchProducts => self.search.handle(message, context).await,
            Intent::AddToCart => self.cart.add(message, context).await,
            Intent::ViewCart => self.cart.view(context).await,
            Intent::ProductView => self.product.handle(message, context).await,
            Intent::RemoveFromCart => self.cart.remove(message, context).await,
            Intent::FriendlyChat => self.smalltalk.handle(context).await,
        }
    }
}

//! Product search handler with slot filling
//!
//! Each search turn merges freshly extracted attributes into the session's
//! slot state. Incomplete criteria produce a clarifying question; complete
//! criteria run the search, clear the slots and remember what was shown
//! for later reference resolution.

use std::sync::Arc;

use tracing::error;

use crate::database::traits::ProductStore;
use crate::handlers::HandlerReply;
use crate::models::{SearchFilters, SlotState};
use crate::services::extraction::AttributeExtractor;
use crate::services::formatter::ResponseFormatter;
use crate::services::vocabulary;
use crate::state::SessionContext;
use crate::utils::logging::log_slot_filling;

#[derive(Clone)]
pub struct SearchHandler {
    extractor: AttributeExtractor,
    formatter: ResponseFormatter,
    products: Arc<dyn ProductStore>,
    search_limit: i64,
}

impl std::fmt::Debug for SearchHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchHandler")
            .field("search_limit", &self.search_limit)
            .finish()
    }
}

impl SearchHandler {
    pub fn new(
        extractor: AttributeExtractor,
        formatter: ResponseFormatter,
        products: Arc<dyn ProductStore>,
        search_limit: i64,
    ) -> Self {
        Self { extractor, formatter, products, search_limit }
    }

    pub async fn handle(&self, message: &str, context: &mut SessionContext) -> HandlerReply {
        let extracted = self.extractor.extract(message).await;
        context.slot_state.merge(&extracted);

        let missing = context.slot_state.missing_slots();
        if let Some(&first_missing) = missing.first() {
            log_slot_filling(context.user_id, first_missing);
            let prompt = self.formatter.slot_question(&missing, &context.slot_state).await;
            return HandlerReply::slot_filling(first_missing, prompt);
        }

        let filters = build_filters(&context.slot_state);
        let results = match self.products.search_products(&filters, self.search_limit).await {
            Ok(results) => results,
            Err(e) => {
                error!(user_id = context.user_id, error = %e, "Product search failed");
                Vec::new()
            }
        };

        // Criteria are spent once a search runs; the result list replaces
        // whatever the user was previously shown, even when empty.
        context.slot_state.clear();
        context.show_products(results.clone());

        let response = if results.is_empty() {
            "I couldn't find any products matching your criteria. Would you like to try different specifications?".to_string()
        } else {
            self.formatter.format_product_results(&results, &context.messages).await
        };

        HandlerReply::with_products("search_products", response, results)
    }
}

/// Translate accumulated slots into search filters.
///
/// A category keyword outside the catalog vocabulary drops the category
/// filter rather than failing the search.
fn build_filters(slots: &SlotState) -> SearchFilters {
    SearchFilters {
        category_id: slots.category.as_deref().and_then(vocabulary::category_id_for),
        color: slots.color.clone(),
        style: slots.style.clone(),
        min_price: slots.price_range.map(|range| range.min),
        max_price: slots.price_range.map(|range| range.max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceRange;

    #[test]
    fn test_build_filters_maps_category_keyword() {
        let slots = SlotState {
            category: Some("shirt".to_string()),
            color: Some("black".to_string()),
            ..Default::default()
        };
        let filters = build_filters(&slots);
        assert_eq!(filters.category_id, Some(1));
        assert_eq!(filters.color.as_deref(), Some("black"));
        assert!(filters.style.is_none());
    }

    #[test]
    fn test_build_filters_drops_unknown_category() {
        let slots = SlotState {
            category: Some("spaceship".to_string()),
            style: Some("casual".to_string()),
            ..Default::default()
        };
        let filters = build_filters(&slots);
        assert!(filters.category_id.is_none());
        assert_eq!(filters.style.as_deref(), Some("casual"));
    }

    #[test]
    fn test_build_filters_spreads_price_range() {
        let slots = SlotState {
            category: Some("dress".to_string()),
            color: Some("red".to_string()),
            price_range: Some(PriceRange { min: 160000.0, max: 240000.0 }),
            ..Default::default()
        };
        let filters = build_filters(&slots);
        assert_eq!(filters.min_price, Some(160000.0));
        assert_eq!(filters.max_price, Some(240000.0));
    }
}

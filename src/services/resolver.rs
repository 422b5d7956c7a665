//! Reference resolution against recently shown products
//!
//! Turns phrases like "the first one" or "the black one" into a concrete
//! product id using the list the user was just shown.

use crate::models::ProductSnapshot;

/// Ordinal words mapped to zero-based list positions, checked in order
const ORDINALS: &[(&str, usize)] = &[
    ("first", 0),
    ("1st", 0),
    ("second", 1),
    ("2nd", 1),
    ("third", 2),
    ("3rd", 2),
    ("fourth", 3),
    ("4th", 3),
    ("fifth", 4),
    ("5th", 4),
];

/// Resolve a product reference from the message against the products the
/// user was last shown.
///
/// Ordinals are tried first and must point inside the list; after that the
/// shown products are scanned for a color or style named in the message.
pub fn resolve_product_reference(message: &str, last_shown: &[ProductSnapshot]) -> Option<i64> {
    if last_shown.is_empty() {
        return None;
    }

    let lowered = message.to_lowercase();

    for (word, index) in ORDINALS {
        if lowered.contains(word) && *index < last_shown.len() {
            return Some(last_shown[*index].id);
        }
    }

    for product in last_shown {
        if lowered.contains(&product.color.to_lowercase())
            || lowered.contains(&product.style.to_lowercase())
        {
            return Some(product.id);
        }
    }

    None
}

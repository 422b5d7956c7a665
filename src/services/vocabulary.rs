//! Catalog vocabulary shared by extraction, slot filling and search
//!
//! Category keywords, style names and color names form the closed
//! vocabulary the deterministic extractors match against and the LLM
//! prompts enumerate.

/// Category ids with the keywords that map to them, in ascending id order
pub const CATEGORY_KEYWORDS: &[(i32, &[&str])] = &[
    (1, &["shirt", "top", "blouse", "tee", "t-shirt", "polo", "tank"]),
    (2, &["pants", "trousers", "jeans", "bottoms", "shorts", "skirt"]),
    (3, &["dress", "gown", "evening wear", "sundress"]),
    (4, &["jacket", "coat", "blazer", "hoodie", "sweater", "cardigan", "outerwear"]),
    (5, &["shoes", "sneakers", "boots", "heels", "sandals", "footwear"]),
    (6, &["bag", "purse", "handbag", "backpack", "watch", "jewelry", "accessories"]),
];

pub const STYLES: &[&str] = &[
    "casual", "formal", "smart casual", "trendy", "classic", "elegant", "sport", "basic",
];

pub const COLORS: &[&str] = &[
    "black", "white", "blue", "red", "green", "gray", "brown", "pink", "yellow", "purple",
];

/// Scan a message for a category keyword.
///
/// Categories are checked in ascending id order and the first keyword hit
/// wins, so "dress shoes" resolves to the dress category rather than shoes.
pub fn match_category(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    for (_, keywords) in CATEGORY_KEYWORDS {
        for keyword in *keywords {
            if lowered.contains(keyword) {
                return Some(keyword);
            }
        }
    }
    None
}

/// Map a category keyword to its category id.
///
/// The lookup is an exact, case-insensitive membership test. Unknown
/// keywords yield None and the caller drops the category filter.
pub fn category_id_for(keyword: &str) -> Option<i32> {
    let lowered = keyword.to_lowercase();
    for (category_id, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|k| *k == lowered) {
            return Some(*category_id);
        }
    }
    None
}

/// Scan a message for a style name, first list entry wins
pub fn match_style(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    STYLES.iter().find(|style| lowered.contains(*style)).copied()
}

/// Scan a message for a color name, first list entry wins
pub fn match_color(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    COLORS.iter().find(|color| lowered.contains(*color)).copied()
}

/// All category keywords flattened, for prompt construction
pub fn all_category_keywords() -> Vec<&'static str> {
    CATEGORY_KEYWORDS
        .iter()
        .flat_map(|(_, keywords)| keywords.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_category_basic() {
        assert_eq!(match_category("I want a shirt"), Some("shirt"));
        assert_eq!(match_category("looking for SNEAKERS"), Some("sneakers"));
        assert_eq!(match_category("nothing relevant"), None);
    }

    #[test]
    fn test_match_category_ascending_order() {
        // "dress" (category 3) is found before "shoes" (category 5)
        assert_eq!(match_category("black dress shoes"), Some("dress"));
        // "top" (category 1) is found before "jeans" (category 2)
        assert_eq!(match_category("jeans and a top"), Some("top"));
    }

    #[test]
    fn test_category_id_lookup() {
        assert_eq!(category_id_for("polo"), Some(1));
        assert_eq!(category_id_for("Sundress"), Some(3));
        assert_eq!(category_id_for("watch"), Some(6));
        assert_eq!(category_id_for("spaceship"), None);
    }

    #[test]
    fn test_match_style_list_order() {
        assert_eq!(match_style("something formal please"), Some("formal"));
        // "smart casual" contains "casual", which appears earlier in the list
        assert_eq!(match_style("smart casual outfit"), Some("casual"));
        assert_eq!(match_style("no style words"), None);
    }

    #[test]
    fn test_match_color() {
        assert_eq!(match_color("a BLACK jacket"), Some("black"));
        assert_eq!(match_color("maybe grayish"), Some("gray"));
        assert_eq!(match_color("colorless"), None);
    }

    #[test]
    fn test_every_keyword_maps_back_to_its_category() {
        for (category_id, keywords) in CATEGORY_KEYWORDS {
            for keyword in *keywords {
                assert_eq!(category_id_for(keyword), Some(*category_id));
            }
        }
    }
}

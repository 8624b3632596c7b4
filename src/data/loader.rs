//! Resolve ingredients by name and filter the catalog for display.
//! Lookup is forgiving about case and separators; search is a substring match.

use crate::data::ingredient::{Ingredient, IngredientCatalog};

/// Normalize a string for lookup: lowercase, collapse spaces/underscores.
pub(crate) fn normalize_lookup(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || c == '_' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Resolve an ingredient by name or normalized key ("Blue Mountain Flower",
/// "blue_mountain_flower"). Returns None on no match.
pub fn resolve_ingredient<'a>(
    catalog: &'a IngredientCatalog,
    name_or_key: &str,
) -> Option<&'a Ingredient> {
    let normalized = normalize_lookup(name_or_key);
    catalog
        .ingredients
        .iter()
        .find(|ingredient| normalize_lookup(&ingredient.name) == normalized)
}

/// Case-insensitive substring filter over ingredient names, the search box
/// semantics. An empty query matches everything.
pub fn filter_ingredients<'a>(catalog: &'a IngredientCatalog, query: &str) -> Vec<&'a Ingredient> {
    let query = query.to_lowercase();
    catalog
        .ingredients
        .iter()
        .filter(|ingredient| ingredient.name.to_lowercase().contains(&query))
        .collect()
}

//! Catalog dataset validation: the invariants the evaluator assumes but does
//! not enforce. Violating entries still load; they just behave inertly.

use std::collections::HashSet;

use crate::data::ingredient::{load_catalog, IngredientCatalog};
use crate::data::loader::normalize_lookup;

/// Validate a loaded catalog. Returns every issue found, not just the first.
pub fn validate_catalog(catalog: &IngredientCatalog) -> Result<(), Vec<String>> {
    let mut issues = Vec::new();
    let mut seen_names: HashSet<String> = HashSet::new();

    for (index, ingredient) in catalog.ingredients.iter().enumerate() {
        let context = if ingredient.name.trim().is_empty() {
            format!("ingredient #{index}")
        } else {
            format!("'{}'", ingredient.name)
        };

        if ingredient.name.trim().is_empty() {
            issues.push(format!("{context}: empty name"));
        } else if !seen_names.insert(normalize_lookup(&ingredient.name)) {
            issues.push(format!("{context}: duplicate name"));
        }

        if !ingredient.value.is_finite() {
            issues.push(format!("{context}: value is not a finite number"));
        } else if ingredient.value < 0.0 {
            issues.push(format!("{context}: negative value {}", ingredient.value));
        }

        if ingredient.effects.is_empty() {
            issues.push(format!(
                "{context}: no effects, can never contribute to a potion"
            ));
        }

        let mut seen_effects: HashSet<String> = HashSet::new();
        for effect in &ingredient.effects {
            if !seen_effects.insert(effect.to_lowercase()) {
                issues.push(format!("{context}: duplicate effect '{effect}'"));
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Validate the catalog file at `path`. An unreadable file is itself an issue.
pub fn validate_catalog_file(path: &str) -> Result<(), Vec<String>> {
    match load_catalog(path) {
        Some(catalog) => validate_catalog(&catalog),
        None => Err(vec![format!("could not read catalog at '{path}'")]),
    }
}

#[cfg(test)]
mod tests {
    use super::validate_catalog;
    use crate::data::ingredient::{Ingredient, IngredientCatalog};

    fn catalog_of(ingredients: Vec<Ingredient>) -> IngredientCatalog {
        IngredientCatalog {
            ingredients,
            ..Default::default()
        }
    }

    #[test]
    fn clean_catalog_passes() {
        let catalog = catalog_of(vec![Ingredient {
            name: "Wheat".to_string(),
            value: 5.0,
            effects: vec!["Restore Health".to_string(), "Fortify Health".to_string()],
        }]);
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn reports_every_issue_found() {
        let catalog = catalog_of(vec![
            Ingredient {
                name: String::new(),
                value: -1.0,
                effects: Vec::new(),
            },
            Ingredient {
                name: "Garlic".to_string(),
                value: 1.0,
                effects: vec!["Resist Poison".to_string(), "resist poison".to_string()],
            },
            Ingredient {
                name: "garlic".to_string(),
                value: 1.0,
                effects: vec!["Fortify Stamina".to_string()],
            },
        ]);

        let issues = validate_catalog(&catalog).unwrap_err();
        assert!(issues.iter().any(|i| i.contains("empty name")));
        assert!(issues.iter().any(|i| i.contains("negative value")));
        assert!(issues.iter().any(|i| i.contains("no effects")));
        assert!(issues.iter().any(|i| i.contains("duplicate effect")));
        assert!(issues.iter().any(|i| i.contains("duplicate name")));
    }
}

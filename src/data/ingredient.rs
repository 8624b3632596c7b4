//! Ingredient catalog: canonical records loaded at runtime.
//! Written by the importer (`arcadia import`), read by the CLI and server.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CATALOG_PATH: &str = "data/ingredients/ingredients.canonical.json";

/// One catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique within the catalog; ingredient identity for selection.
    pub name: String,
    /// Base value in septims before any scaling.
    pub value: f64,
    /// Effect names in game order. First-encounter order over the selection
    /// determines display order of a potion's active effects.
    pub effects: Vec<String>,
}

/// Canonical catalog file (ARCADIA schema). Carries provenance alongside the
/// records so the UI can show "data as of".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientCatalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported_at: Option<String>,
    pub ingredients: Vec<Ingredient>,
}

/// Load the catalog. Returns None if the file is missing or unparsable.
pub fn load_catalog(path: impl AsRef<Path>) -> Option<IngredientCatalog> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

/// Load the catalog, degrading to an empty one on any failure. The calculator
/// stays usable over an empty set (every evaluation is "Unknown Potion").
pub fn load_catalog_or_empty(path: impl AsRef<Path>) -> IngredientCatalog {
    load_catalog(path).unwrap_or_default()
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::alchemy::{evaluate, AlchemyRank, PlayerParams, PotionKind, PotionResult, SelectionSet};
use crate::data::ingredient::{load_catalog_or_empty, DEFAULT_CATALOG_PATH};
use crate::data::loader::{filter_ingredients, resolve_ingredient};

#[derive(Debug, Clone, Deserialize)]
pub struct MixRequest {
    pub ingredients: Vec<String>,
    pub level: Option<u32>,
    pub perks: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MixResponse {
    pub status: &'static str,
    pub rank: &'static str,
    /// "1.23x"-style display string. Omitted on a failed potion, matching the
    /// calculator's behavior of not showing power on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplier_display: Option<String>,
    pub potion: PotionResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub errors: Vec<ValidationIssue>,
}

#[derive(Debug)]
pub enum MixError {
    Parse(serde_json::Error),
    Validation(ValidationErrorResponse),
}

impl fmt::Display for MixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Validation(_) => write!(f, "invalid mix request"),
        }
    }
}

impl std::error::Error for MixError {}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "arcadia-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Extract a query-string parameter, percent-decoded ('+' as space).
fn parse_query_param(path: &str, key: &str) -> Option<String> {
    let query = path.split('?').nth(1)?;
    for pair in query.split('&') {
        let mut parts = pair.splitn(2, '=');
        if parts.next() == Some(key) {
            return Some(percent_decode(parts.next().unwrap_or("")));
        }
    }
    None
}

fn percent_decode(raw: &str) -> String {
    let mut decoded: Vec<u8> = Vec::with_capacity(raw.len());
    let mut bytes = raw.bytes();
    while let Some(byte) = bytes.next() {
        match byte {
            b'+' => decoded.push(b' '),
            b'%' => {
                let parsed = bytes.next().zip(bytes.next()).and_then(|(hi, lo)| {
                    let hex = [hi, lo];
                    u8::from_str_radix(std::str::from_utf8(&hex).ok()?, 16).ok()
                });
                match parsed {
                    Some(value) => decoded.push(value),
                    None => decoded.push(b'%'),
                }
            }
            other => decoded.push(other),
        }
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

#[derive(Debug, Clone, Serialize)]
pub struct IngredientListItem {
    pub name: String,
    pub value: f64,
    pub effects: Vec<String>,
}

/// GET /api/ingredients[?q=...]: the catalog, filtered by the search query.
pub fn ingredients_payload(path: &str) -> Result<String, serde_json::Error> {
    let catalog = load_catalog_or_empty(DEFAULT_CATALOG_PATH);
    let query = parse_query_param(path, "q").unwrap_or_default();
    let list: Vec<IngredientListItem> = filter_ingredients(&catalog, &query)
        .into_iter()
        .map(|ingredient| IngredientListItem {
            name: ingredient.name.clone(),
            value: ingredient.value,
            effects: ingredient.effects.clone(),
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "ingredients": list }))
}

pub fn data_version_payload() -> Result<String, serde_json::Error> {
    let catalog = load_catalog_or_empty(DEFAULT_CATALOG_PATH);
    serde_json::to_string_pretty(&serde_json::json!({
        "data_version": catalog.data_version,
        "source_note": catalog.source_note,
        "imported_at": catalog.imported_at,
        "ingredient_count": catalog.ingredients.len()
    }))
}

/// GET /api/rank?level=N: proficiency label for the level badge.
pub fn rank_payload(path: &str) -> Result<String, serde_json::Error> {
    let requested = parse_query_param(path, "level")
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(PlayerParams::default().level);
    let level = PlayerParams::new(requested, 0).clamped().level;
    serde_json::to_string_pretty(&serde_json::json!({
        "level": level,
        "rank": AlchemyRank::for_level(level).as_str()
    }))
}

/// POST /api/mix: resolve ingredient names, build a selection, evaluate.
pub fn mix_payload(body: &str) -> Result<String, MixError> {
    let request: MixRequest = serde_json::from_str(body).map_err(MixError::Parse)?;

    let defaults = PlayerParams::default();
    let params = PlayerParams {
        level: request.level.unwrap_or(defaults.level),
        perks: request.perks.unwrap_or(defaults.perks),
    };

    let catalog = load_catalog_or_empty(DEFAULT_CATALOG_PATH);
    let mut selection = SelectionSet::new();
    let mut issues: Vec<String> = Vec::new();
    for name in &request.ingredients {
        match resolve_ingredient(&catalog, name) {
            Some(ingredient) => {
                if let Err(err) = selection.add(ingredient.clone()) {
                    issues.push(format!("'{name}': {err}"));
                }
            }
            None => issues.push(format!("unknown ingredient '{name}'")),
        }
    }
    if !issues.is_empty() {
        return Err(MixError::Validation(ValidationErrorResponse {
            status: "error",
            message: "Validation failed",
            errors: vec![ValidationIssue {
                field: "ingredients",
                messages: issues,
            }],
        }));
    }

    let potion = evaluate(&selection, params);
    let response = MixResponse {
        status: "ok",
        rank: AlchemyRank::for_level(params.clamped().level).as_str(),
        multiplier_display: (potion.kind != PotionKind::Failed)
            .then(|| potion.multiplier_display()),
        potion,
    };
    serde_json::to_string_pretty(&response).map_err(MixError::Parse)
}

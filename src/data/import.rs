//! Import raw ingredient dumps into the canonical catalog. Accepts the
//! calculator's original `data.json` array or a CSV export
//! (`name,value,effect;effect;...`).

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::ingredient::{Ingredient, IngredientCatalog};

/// Raw record shape shared by both source formats. Missing value/effects are
/// tolerated here; `arcadia validate` flags them afterwards.
#[derive(Debug, Clone, Deserialize)]
struct RawIngredient {
    name: String,
    #[serde(default)]
    value: f64,
    #[serde(default)]
    effects: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub source_path: String,
    pub output_path: String,
    pub record_count: usize,
    pub skipped_records: usize,
}

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Json(err) => write!(f, "invalid json: {err}"),
            Self::Csv(err) => write!(f, "invalid csv: {err}"),
        }
    }
}

impl std::error::Error for ImportError {}

/// Convert a raw dump at `source` into the canonical catalog at `output`.
/// Records with an empty name are skipped and counted, not fatal.
pub fn import_raw_catalog(source: &str, output: &str) -> Result<ImportReport, ImportError> {
    let raw_records = if source.to_lowercase().ends_with(".csv") {
        read_raw_csv(source)?
    } else {
        read_raw_json(source)?
    };

    let mut ingredients = Vec::new();
    let mut skipped_records = 0;
    for raw in raw_records {
        if raw.name.trim().is_empty() {
            skipped_records += 1;
            continue;
        }
        ingredients.push(Ingredient {
            name: raw.name.trim().to_string(),
            value: raw.value,
            effects: raw.effects,
        });
    }
    let record_count = ingredients.len();

    let now = chrono::Utc::now();
    let catalog = IngredientCatalog {
        data_version: Some(now.format("%Y%m%d").to_string()),
        source_note: Some(format!("imported from {source}")),
        imported_at: Some(now.to_rfc3339()),
        ingredients,
    };

    if let Some(parent) = Path::new(output).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(ImportError::Io)?;
        }
    }
    let payload = serde_json::to_string_pretty(&catalog).map_err(ImportError::Json)?;
    fs::write(output, payload).map_err(ImportError::Io)?;

    Ok(ImportReport {
        source_path: source.to_string(),
        output_path: output.to_string(),
        record_count,
        skipped_records,
    })
}

fn read_raw_json(path: &str) -> Result<Vec<RawIngredient>, ImportError> {
    let raw = fs::read_to_string(path).map_err(ImportError::Io)?;
    serde_json::from_str(&raw).map_err(ImportError::Json)
}

fn read_raw_csv(path: &str) -> Result<Vec<RawIngredient>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(ImportError::Csv)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(ImportError::Csv)?;
        let name = row.get(0).unwrap_or("").trim().to_string();
        let value = row
            .get(1)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(0.0);
        let effects = row
            .get(2)
            .map(|raw| {
                raw.split(';')
                    .map(str::trim)
                    .filter(|effect| !effect.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        records.push(RawIngredient {
            name,
            value,
            effects,
        });
    }
    Ok(records)
}

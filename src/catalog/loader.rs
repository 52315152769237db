//! Loader for lootbox records in the catalog directory.
//!
//! Records are hand-edited JSON, so coercion is permissive: a bad `cost` or
//! `chance` degrades to zero, and a broken record is skipped. Nothing here
//! aborts the whole load.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use super::types::{Catalog, LootboxDefinition, PrizeEntry};
use crate::core::error::CatalogError;
use crate::utils::persistence::json_files_in;

/// Reads every `*.json` record in `dir` into a catalog.
///
/// A missing directory yields an empty catalog. Files are visited in name
/// order; when two records share a lootbox name the later file wins.
pub fn load_catalog(dir: &Path) -> Catalog {
    let mut catalog = Catalog::new();
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "catalog directory missing, no lootboxes loaded");
        return catalog;
    }

    let files = match json_files_in(dir) {
        Ok(files) => files,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "failed to scan catalog directory");
            return catalog;
        }
    };

    for path in files {
        match load_record(&path) {
            Ok(def) => {
                if catalog.contains_key(&def.name) {
                    warn!(
                        name = %def.name,
                        path = %path.display(),
                        "duplicate lootbox name, replacing earlier record"
                    );
                }
                catalog.insert(def.name.clone(), def);
            }
            Err(e) => warn!("skipping catalog record: {e}"),
        }
    }

    debug!(count = catalog.len(), dir = %dir.display(), "catalog loaded");
    catalog
}

fn load_record(path: &Path) -> Result<LootboxDefinition, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_record(path, &contents)
}

/// Parses one catalog record. `path` is only used for error reporting.
pub fn parse_record(path: &Path, contents: &str) -> Result<LootboxDefinition, CatalogError> {
    let value: Value = serde_json::from_str(contents).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let obj = value.as_object().ok_or_else(|| CatalogError::NotAnObject {
        path: path.to_path_buf(),
    })?;

    let name = match obj.get("name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            return Err(CatalogError::MissingName {
                path: path.to_path_buf(),
            })
        }
    };

    Ok(LootboxDefinition {
        name,
        cost: coerce_cost(obj.get("cost")),
        items: parse_items(obj.get("items")),
    })
}

/// Integer if possible, else float truncated, else 0. Negative and
/// non-finite values become 0.
pub fn coerce_cost(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => match (n.as_u64(), n.as_i64(), n.as_f64()) {
            (Some(v), _, _) => v,
            (None, Some(_), _) => 0,
            (None, None, Some(f)) => truncate(f),
            _ => 0,
        },
        Some(Value::String(s)) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(v) => v.max(0) as u64,
                Err(_) => s.parse::<f64>().map(truncate).unwrap_or(0),
            }
        }
        Some(Value::Bool(b)) => u64::from(*b),
        _ => 0,
    }
}

fn truncate(f: f64) -> u64 {
    if f.is_finite() && f > 0.0 {
        f.trunc() as u64
    } else {
        0
    }
}

/// Numeric or numeric-string chance; anything else, including NaN and
/// infinities, is 0.0.
pub fn coerce_chance(value: Option<&Value>) -> f64 {
    let chance = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        _ => 0.0,
    };
    if chance.is_finite() {
        chance
    } else {
        0.0
    }
}

fn parse_items(value: Option<&Value>) -> Vec<PrizeEntry> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .map(|entry| {
            let item = entry
                .get("item")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            PrizeEntry {
                item,
                chance: coerce_chance(entry.get("chance")),
            }
        })
        .collect()
}

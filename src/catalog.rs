use std::collections::HashMap;

use ahash::RandomState;
use anyhow::Context;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{error::ScanError, model::SafetyTier};

/// One pre-parsed tabular row, keyed by column names already lower-cased and
/// trimmed by the loader.
pub type Row = HashMap<String, String, RandomState>;

const CATALOG_TABLE: &str = "ingredient safety catalog";
const CATALOG_COLUMNS: &[&str] = &["ingredient_name", "safety_status", "reason_for_unsafety"];

const STANDARDS_TABLE: &str = "nutrient standards";
const STANDARDS_COLUMNS: &[&str] = &["nutrient", "low_threshold", "high_threshold", "note"];

/// The catalog's authoritative record for one ingredient.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CatalogEntry {
  pub canonical_name: String,
  pub safety_tier: SafetyTier,
  pub reason: String,
}

impl CatalogEntry {
  pub fn new(canonical_name: &str, safety_tier: SafetyTier, reason: &str) -> CatalogEntry {
    CatalogEntry {
      canonical_name: canonical_name.to_string(),
      safety_tier,
      reason: reason.to_string(),
    }
  }
}

/// The ingredient safety catalog, loaded once at process start and held
/// read-only for the process lifetime. Entry order is preserved, it is the
/// scan order of the fuzzy resolver.
#[derive(Clone, Debug, Default)]
pub struct SafetyCatalog {
  entries: Vec<CatalogEntry>,
  // Lower-cased canonical name to entry index, for case-insensitive lookup.
  by_name: HashMap<String, usize, RandomState>,
}

impl SafetyCatalog {
  /// Build the catalog from pre-parsed tabular rows, failing fast when a row
  /// misses a required column or repeats a canonical name.
  pub fn from_rows(rows: &[Row]) -> Result<SafetyCatalog, ScanError> {
    let mut catalog = SafetyCatalog::default();

    for row in rows {
      check_columns(row, CATALOG_TABLE, CATALOG_COLUMNS)?;

      catalog.push(CatalogEntry {
        canonical_name: row["ingredient_name"].clone(),
        safety_tier: SafetyTier::parse(&row["safety_status"]),
        reason: row["reason_for_unsafety"].clone(),
      })?;
    }

    tracing::info!(entries = catalog.len(), "loaded ingredient safety catalog");

    Ok(catalog)
  }

  pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Result<SafetyCatalog, ScanError> {
    let mut catalog = SafetyCatalog::default();

    for entry in entries {
      catalog.push(entry)?;
    }

    Ok(catalog)
  }

  fn push(&mut self, entry: CatalogEntry) -> Result<(), ScanError> {
    let key = entry.canonical_name.to_lowercase();

    if self.by_name.contains_key(&key) {
      return Err(ScanError::DuplicateIngredient(entry.canonical_name));
    }

    self.by_name.insert(key, self.entries.len());
    self.entries.push(entry);

    Ok(())
  }

  /// Canonical names in catalog order.
  pub fn names(&self) -> impl Iterator<Item = &str> + Clone {
    self.entries.iter().map(|entry| entry.canonical_name.as_str())
  }

  /// Case-insensitive lookup by canonical name.
  pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
    self.by_name.get(&name.to_lowercase()).map(|index| &self.entries[*index])
  }

  pub fn entries(&self) -> &[CatalogEntry] {
    &self.entries
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// One threshold band of the nutrient standards table.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ThresholdEntry {
  pub nutrient: String,
  pub low_threshold: f64,
  pub high_threshold: f64,
  pub note: String,
}

impl ThresholdEntry {
  pub fn new(nutrient: &str, low_threshold: f64, high_threshold: f64, note: &str) -> ThresholdEntry {
    ThresholdEntry {
      nutrient: nutrient.to_string(),
      low_threshold,
      high_threshold,
      note: note.to_string(),
    }
  }
}

/// The nutrient standards table, read-only after load. Entry order is
/// preserved, findings are emitted in table order.
#[derive(Clone, Debug, Default)]
pub struct NutrientStandards {
  entries: Vec<ThresholdEntry>,
}

impl NutrientStandards {
  pub fn from_rows(rows: &[Row]) -> Result<NutrientStandards, ScanError> {
    let mut standards = NutrientStandards::default();

    for row in rows {
      check_columns(row, STANDARDS_TABLE, STANDARDS_COLUMNS)?;

      let nutrient = row["nutrient"].clone();
      let low_threshold = parse_threshold(&row["low_threshold"], "low_threshold", &nutrient)?;
      let high_threshold = parse_threshold(&row["high_threshold"], "high_threshold", &nutrient)?;

      standards.push(ThresholdEntry {
        nutrient,
        low_threshold,
        high_threshold,
        note: row["note"].clone(),
      })?;
    }

    tracing::info!(entries = standards.len(), "loaded nutrient standards");

    Ok(standards)
  }

  pub fn from_entries(entries: impl IntoIterator<Item = ThresholdEntry>) -> Result<NutrientStandards, ScanError> {
    let mut standards = NutrientStandards::default();

    for entry in entries {
      standards.push(entry)?;
    }

    Ok(standards)
  }

  fn push(&mut self, entry: ThresholdEntry) -> Result<(), ScanError> {
    if entry.low_threshold > entry.high_threshold {
      return Err(ScanError::InvalidThresholdBand(entry.nutrient));
    }

    self.entries.push(entry);

    Ok(())
  }

  pub fn entries(&self) -> &[ThresholdEntry] {
    &self.entries
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

fn check_columns(row: &Row, table: &'static str, columns: &[&str]) -> Result<(), ScanError> {
  let missing = columns.iter().filter(|column| !row.contains_key(**column)).map(|column| column.to_string()).collect_vec();

  if !missing.is_empty() {
    return Err(ScanError::MissingColumns { table, columns: missing });
  }

  Ok(())
}

fn parse_threshold(value: &str, column: &str, nutrient: &str) -> Result<f64, ScanError> {
  Ok(value.trim().parse::<f64>().with_context(|| format!("invalid {column} for {nutrient}: {value:?}"))?)
}

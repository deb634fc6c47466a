use std::collections::HashMap;

use ahash::RandomState;
use bon::bon;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Safety classification of an ingredient. Variant order is severity order,
/// most concerning first, and drives the ordering of findings.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyTier {
  Unsafe,
  Caution,
  Safe,
  Unknown,
}

impl SafetyTier {
  /// Parse a catalog tier string. Anything outside the three actionable tiers
  /// loads as [`SafetyTier::Unknown`] so a sloppy catalog row cannot fail an
  /// entire load.
  pub(crate) fn parse(value: &str) -> SafetyTier {
    match value.trim().to_lowercase().as_str() {
      "unsafe" => SafetyTier::Unsafe,
      "caution" => SafetyTier::Caution,
      "safe" => SafetyTier::Safe,
      _ => SafetyTier::Unknown,
    }
  }
}

/// A nutrient measurement as it arrives from upstream: already numeric, or
/// free text with a number buried in it ("12.5 g").
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum NutrientValue {
  Number(f64),
  Text(String),
}

impl From<f64> for NutrientValue {
  fn from(value: f64) -> NutrientValue {
    NutrientValue::Number(value)
  }
}

impl From<&str> for NutrientValue {
  fn from(value: &str) -> NutrientValue {
    NutrientValue::Text(value.to_string())
  }
}

/// One product to evaluate, as produced by the upstream identification step.
///
/// Nutrient values may be numeric, free text or null; null values are skipped
/// by the nutrient evaluator.
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct ProductRecord {
  #[serde(default = "default_product_name")]
  #[validate(length(min = 1, message = "product name cannot be empty"))]
  pub product_name: String,
  #[serde(default)]
  pub ingredients: Vec<String>,
  #[serde(default)]
  pub nutrition: HashMap<String, Option<NutrientValue>, RandomState>,
}

fn default_product_name() -> String {
  "Unnamed Product".to_string()
}

#[bon]
impl ProductRecord {
  #[builder(finish_fn = build)]
  pub fn builder(#[builder(start_fn)] product_name: &str, ingredients: &[&str], nutrition: Option<&[(&str, NutrientValue)]>) -> ProductRecord {
    ProductRecord {
      product_name: product_name.to_string(),
      ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
      nutrition: nutrition
        .unwrap_or_default()
        .iter()
        .map(|(key, value)| (key.to_string(), Some(value.clone())))
        .collect(),
    }
  }
}

/// The outcome of resolving one input ingredient string.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct IngredientFinding {
  pub resolved_name: String,
  pub tier: SafetyTier,
  pub reason: String,
}

/// Numeric snapshot of the headline nutrients, used by the preferred
/// nutrition scoring mode. Absent nutrients default to zero.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct NutrientSnapshot {
  pub sugar_g: f64,
  pub sodium_mg: f64,
  pub total_fat_g: f64,
  pub protein_g: f64,
}

/// Which nutrition signal feeds the nutrition sub-score.
///
/// The two shapes are deliberately explicit: callers pick one instead of the
/// scorer guessing from which optional fields happen to be present.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum NutritionInput {
  /// Preferred mode, numeric values straight from the product record.
  Numeric(NutrientSnapshot),
  /// Fallback mode, qualitative finding counts from the nutrient evaluator.
  Qualitative { pros: usize, cons: usize },
}

/// Everything learned about one product, owned by the caller for the duration
/// of one evaluation. Findings are ordered by severity.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AnalysisResult {
  pub product_name: String,
  pub ingredient_analysis: Vec<IngredientFinding>,
  pub nutrition_pros: Vec<String>,
  pub nutrition_cons: Vec<String>,
  pub nutrition: NutritionInput,
}

/// Composite safety score with its two sub-scores, all on a 0-10 scale and
/// rounded to two decimals. Stateless and recomputable from the analysis.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct SafetyScore {
  pub value: f64,
  pub ingredients: f64,
  pub nutrition: f64,
}

use std::sync::Arc;

use tracing::instrument;

use crate::{
  catalog::{NutrientStandards, SafetyCatalog},
  error::ScanError,
  matching::{MatchParams, classify},
  model::{AnalysisResult, NutrientSnapshot, NutritionInput, ProductRecord, SafetyScore},
  nutrition,
  scoring::{self, ScoreWeights},
};

/// The main entrypoint for using the nutriscan library.
///
/// `NutriScan` resolves noisy ingredient labels against a reference safety
/// catalog, evaluates nutrient measurements against tiered standards, and
/// combines both signals into a composite safety score. The reference tables
/// are injected once and shared read-only: the scanner can be cloned cheaply
/// and evaluations never contend.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use nutriscan::prelude::*;
///
/// let catalog = Arc::new(
///   SafetyCatalog::from_entries(vec![CatalogEntry::new("Sugar", SafetyTier::Caution, "High intake linked to obesity")]).unwrap(),
/// );
/// let standards = Arc::new(NutrientStandards::default());
///
/// let scanner = NutriScan::new(catalog, standards);
/// let record = ProductRecord::builder("Cola").ingredients(&["sugr"]).build();
///
/// let (analysis, score) = scanner.evaluate(&record, &MatchParams::default(), &ScoreWeights::default()).unwrap();
///
/// assert_eq!(analysis.ingredient_analysis[0].resolved_name, "Sugar");
/// assert_eq!(score.value, 5.0);
/// ```
#[derive(Clone, Debug)]
pub struct NutriScan {
  catalog: Arc<SafetyCatalog>,
  standards: Arc<NutrientStandards>,
}

impl NutriScan {
  /// Create a scanner over process-lifetime, read-only reference tables.
  pub fn new(catalog: Arc<SafetyCatalog>, standards: Arc<NutrientStandards>) -> NutriScan {
    crate::init();

    NutriScan { catalog, standards }
  }

  /// Run the full analysis for one product record: severity-ordered
  /// ingredient findings plus qualitative nutrition findings.
  #[instrument(name = "analyze_product", skip_all, fields(product = record.product_name))]
  pub fn analyze(&self, record: &ProductRecord, params: &MatchParams) -> Result<AnalysisResult, ScanError> {
    let findings = classify::classify(&record.ingredients, &self.catalog, params);
    let (pros, cons) = nutrition::evaluate(&record.nutrition, &self.standards)?;
    let nutrition = resolve_nutrition_input(record, pros.len(), cons.len())?;

    tracing::debug!(findings = findings.len(), pros = pros.len(), cons = cons.len(), "analyzed product");

    Ok(AnalysisResult {
      product_name: record.product_name.clone(),
      ingredient_analysis: findings,
      nutrition_pros: pros,
      nutrition_cons: cons,
      nutrition,
    })
  }

  /// Score a previous analysis. Pure, recomputable, never cached.
  pub fn score(&self, analysis: &AnalysisResult, weights: &ScoreWeights) -> SafetyScore {
    scoring::score(analysis, weights)
  }

  /// One-call convenience over [`NutriScan::analyze`] and [`NutriScan::score`].
  pub fn evaluate(&self, record: &ProductRecord, params: &MatchParams, weights: &ScoreWeights) -> Result<(AnalysisResult, SafetyScore), ScanError> {
    let analysis = self.analyze(record, params)?;
    let score = self.score(&analysis, weights);

    Ok((analysis, score))
  }
}

/// Decide which nutrition signal feeds the sub-score: the numeric snapshot
/// whenever the record carries any nutrition data, qualitative finding counts
/// otherwise. Snapshot nutrients absent from the record default to zero.
fn resolve_nutrition_input(record: &ProductRecord, pros: usize, cons: usize) -> Result<NutritionInput, ScanError> {
  if record.nutrition.is_empty() {
    return Ok(NutritionInput::Qualitative { pros, cons });
  }

  Ok(NutritionInput::Numeric(NutrientSnapshot {
    sugar_g: snapshot_field(record, "sugar_g")?,
    sodium_mg: snapshot_field(record, "sodium_mg")?,
    total_fat_g: snapshot_field(record, "total_fat_g")?,
    protein_g: snapshot_field(record, "protein_g")?,
  }))
}

fn snapshot_field(record: &ProductRecord, key: &str) -> Result<f64, ScanError> {
  match record.nutrition.get(key) {
    Some(Some(value)) => nutrition::coerce(key, value),
    _ => Ok(0.0),
  }
}

use metrics::histogram;
use serde::Deserialize;
use serde_inline_default::serde_inline_default;

use crate::model::{AnalysisResult, IngredientFinding, NutritionInput, SafetyScore, SafetyTier};

/// Relative weights of the two sub-scores. They need not sum to one, they are
/// normalized before combination.
#[serde_inline_default]
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ScoreWeights {
  #[serde_inline_default(0.6)]
  pub ingredients: f64,
  #[serde_inline_default(0.4)]
  pub nutrition: f64,
}

impl Default for ScoreWeights {
  fn default() -> Self {
    ScoreWeights { ingredients: 0.6, nutrition: 0.4 }
  }
}

fn round2(value: f64) -> f64 {
  (value * 100.0).round() / 100.0
}

/// Map the tier distribution of the findings onto a 0-10 score: an all-unsafe
/// list sits at 0, an all-safe list at 10, neutral tiers pull toward the
/// midpoint. No findings at all is the neutral 5.0.
pub fn ingredient_score(findings: &[IngredientFinding]) -> f64 {
  if findings.is_empty() {
    return 5.0;
  }

  let raw: f64 = findings
    .iter()
    .map(|finding| match finding.tier {
      SafetyTier::Safe => 1.0,
      SafetyTier::Unsafe => -1.0,
      SafetyTier::Caution | SafetyTier::Unknown => 0.0,
    })
    .sum();

  let n = findings.len() as f64;

  round2(((raw + n) / (2.0 * n)) * 10.0)
}

/// Map the nutrition signal onto a 0-10 score, from the numeric snapshot when
/// one is available, from qualitative finding counts otherwise.
pub fn nutrition_score(input: &NutritionInput) -> f64 {
  let score = match input {
    NutritionInput::Numeric(snapshot) => {
      5.0 - (snapshot.sugar_g / 10.0).min(2.5) - (snapshot.sodium_mg / 500.0).min(2.0) - (snapshot.total_fat_g / 10.0).min(1.5) + (snapshot.protein_g / 5.0).min(2.0)
    }

    NutritionInput::Qualitative { pros, cons } => 5.0 + 0.5 * *pros as f64 - 0.7 * *cons as f64,
  };

  round2(score.clamp(0.0, 10.0))
}

/// Combine the two sub-scores under normalized weights.
///
/// A zero total weight is not an error: the weighted terms vanish and the
/// final score resolves to zero instead of dividing by zero.
pub fn combine(ingredients: f64, nutrition: f64, weights: &ScoreWeights) -> f64 {
  let mut total = weights.ingredients + weights.nutrition;

  if total == 0.0 {
    total = 1.0;
  }

  let value = (ingredients * weights.ingredients / total) + (nutrition * weights.nutrition / total);

  round2(value.clamp(0.0, 10.0))
}

/// Derive the composite safety score for one analysis result. Pure, identical
/// inputs always yield the identical score.
pub fn score(analysis: &AnalysisResult, weights: &ScoreWeights) -> SafetyScore {
  let ingredients = ingredient_score(&analysis.ingredient_analysis);
  let nutrition = nutrition_score(&analysis.nutrition);
  let value = combine(ingredients, nutrition, weights);

  histogram!("nutriscan_safety_scores").record(value);

  tracing::debug!(product = analysis.product_name, ingredients, nutrition, value, "computed safety score");

  SafetyScore { value, ingredients, nutrition }
}

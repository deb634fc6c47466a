mod error;
mod matching;
mod model;
mod nutrition;
mod scanner;

pub mod catalog;
pub mod scoring;

pub fn init() {
  let _ = *crate::nutrition::NUMBER_REGEX;
}

pub mod prelude {
  pub use crate::catalog::{CatalogEntry, NutrientStandards, Row, SafetyCatalog, ThresholdEntry};
  pub use crate::error::ScanError;
  pub use crate::matching::MatchParams;
  pub use crate::model::{AnalysisResult, IngredientFinding, NutrientSnapshot, NutrientValue, NutritionInput, ProductRecord, SafetyScore, SafetyTier};
  pub use crate::scanner::NutriScan;
  pub use crate::scoring::ScoreWeights;
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
  #[error("missing columns in {table}: {columns:?}")]
  MissingColumns { table: &'static str, columns: Vec<String> },
  #[error("duplicate catalog ingredient: {0}")]
  DuplicateIngredient(String),
  #[error("invalid threshold band for {0}: low is greater than high")]
  InvalidThresholdBand(String),
  #[error("no numeric value in {value:?} for nutrient {nutrient}")]
  UnparsableNutrient { nutrient: String, value: String },
  #[error(transparent)]
  Other(#[from] anyhow::Error),
}

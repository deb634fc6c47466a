use std::{collections::HashMap, sync::LazyLock};

use ahash::RandomState;
use regex::Regex;

use crate::{catalog::NutrientStandards, error::ScanError, model::NutrientValue};

pub(crate) static NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

/// Compare supplied nutrient measurements against the standards table and
/// emit qualitative findings, in table order.
///
/// Absent and null nutrients are skipped. Values exactly on a bound count as
/// balanced, both comparisons are strict. A text value with no extractable
/// number fails the whole call; skipping the offending nutrient is the
/// caller's policy.
pub(crate) fn evaluate(nutrition: &HashMap<String, Option<NutrientValue>, RandomState>, standards: &NutrientStandards) -> Result<(Vec<String>, Vec<String>), ScanError> {
  let mut pros = Vec::new();
  let mut cons = Vec::new();

  for entry in standards.entries() {
    let Some(Some(value)) = nutrition.get(&entry.nutrient) else {
      continue;
    };

    let value = coerce(&entry.nutrient, value)?;

    if value.is_nan() {
      continue;
    }

    if value < entry.low_threshold {
      cons.push(format!("Low {} ({})", entry.nutrient, entry.note));
    } else if value > entry.high_threshold {
      cons.push(format!("High {} ({})", entry.nutrient, entry.note));
    } else {
      pros.push(format!("Balanced {}", entry.nutrient));
    }
  }

  Ok((pros, cons))
}

/// Coerce a nutrient value to a float, taking the first decimal number
/// substring when it comes as text.
pub(crate) fn coerce(nutrient: &str, value: &NutrientValue) -> Result<f64, ScanError> {
  match value {
    NutrientValue::Number(number) => Ok(*number),

    NutrientValue::Text(text) => NUMBER_REGEX
      .find(text)
      .and_then(|found| found.as_str().parse::<f64>().ok())
      .ok_or_else(|| ScanError::UnparsableNutrient {
        nutrient: nutrient.to_string(),
        value: text.clone(),
      }),
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use ahash::RandomState;
  use float_cmp::assert_approx_eq;

  use crate::{
    catalog::{NutrientStandards, ThresholdEntry},
    error::ScanError,
    model::NutrientValue,
  };

  fn standards() -> NutrientStandards {
    NutrientStandards::from_entries(vec![
      ThresholdEntry::new("sugar_g", 2.0, 10.0, "per 100g"),
      ThresholdEntry::new("protein_g", 5.0, 30.0, "per 100g"),
      ThresholdEntry::new("sodium_mg", 100.0, 500.0, "per 100g"),
    ])
    .unwrap()
  }

  fn nutrition(values: &[(&str, Option<NutrientValue>)]) -> HashMap<String, Option<NutrientValue>, RandomState> {
    values.iter().map(|(key, value)| (key.to_string(), value.clone())).collect()
  }

  #[test]
  fn bands_in_table_order() {
    let input = nutrition(&[
      ("sodium_mg", Some(700.0.into())),
      ("sugar_g", Some(5.0.into())),
      ("protein_g", Some(2.0.into())),
    ]);

    let (pros, cons) = super::evaluate(&input, &standards()).unwrap();

    assert_eq!(pros, vec!["Balanced sugar_g"]);
    assert_eq!(cons, vec!["Low protein_g (per 100g)", "High sodium_mg (per 100g)"]);
  }

  #[test]
  fn boundary_values_are_balanced() {
    let input = nutrition(&[("sugar_g", Some(2.0.into())), ("protein_g", Some(30.0.into()))]);

    let (pros, cons) = super::evaluate(&input, &standards()).unwrap();

    assert_eq!(pros, vec!["Balanced sugar_g", "Balanced protein_g"]);
    assert!(cons.is_empty());
  }

  #[test]
  fn missing_and_null_nutrients_are_skipped() {
    let input = nutrition(&[("sugar_g", None), ("fiber_g", Some(3.0.into()))]);

    let (pros, cons) = super::evaluate(&input, &standards()).unwrap();

    assert!(pros.is_empty());
    assert!(cons.is_empty());
  }

  #[test]
  fn nan_values_are_skipped() {
    let input = nutrition(&[("sugar_g", Some(f64::NAN.into()))]);

    let (pros, cons) = super::evaluate(&input, &standards()).unwrap();

    assert!(pros.is_empty());
    assert!(cons.is_empty());
  }

  #[test]
  fn text_values_are_coerced() {
    let input = nutrition(&[("sugar_g", Some("about 12.5 g".into())), ("sodium_mg", Some("120mg".into()))]);

    let (pros, cons) = super::evaluate(&input, &standards()).unwrap();

    assert_eq!(pros, vec!["Balanced sodium_mg"]);
    assert_eq!(cons, vec!["High sugar_g (per 100g)"]);
  }

  #[test]
  fn unparsable_text_fails_the_call() {
    let input = nutrition(&[("sugar_g", Some("lots".into()))]);

    let result = super::evaluate(&input, &standards());

    assert!(matches!(result, Err(ScanError::UnparsableNutrient { nutrient, value }) if nutrient == "sugar_g" && value == "lots"));
  }

  #[test]
  fn never_both_pro_and_con_for_one_nutrient() {
    for value in [0.0, 2.0, 5.0, 10.0, 25.0] {
      let input = nutrition(&[("sugar_g", Some(value.into()))]);
      let (pros, cons) = super::evaluate(&input, &standards()).unwrap();

      assert_eq!(pros.len() + cons.len(), 1);
    }
  }

  #[test]
  fn coerce() {
    assert_approx_eq!(f64, super::coerce("sugar_g", &7.25.into()).unwrap(), 7.25);
    assert_approx_eq!(f64, super::coerce("sugar_g", &"7.25 g".into()).unwrap(), 7.25);
    assert_approx_eq!(f64, super::coerce("sugar_g", &"trace (0.1)".into()).unwrap(), 0.1);
    assert!(super::coerce("sugar_g", &"none".into()).is_err());
  }
}

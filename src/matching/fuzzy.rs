use metrics::histogram;
use strsim::normalized_levenshtein;

use crate::matching::{
  MatchParams,
  extractors::{normalize, tokenize},
};

/// Similarity ratio between two normalized strings, on the 0-100 scale.
#[inline]
fn ratio(lhs: &str, rhs: &str) -> f64 {
  normalized_levenshtein(lhs, rhs) * 100.0
}

/// Resolve a free-text ingredient against the catalog's canonical names.
///
/// Phase one scans the whole catalog for the best similarity ratio, first
/// entry winning ties. Below the threshold, phase two falls back to the first
/// catalog name sharing a token with the input. When both phases come up
/// empty, the input is returned unchanged; downstream lookup then misses and
/// produces an unknown-tier finding.
pub(crate) fn resolve<'c, I>(ingredient: &str, names: I, params: &MatchParams) -> String
where
  I: Iterator<Item = &'c str> + Clone,
{
  let needle = normalize(ingredient);

  let mut best: Option<(&str, f64)> = None;

  for name in names.clone() {
    let score = ratio(&needle, &normalize(name));

    if best.is_none_or(|(_, high)| score > high) {
      best = Some((name, score));
    }
  }

  if let Some((name, score)) = best {
    histogram!("nutriscan_match_ratio").record(score);

    if score >= params.threshold as f64 {
      tracing::debug!(ingredient, resolved = name, score, "resolved by similarity");

      return name.to_string();
    }
  }

  let tokens = tokenize(&needle).collect::<Vec<_>>();

  for name in names {
    let cleaned = normalize(name);

    if tokenize(&cleaned).any(|word| tokens.contains(&word)) {
      tracing::debug!(ingredient, resolved = name, "resolved by token overlap");

      return name.to_string();
    }
  }

  ingredient.to_string()
}

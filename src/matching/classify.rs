use rayon::prelude::*;

use crate::{
  catalog::SafetyCatalog,
  matching::{MatchParams, fuzzy},
  model::{IngredientFinding, SafetyTier},
};

const NO_INFORMATION: &str = "No information available";

/// Resolve every input ingredient against the catalog and order the findings
/// by severity, most concerning first.
///
/// Each resolution is independent, so the loop fans out on the rayon pool;
/// collection reassembles input order before the stable severity sort, so
/// equal-tier findings keep their original relative order.
pub(crate) fn classify(ingredients: &[String], catalog: &SafetyCatalog, params: &MatchParams) -> Vec<IngredientFinding> {
  let mut findings = ingredients
    .par_iter()
    .map(|ingredient| {
      let resolved = fuzzy::resolve(ingredient, catalog.names(), params);

      match catalog.get(&resolved) {
        Some(entry) => IngredientFinding {
          resolved_name: resolved,
          tier: entry.safety_tier,
          reason: entry.reason.clone(),
        },

        None => IngredientFinding {
          resolved_name: resolved,
          tier: SafetyTier::Unknown,
          reason: NO_INFORMATION.to_string(),
        },
      }
    })
    .collect::<Vec<_>>();

  findings.sort_by_key(|finding| finding.tier);

  findings
}

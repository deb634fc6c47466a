use serde::Deserialize;
use serde_inline_default::serde_inline_default;

pub(crate) mod classify;
pub(crate) mod extractors;
pub(crate) mod fuzzy;

/// Knobs for ingredient resolution.
#[serde_inline_default]
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct MatchParams {
  /// Minimum similarity ratio (0-100 scale) for a direct fuzzy match. Below
  /// it, resolution falls back to token overlap.
  #[serde_inline_default(80)]
  pub threshold: u8,
}

impl Default for MatchParams {
  fn default() -> Self {
    MatchParams { threshold: 80 }
  }
}

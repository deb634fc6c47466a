/// Canonicalize a raw ingredient label for comparison: lower-case, replace
/// anything outside `[a-z0-9]` with a separator, collapse separator runs and
/// trim. Total and deterministic, empty input yields an empty string.
pub(crate) fn normalize(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut pending = false;

  for c in text.chars().flat_map(char::to_lowercase) {
    match c {
      'a'..='z' | '0'..='9' => {
        if pending && !out.is_empty() {
          out.push(' ');
        }

        pending = false;
        out.push(c);
      }

      // Punctuation and whitespace alike act as word separators.
      _ => pending = true,
    }
  }

  out
}

/// Whitespace tokens of an already-normalized string.
pub(crate) fn tokenize(normalized: &str) -> impl Iterator<Item = &str> {
  normalized.split_whitespace()
}

#[cfg(test)]
mod tests {
  #[test]
  fn normalize() {
    assert_eq!(super::normalize("High-Fructose Corn Syrup"), "high fructose corn syrup");
    assert_eq!(super::normalize("  E102 (Tartrazine)  "), "e102 tartrazine");
    assert_eq!(super::normalize("Mono- & Di-Glycerides"), "mono di glycerides");
    assert_eq!(super::normalize("Café au lait"), "caf au lait");
    assert_eq!(super::normalize("!!!"), "");
    assert_eq!(super::normalize(""), "");
  }

  #[test]
  fn normalize_is_idempotent() {
    let once = super::normalize("Sodium Benzoate (E211)");

    assert_eq!(super::normalize(&once), once);
  }

  #[test]
  fn tokenize() {
    let tokens = super::tokenize("high fructose corn syrup").collect::<Vec<_>>();

    assert_eq!(tokens, vec!["high", "fructose", "corn", "syrup"]);
    assert_eq!(super::tokenize("").count(), 0);
  }
}

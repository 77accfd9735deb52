//! Helpers for decoding loosely-typed server records.
//!
//! The backend stores whatever the extraction model produced, so the same
//! field can arrive as a string, a number, a list, or `null` depending on the
//! record. These helpers collapse those variants into the canonical types.

use serde_json::Value;

/// Render a scalar JSON value as text. Arrays and objects yield `None`.
pub(crate) fn text(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => {
      let trimmed = s.trim();
      (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    _ => None,
  }
}

/// The first alias that carries a non-empty scalar, or an empty string.
pub(crate) fn first_text(candidates: &[&Option<Value>]) -> String {
  candidates
    .iter()
    .filter_map(|v| v.as_ref().and_then(text))
    .next()
    .unwrap_or_default()
}

/// A list of strings. A bare string is split on commas; scalars inside a list
/// are stringified; blanks and duplicates are dropped, order is kept.
pub(crate) fn string_list(value: Option<&Value>) -> Vec<String> {
  let raw: Vec<String> = match value {
    Some(Value::Array(items)) => items.iter().filter_map(text).collect(),
    Some(Value::String(s)) => s
      .split(',')
      .map(|part| part.trim().to_string())
      .filter(|part| !part.is_empty())
      .collect(),
    Some(other) => text(other).into_iter().collect(),
    None => Vec::new(),
  };

  let mut out: Vec<String> = Vec::with_capacity(raw.len());
  for item in raw {
    if !out.iter().any(|seen| seen.eq_ignore_ascii_case(&item)) {
      out.push(item);
    }
  }
  out
}

/// A number carried as a JSON number or a numeric prefix of a string
/// (`"3.5 years"`, `"5+"`).
pub(crate) fn number(value: Option<&Value>) -> Option<f64> {
  match value? {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => {
      let digits: String = s
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
      digits.parse().ok()
    }
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn first_text_skips_blank_and_missing() {
    let a = None;
    let b = Some(json!("   "));
    let c = Some(json!("+1 555 0100"));
    assert_eq!(first_text(&[&a, &b, &c]), "+1 555 0100");
  }

  #[test]
  fn first_text_stringifies_numbers() {
    let phone = Some(json!(5550100));
    assert_eq!(first_text(&[&phone]), "5550100");
  }

  #[test]
  fn string_list_accepts_comma_separated_text() {
    let v = json!("Rust, Go , ,rust");
    assert_eq!(string_list(Some(&v)), vec!["Rust", "Go"]);
  }

  #[test]
  fn number_parses_numeric_prefix() {
    assert_eq!(number(Some(&json!("3.5 years"))), Some(3.5));
    assert_eq!(number(Some(&json!(4))), Some(4.0));
    assert_eq!(number(Some(&json!("senior"))), None);
    assert_eq!(number(None), None);
  }
}

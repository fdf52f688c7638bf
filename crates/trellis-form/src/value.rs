//! A single form field value.

use serde::{Deserialize, Serialize};

/// A value entered into a wizard form field.
///
/// Fields are either free text, a toggle, or a structured blob (e.g. a
/// parsed certificate or a key/value property set coming from a composite
/// form control). Serialized untagged so that field value documents read
/// like the JSON the console's REST layer exchanges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
  Text(String),
  Flag(bool),
  Structured(serde_json::Value),
}

impl FieldValue {
  /// The text content of this value, if it is text.
  pub fn as_text(&self) -> Option<&str> {
    match self {
      FieldValue::Text(s) => Some(s),
      _ => None,
    }
  }

  /// The toggle state of this value, if it is a flag.
  pub fn as_flag(&self) -> Option<bool> {
    match self {
      FieldValue::Flag(b) => Some(*b),
      _ => None,
    }
  }

  /// Whether this value counts as "empty" for validation.
  ///
  /// Empty text, a `false` flag, and JSON null all validate the same as
  /// an absent field.
  pub fn is_empty(&self) -> bool {
    match self {
      FieldValue::Text(s) => s.is_empty(),
      FieldValue::Flag(b) => !b,
      FieldValue::Structured(v) => v.is_null(),
    }
  }
}

impl From<&str> for FieldValue {
  fn from(s: &str) -> Self {
    FieldValue::Text(s.to_string())
  }
}

impl From<String> for FieldValue {
  fn from(s: String) -> Self {
    FieldValue::Text(s)
  }
}

impl From<bool> for FieldValue {
  fn from(b: bool) -> Self {
    FieldValue::Flag(b)
  }
}

impl From<serde_json::Value> for FieldValue {
  fn from(v: serde_json::Value) -> Self {
    match v {
      serde_json::Value::String(s) => FieldValue::Text(s),
      serde_json::Value::Bool(b) => FieldValue::Flag(b),
      other => FieldValue::Structured(other),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_classification() {
    assert!(FieldValue::Text(String::new()).is_empty());
    assert!(FieldValue::Flag(false).is_empty());
    assert!(FieldValue::Structured(serde_json::Value::Null).is_empty());
    assert!(!FieldValue::Text("acme".to_string()).is_empty());
    assert!(!FieldValue::Flag(true).is_empty());
  }

  #[test]
  fn test_untagged_roundtrip() {
    let v: FieldValue = serde_json::from_str("\"https://example.org\"").unwrap();
    assert_eq!(v.as_text(), Some("https://example.org"));

    let v: FieldValue = serde_json::from_str("true").unwrap();
    assert_eq!(v.as_flag(), Some(true));
  }
}

//! Per-page validation errors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Field-level validation errors for a single wizard page.
///
/// Keys are field names, values are message keys resolved by the i18n
/// layer; the wizard core never deals in display strings. A page is
/// valid iff its error map is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap {
  errors: HashMap<String, String>,
}

impl ErrorMap {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record an error for a field. A later error for the same field
  /// replaces the earlier one.
  pub fn insert(&mut self, field: impl Into<String>, message_key: impl Into<String>) {
    self.errors.insert(field.into(), message_key.into());
  }

  pub fn get(&self, field: &str) -> Option<&str> {
    self.errors.get(field).map(String::as_str)
  }

  pub fn contains(&self, field: &str) -> bool {
    self.errors.contains_key(field)
  }

  pub fn is_empty(&self) -> bool {
    self.errors.is_empty()
  }

  pub fn len(&self) -> usize {
    self.errors.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
    self.errors.iter()
  }
}

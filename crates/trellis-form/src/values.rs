//! The field value store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// All field values entered across every page of a wizard.
///
/// Field names are globally unique across the wizard, so one flat map is
/// the single source of truth. Writes are last-write-wins in event
/// delivery order; the store never reorders or coalesces updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValues {
  fields: HashMap<String, FieldValue>,
}

impl FieldValues {
  pub fn new() -> Self {
    Self::default()
  }

  /// Read a field. Absent fields are not an error.
  pub fn get(&self, name: &str) -> Option<&FieldValue> {
    self.fields.get(name)
  }

  /// The text content of a field, if present and textual.
  pub fn text(&self, name: &str) -> Option<&str> {
    self.fields.get(name).and_then(FieldValue::as_text)
  }

  /// Whether a field is absent or holds an empty value.
  ///
  /// Validators treat both identically, so missing keys never fail a
  /// lookup.
  pub fn is_blank(&self, name: &str) -> bool {
    self.fields.get(name).is_none_or(FieldValue::is_empty)
  }

  /// Write a field, replacing any prior value.
  pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
    self.fields.insert(name.into(), value.into());
  }

  /// Apply a partial update, key by key. Equivalent to repeated `set`.
  pub fn merge(&mut self, partial: FieldValues) {
    self.fields.extend(partial.fields);
  }

  /// Remove a field, returning its value if it was present.
  pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
    self.fields.remove(name)
  }

  /// An immutable copy for validation and submit.
  ///
  /// Late-arriving field updates mutate the store, never a snapshot that
  /// an in-flight validation or submit cycle is already reading.
  pub fn snapshot(&self) -> FieldValues {
    self.clone()
  }

  pub fn len(&self) -> usize {
    self.fields.len()
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
    self.fields.iter()
  }
}

impl FromIterator<(String, FieldValue)> for FieldValues {
  fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
    Self {
      fields: iter.into_iter().collect(),
    }
  }
}

//! Wizard pages and the per-page validator registry.

use std::fmt;

use trellis_form::{ErrorMap, FieldValues};

use crate::error::WizardError;

/// Validator for one wizard page.
///
/// Pure and deterministic given the value snapshot: no side effects, no
/// I/O. Validators receive the full store, not just the current page's
/// fields, because later pages may depend on choices made earlier (e.g.
/// the configuration page's required properties depend on the
/// authentication type selected before it).
pub type PageValidator = Box<dyn Fn(&FieldValues) -> ErrorMap + Send + Sync>;

/// One page of a wizard: a position in the sequence plus its local
/// validation rules. Constructed once when the wizard is configured and
/// immutable thereafter.
pub struct WizardPage {
  name: String,
  validate: PageValidator,
}

impl WizardPage {
  pub fn new(
    name: impl Into<String>,
    validate: impl Fn(&FieldValues) -> ErrorMap + Send + Sync + 'static,
  ) -> Self {
    Self {
      name: name.into(),
      validate: Box::new(validate),
    }
  }

  /// A page with no local rules, e.g. a purely informational page.
  pub fn unvalidated(name: impl Into<String>) -> Self {
    Self::new(name, |_| ErrorMap::new())
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn validate(&self, values: &FieldValues) -> ErrorMap {
    (self.validate)(values)
  }
}

impl fmt::Debug for WizardPage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("WizardPage")
      .field("name", &self.name)
      .finish_non_exhaustive()
  }
}

/// The configured page list, indexed by page position.
///
/// Page indexes are 0-based and contiguous by construction: the page at
/// position `i` in the configured list has index `i`.
#[derive(Debug)]
pub struct PageRegistry {
  pages: Vec<WizardPage>,
}

impl PageRegistry {
  /// Fails fast on an empty page list — that is a wiring bug, not a
  /// runtime condition.
  pub fn new(pages: Vec<WizardPage>) -> Result<Self, WizardError> {
    if pages.is_empty() {
      return Err(WizardError::NoPages);
    }
    Ok(Self { pages })
  }

  pub fn len(&self) -> usize {
    self.pages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pages.is_empty()
  }

  pub fn get(&self, page_index: usize) -> Option<&WizardPage> {
    self.pages.get(page_index)
  }

  /// Run the validator for `page_index` against a value snapshot.
  ///
  /// An out-of-range index means the caller addressed a page that was
  /// never configured, which is fatal rather than user-correctable.
  pub fn validate(
    &self,
    page_index: usize,
    values: &FieldValues,
  ) -> Result<ErrorMap, WizardError> {
    let page = self
      .pages
      .get(page_index)
      .ok_or(WizardError::PageNotRegistered { page_index })?;
    Ok(page.validate(values))
  }
}

//! The step sequencer: a pure state machine over the page index.

use trellis_form::FieldValues;

use crate::error::WizardError;
use crate::page::PageRegistry;

/// Tracks the current page index within `[0, page_count)`.
///
/// The sequencer itself only enforces the index bounds; the validation
/// gate on forward navigation is applied by the controller via
/// [`StepSequencer::can_advance`] before it calls [`StepSequencer::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSequencer {
  current: usize,
  page_count: usize,
}

impl StepSequencer {
  pub fn new(page_count: usize) -> Result<Self, WizardError> {
    if page_count == 0 {
      return Err(WizardError::NoPages);
    }
    Ok(Self {
      current: 0,
      page_count,
    })
  }

  pub fn current(&self) -> usize {
    self.current
  }

  pub fn page_count(&self) -> usize {
    self.page_count
  }

  /// Whether the current page is the last one, where the primary action
  /// is submit rather than advance.
  pub fn is_terminal(&self) -> bool {
    self.current == self.page_count - 1
  }

  /// Whether forward navigation is permitted: the current page's
  /// validator yields an empty error map for the given snapshot.
  pub fn can_advance(
    &self,
    values: &FieldValues,
    registry: &PageRegistry,
  ) -> Result<bool, WizardError> {
    Ok(registry.validate(self.current, values)?.is_empty())
  }

  /// Move to the next page. Calling this at the terminal page is a
  /// caller error; the controller routes terminal "next" to submit.
  pub fn advance(&mut self) -> Result<usize, WizardError> {
    if self.is_terminal() {
      return Err(WizardError::AlreadyTerminal {
        page_index: self.current,
      });
    }
    self.current += 1;
    Ok(self.current)
  }

  /// Move to the previous page. Never blocked, never re-validates, and
  /// a no-op at the first page.
  pub fn retreat(&mut self) -> usize {
    self.current = self.current.saturating_sub(1);
    self.current
  }
}

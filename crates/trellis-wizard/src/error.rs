//! Wizard errors.

use crate::submit::SubmitFailure;

/// Errors raised by the wizard core.
///
/// Per-field validation problems are not represented here — they are
/// returned as data (`ErrorMap`) so the rendering layer can show them
/// inline next to each field.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
  /// Wizard wired with zero pages. A wiring bug, caught at construction.
  #[error("wizard configured with no pages")]
  NoPages,

  /// A page index outside the configured page list was addressed.
  /// A wiring bug, not a user-correctable condition.
  #[error("no page registered at index {page_index}")]
  PageNotRegistered { page_index: usize },

  /// `advance` was called while already on the terminal page. The
  /// controller routes the terminal primary action to submit instead.
  #[error("already at the terminal page (index {page_index})")]
  AlreadyTerminal { page_index: usize },

  /// A second submit was attempted while one was in flight. The first
  /// submit is unaffected; this attempt never reaches the backend.
  #[error("a submit is already in flight")]
  ConcurrentSubmit,

  /// The injected submit function failed, or the submit was cancelled.
  #[error("submit failed")]
  Submit(#[source] SubmitFailure),
}

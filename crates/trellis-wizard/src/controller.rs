//! The wizard flow controller.
//!
//! Top-level orchestration exposed to the rendering layer: composes the
//! page registry, step sequencer, and field value store, and owns the
//! submit path. All operations are local and synchronous except
//! submit, whose only suspension point is the injected async submit
//! function.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use trellis_form::{ErrorMap, FieldValue, FieldValues};

use crate::alert::{Alert, AlertSink, NoopAlertSink};
use crate::error::WizardError;
use crate::page::{PageRegistry, WizardPage};
use crate::sequencer::StepSequencer;
use crate::submit::{SubmitFailure, SubmitResult};

/// Observable controller state, exposed to the rendering layer after
/// every operation for button enablement, spinner, and inline errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardSnapshot {
  pub current_page_index: usize,
  pub is_submitting: bool,
  pub errors: ErrorMap,
}

/// Outcome of the primary "next" action.
#[derive(Debug)]
pub enum NextOutcome {
  /// The current page validated clean and the wizard moved forward.
  Advanced { page_index: usize },
  /// The current page has validation errors; the index did not change.
  Rejected { errors: ErrorMap },
  /// The terminal page validated clean and the submit ran.
  Submitted(SubmitResult),
}

/// Mutable wizard state: the page cursor plus accumulated field values.
/// Owned exclusively by one controller instance and discarded on close.
struct WizardState {
  sequencer: StepSequencer,
  values: FieldValues,
}

/// One wizard instance.
///
/// Created when the wizard opens and dropped when it closes; a closed
/// and reopened wizard always starts from its initial values, never
/// from prior partial input.
pub struct WizardController {
  wizard_id: String,
  registry: PageRegistry,
  state: Mutex<WizardState>,
  submitting: AtomicBool,
  alerts: Arc<dyn AlertSink>,
}

impl WizardController {
  /// Configure a wizard with its page list and initial values.
  ///
  /// Alerts are discarded; use [`WizardController::with_alert_sink`] to
  /// observe submit failures.
  pub fn new(pages: Vec<WizardPage>, initial_values: FieldValues) -> Result<Self, WizardError> {
    Self::with_alert_sink(pages, initial_values, Arc::new(NoopAlertSink))
  }

  pub fn with_alert_sink(
    pages: Vec<WizardPage>,
    initial_values: FieldValues,
    alerts: Arc<dyn AlertSink>,
  ) -> Result<Self, WizardError> {
    let registry = PageRegistry::new(pages)?;
    let sequencer = StepSequencer::new(registry.len())?;
    let wizard_id = uuid::Uuid::new_v4().to_string();

    info!(
      wizard_id = %wizard_id,
      page_count = registry.len(),
      "wizard_opened"
    );

    Ok(Self {
      wizard_id,
      registry,
      state: Mutex::new(WizardState {
        sequencer,
        values: initial_values,
      }),
      submitting: AtomicBool::new(false),
      alerts,
    })
  }

  pub fn wizard_id(&self) -> &str {
    &self.wizard_id
  }

  pub fn page_count(&self) -> usize {
    self.registry.len()
  }

  pub fn current_page_index(&self) -> usize {
    self.state.lock().unwrap().sequencer.current()
  }

  pub fn is_submitting(&self) -> bool {
    self.submitting.load(Ordering::SeqCst)
  }

  /// Record a single field update. Last write wins, in event delivery
  /// order.
  pub fn set_field(&self, name: impl Into<String>, value: impl Into<FieldValue>) {
    self.state.lock().unwrap().values.set(name, value);
  }

  /// Apply a partial value update, key by key.
  pub fn merge_values(&self, partial: FieldValues) {
    self.state.lock().unwrap().values.merge(partial);
  }

  /// An immutable copy of the current field values.
  pub fn values(&self) -> FieldValues {
    self.state.lock().unwrap().values.snapshot()
  }

  /// Validate the current page against the current values.
  pub fn validate_current(&self) -> Result<ErrorMap, WizardError> {
    let state = self.state.lock().unwrap();
    self
      .registry
      .validate(state.sequencer.current(), &state.values)
  }

  /// The observable state snapshot for the rendering layer.
  pub fn observe(&self) -> Result<WizardSnapshot, WizardError> {
    let state = self.state.lock().unwrap();
    let errors = self
      .registry
      .validate(state.sequencer.current(), &state.values)?;
    Ok(WizardSnapshot {
      current_page_index: state.sequencer.current(),
      is_submitting: self.is_submitting(),
      errors,
    })
  }

  /// The primary action: advance if the current page validates clean,
  /// submit if it is also the terminal page, otherwise return the
  /// page's errors without moving.
  ///
  /// This is the single exit point for the primary button across all
  /// pages, so the terminal page's "next" can never bypass submit.
  pub async fn next<F, Fut>(
    &self,
    submit_fn: F,
    cancel: &CancellationToken,
  ) -> Result<NextOutcome, WizardError>
  where
    F: FnOnce(FieldValues) -> Fut,
    Fut: Future<Output = Result<SubmitResult, SubmitFailure>>,
  {
    enum Gate {
      Advanced(usize),
      Rejected(ErrorMap),
      Terminal,
    }

    let gate = {
      let mut state = self.state.lock().unwrap();
      let current = state.sequencer.current();
      let errors = self.registry.validate(current, &state.values)?;
      if !errors.is_empty() {
        Gate::Rejected(errors)
      } else if state.sequencer.is_terminal() {
        Gate::Terminal
      } else {
        Gate::Advanced(state.sequencer.advance()?)
      }
    };

    match gate {
      Gate::Rejected(errors) => {
        debug!(
          wizard_id = %self.wizard_id,
          error_count = errors.len(),
          "wizard_page_rejected"
        );
        Ok(NextOutcome::Rejected { errors })
      }
      Gate::Advanced(page_index) => {
        debug!(wizard_id = %self.wizard_id, page_index, "wizard_page_advanced");
        Ok(NextOutcome::Advanced { page_index })
      }
      Gate::Terminal => {
        let result = self.submit(submit_fn, cancel).await?;
        Ok(NextOutcome::Submitted(result))
      }
    }
  }

  /// Step back one page. Never blocked, never re-validates.
  pub fn previous(&self) -> usize {
    let mut state = self.state.lock().unwrap();
    let page_index = state.sequencer.retreat();
    debug!(wizard_id = %self.wizard_id, page_index, "wizard_page_retreated");
    page_index
  }

  /// Run the submit with a snapshot of the current values.
  ///
  /// At most one submit is in flight per wizard: a second call while
  /// one is pending is rejected immediately with
  /// [`WizardError::ConcurrentSubmit`] and never invokes `submit_fn`.
  /// Cancelling the token while the submit is in flight resolves it as
  /// [`SubmitFailure::Cancelled`].
  pub async fn submit<F, Fut>(
    &self,
    submit_fn: F,
    cancel: &CancellationToken,
  ) -> Result<SubmitResult, WizardError>
  where
    F: FnOnce(FieldValues) -> Fut,
    Fut: Future<Output = Result<SubmitResult, SubmitFailure>>,
  {
    if self
      .submitting
      .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
      .is_err()
    {
      warn!(wizard_id = %self.wizard_id, "wizard_submit_rejected: already in flight");
      return Err(WizardError::ConcurrentSubmit);
    }
    // Clears the in-flight flag on every exit path, including futures
    // dropped mid-await.
    let _guard = SubmitGuard(&self.submitting);

    let snapshot = self.values();
    info!(
      wizard_id = %self.wizard_id,
      field_count = snapshot.len(),
      "wizard_submit_started"
    );

    let result = tokio::select! {
      result = submit_fn(snapshot) => result,
      _ = cancel.cancelled() => Err(SubmitFailure::Cancelled),
    };

    match result {
      Ok(success) => {
        info!(
          wizard_id = %self.wizard_id,
          created_id = ?success.created_id,
          "wizard_submit_completed"
        );
        Ok(success)
      }
      // Cancellation raises no alert.
      Err(SubmitFailure::Cancelled) => {
        warn!(wizard_id = %self.wizard_id, "wizard_submit_cancelled");
        Err(WizardError::Submit(SubmitFailure::Cancelled))
      }
      Err(failure) => {
        error!(
          wizard_id = %self.wizard_id,
          kind = failure.kind(),
          error = %failure,
          "wizard_submit_failed"
        );
        self.alerts.report(Alert::from_failure(&failure));
        Err(WizardError::Submit(failure))
      }
    }
  }

  /// Discard the wizard state. Nothing is persisted; reopening means
  /// constructing a new controller, which starts from the initial
  /// values again.
  pub fn close(self) {
    info!(wizard_id = %self.wizard_id, "wizard_closed");
  }
}

struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
  fn drop(&mut self) {
    self.0.store(false, Ordering::SeqCst);
  }
}

//! Trellis Wizard
//!
//! This crate provides the flow core behind every multi-step creation
//! wizard in the Trellis console: an ordered page list with per-page
//! validators, a bounded step sequencer, and a controller that gates
//! forward navigation on validation and funnels the terminal page's
//! primary action into a single submit path.
//!
//! Key behaviors:
//! - Forward navigation requires an empty error map for the current page;
//!   backward navigation is never blocked and never re-validates
//! - At most one submit is in flight per wizard instance; a second
//!   attempt is rejected without invoking the submit function
//! - Submit failures are classified and reported through an [`AlertSink`]
//!   rather than escaping to the rendering layer
//! - Closing the wizard cancels an in-flight submit via its
//!   `CancellationToken`

mod alert;
mod controller;
mod debounce;
mod error;
mod page;
mod sequencer;
mod submit;

pub use alert::{
  Alert, AlertLevel, AlertSink, ChannelAlertSink, DEFAULT_ALERT_RETENTION, MemoryAlertSink,
  NoopAlertSink,
};
pub use controller::{NextOutcome, WizardController, WizardSnapshot};
pub use debounce::Debouncer;
pub use error::WizardError;
pub use page::{PageRegistry, WizardPage};
pub use sequencer::StepSequencer;
pub use submit::{SubmitFailure, SubmitResult};

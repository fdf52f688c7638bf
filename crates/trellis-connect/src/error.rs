//! Connector domain errors.

/// Errors raised while assembling a connector payload.
///
/// Assembly runs after the wizard's validators have passed, so these
/// indicate a wiring gap between a kind's pages and its assembler, not
/// a user-correctable condition.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
  /// A field the assembler requires was absent or empty.
  #[error("required field '{field}' is missing from the wizard values")]
  MissingField { field: &'static str },

  /// The authentication type field held a value outside the known set.
  #[error("unknown endpoint authentication type '{value}'")]
  UnknownAuthenticationType { value: String },
}

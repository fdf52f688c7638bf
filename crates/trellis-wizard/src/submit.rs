//! Submit results and classified submit failures.

use serde::{Deserialize, Serialize};

/// Result of a successful submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResult {
  /// Backend-assigned identifier of the created resource, when the
  /// response carried one.
  pub created_id: Option<String>,
}

impl SubmitResult {
  pub fn created(id: impl Into<String>) -> Self {
    Self {
      created_id: Some(id.into()),
    }
  }

  pub fn empty() -> Self {
    Self { created_id: None }
  }

  /// Extract the created resource id from a `Location` response header.
  ///
  /// The id is the final path segment; an empty or trailing-slash
  /// location yields no id.
  pub fn from_location(location: &str) -> Self {
    let id = location
      .rsplit('/')
      .next()
      .filter(|segment| !segment.is_empty());
    Self {
      created_id: id.map(str::to_string),
    }
  }
}

/// A submit failure, classified at the controller boundary.
///
/// The injected submit function maps its transport error into one of
/// these; raw network errors never reach the rendering layer. Each
/// variant maps to a distinct user-visible alert.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitFailure {
  /// The tenant's resource creation limit was hit.
  #[error("resource creation limit reached")]
  LimitReached { detail: Option<String> },

  /// A resource with the same name or identifier already exists.
  #[error("a resource with the same identifier already exists")]
  DuplicateResource { detail: Option<String> },

  /// The session lacks permission to create the resource.
  #[error("not authorized to create the resource")]
  Unauthorized,

  /// The target endpoint or referenced resource does not exist.
  #[error("target resource not found")]
  NotFound,

  /// The wizard was closed while the submit was in flight.
  #[error("submit cancelled")]
  Cancelled,

  /// Anything else, including backend 5xx responses.
  #[error("resource creation failed")]
  Generic { detail: Option<String> },
}

impl SubmitFailure {
  /// Stable key identifying this failure kind, used as the alert
  /// message key and in structured log fields.
  pub fn kind(&self) -> &'static str {
    match self {
      SubmitFailure::LimitReached { .. } => "limit-reached",
      SubmitFailure::DuplicateResource { .. } => "duplicate-resource",
      SubmitFailure::Unauthorized => "unauthorized",
      SubmitFailure::NotFound => "not-found",
      SubmitFailure::Cancelled => "cancelled",
      SubmitFailure::Generic { .. } => "generic",
    }
  }

  /// Backend-supplied detail text, when the response carried one.
  pub fn detail(&self) -> Option<&str> {
    match self {
      SubmitFailure::LimitReached { detail }
      | SubmitFailure::DuplicateResource { detail }
      | SubmitFailure::Generic { detail } => detail.as_deref(),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_created_id_from_location() {
    let result =
      SubmitResult::from_location("/t/acme/api/server/v1/identity-providers/0d6a8b3f");
    assert_eq!(result.created_id.as_deref(), Some("0d6a8b3f"));
  }

  #[test]
  fn test_empty_location_yields_no_id() {
    assert_eq!(SubmitResult::from_location("").created_id, None);
    assert_eq!(
      SubmitResult::from_location("/identity-providers/").created_id,
      None
    );
  }

  #[test]
  fn test_failure_kinds_are_distinct() {
    let failures = [
      SubmitFailure::LimitReached { detail: None },
      SubmitFailure::DuplicateResource { detail: None },
      SubmitFailure::Unauthorized,
      SubmitFailure::NotFound,
      SubmitFailure::Cancelled,
      SubmitFailure::Generic { detail: None },
    ];
    let kinds: std::collections::HashSet<_> = failures.iter().map(|f| f.kind()).collect();
    assert_eq!(kinds.len(), failures.len());
  }
}

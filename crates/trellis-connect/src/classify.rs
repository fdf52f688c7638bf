//! Classification of REST failures from the create endpoints.
//!
//! The injected submit function maps its transport error through
//! [`classify_create_failure`] so the controller only ever sees a typed
//! [`SubmitFailure`]; raw HTTP errors never reach the rendering layer.

use serde::{Deserialize, Serialize};
use trellis_wizard::SubmitFailure;

/// Server error code for the tenant's connection creation limit.
pub const LIMIT_REACHED_ERROR_CODE: &str = "IDP-60035";

/// Server error code for a connection name that already exists.
pub const DUPLICATE_ERROR_CODE: &str = "IDP-60002";

/// Error body returned by the IAM server's management APIs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
  pub code: Option<String>,
  pub description: Option<String>,
}

/// Map a create-endpoint failure to its alertable classification.
///
/// A 403 carrying the limit code is the resource quota, not a
/// permission problem; a 500 is always generic and never leaks the
/// server's description text.
pub fn classify_create_failure(status: u16, body: Option<&ApiErrorBody>) -> SubmitFailure {
  let code = body.and_then(|b| b.code.as_deref());
  let description = body.and_then(|b| b.description.clone());

  match status {
    403 if code == Some(LIMIT_REACHED_ERROR_CODE) => SubmitFailure::LimitReached {
      detail: description,
    },
    409 => SubmitFailure::DuplicateResource {
      detail: description,
    },
    _ if code == Some(DUPLICATE_ERROR_CODE) => SubmitFailure::DuplicateResource {
      detail: description,
    },
    401 | 403 => SubmitFailure::Unauthorized,
    404 => SubmitFailure::NotFound,
    500.. => SubmitFailure::Generic { detail: None },
    _ => SubmitFailure::Generic {
      detail: description,
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn body(code: &str, description: &str) -> ApiErrorBody {
    ApiErrorBody {
      code: Some(code.to_string()),
      description: Some(description.to_string()),
    }
  }

  #[test]
  fn test_limit_code_beats_plain_forbidden() {
    let failure = classify_create_failure(
      403,
      Some(&body(LIMIT_REACHED_ERROR_CODE, "limit reached")),
    );
    assert!(matches!(failure, SubmitFailure::LimitReached { .. }));

    let failure = classify_create_failure(403, None);
    assert_eq!(failure, SubmitFailure::Unauthorized);
  }

  #[test]
  fn test_duplicate_by_status_or_code() {
    let failure = classify_create_failure(409, Some(&body("ANY", "exists")));
    assert!(matches!(failure, SubmitFailure::DuplicateResource { .. }));

    let failure = classify_create_failure(400, Some(&body(DUPLICATE_ERROR_CODE, "exists")));
    assert!(matches!(failure, SubmitFailure::DuplicateResource { .. }));
  }

  #[test]
  fn test_unauthorized_and_not_found() {
    assert_eq!(classify_create_failure(401, None), SubmitFailure::Unauthorized);
    assert_eq!(classify_create_failure(404, None), SubmitFailure::NotFound);
  }

  #[test]
  fn test_server_errors_never_leak_descriptions() {
    let failure = classify_create_failure(500, Some(&body("SRV-1", "stack trace text")));
    assert_eq!(failure, SubmitFailure::Generic { detail: None });
  }

  #[test]
  fn test_other_failures_carry_the_description() {
    let failure = classify_create_failure(400, Some(&body("IDP-99999", "bad payload")));
    assert_eq!(
      failure,
      SubmitFailure::Generic {
        detail: Some("bad payload".to_string())
      }
    );
  }
}

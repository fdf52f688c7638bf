//! Page validators for the authenticator create wizard.
//!
//! Pure functions over the full value snapshot; message values are i18n
//! keys resolved by the rendering layer. A field that is absent
//! validates like an empty one.

use std::sync::LazyLock;

use regex::Regex;
use trellis_form::{ErrorMap, FieldValues};

use crate::authentication::{
  AuthenticationType, FIELD_ACCESS_TOKEN, FIELD_AUTHENTICATION_TYPE, FIELD_DISPLAY_NAME,
  FIELD_ENDPOINT_URI, FIELD_HEADER, FIELD_IDENTIFIER, FIELD_PASSWORD, FIELD_USERNAME, FIELD_VALUE,
};

static IDENTIFIER_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_-]{2,49}$").expect("valid regex"));

static DISPLAY_NAME_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9 ._-]{2,49}$").expect("valid regex"));

static API_KEY_HEADER_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-.]+$").expect("valid regex"));

/// Whether the endpoint URI is an acceptable https URL.
fn is_https_url(value: &str) -> bool {
  let Some(rest) = value.strip_prefix("https://") else {
    return false;
  };
  !rest.is_empty() && !rest.starts_with('/') && !value.contains(char::is_whitespace)
}

/// Validator for the general settings page: identifier and display name.
pub fn validate_general_settings(values: &FieldValues) -> ErrorMap {
  let mut errors = ErrorMap::new();

  match values.text(FIELD_IDENTIFIER).filter(|t| !t.is_empty()) {
    None => errors.insert(FIELD_IDENTIFIER, "identifier.required"),
    Some(identifier) if !IDENTIFIER_REGEX.is_match(identifier) => {
      errors.insert(FIELD_IDENTIFIER, "identifier.invalid");
    }
    Some(_) => {}
  }

  match values.text(FIELD_DISPLAY_NAME).filter(|t| !t.is_empty()) {
    None => errors.insert(FIELD_DISPLAY_NAME, "displayName.required"),
    Some(display_name) if !DISPLAY_NAME_REGEX.is_match(display_name) => {
      errors.insert(FIELD_DISPLAY_NAME, "displayName.invalid");
    }
    Some(_) => {}
  }

  errors
}

/// Validator for the endpoint configuration page.
///
/// The required properties depend on the authentication type selected on
/// this page, which is why the validator reads the full snapshot rather
/// than a fixed field list.
pub fn validate_endpoint_configuration(values: &FieldValues) -> ErrorMap {
  let mut errors = ErrorMap::new();

  match values.text(FIELD_ENDPOINT_URI).filter(|t| !t.is_empty()) {
    None => errors.insert(FIELD_ENDPOINT_URI, "endpointUri.required"),
    Some(uri) if !is_https_url(uri) => {
      errors.insert(FIELD_ENDPOINT_URI, "endpointUri.invalid");
    }
    Some(_) => {}
  }

  let auth_type = values
    .text(FIELD_AUTHENTICATION_TYPE)
    .filter(|t| !t.is_empty())
    .and_then(|t| AuthenticationType::parse(t).ok());

  let Some(auth_type) = auth_type else {
    errors.insert(FIELD_AUTHENTICATION_TYPE, "authenticationType.required");
    return errors;
  };

  match auth_type {
    AuthenticationType::None => {}
    AuthenticationType::Basic => {
      // Either property present requires both.
      if !values.is_blank(FIELD_USERNAME) || !values.is_blank(FIELD_PASSWORD) {
        if values.is_blank(FIELD_USERNAME) {
          errors.insert(FIELD_USERNAME, "username.required");
        }
        if values.is_blank(FIELD_PASSWORD) {
          errors.insert(FIELD_PASSWORD, "password.required");
        }
      }
    }
    AuthenticationType::Bearer => {
      if values.is_blank(FIELD_ACCESS_TOKEN) {
        errors.insert(FIELD_ACCESS_TOKEN, "accessToken.required");
      }
    }
    AuthenticationType::ApiKey => {
      if !values.is_blank(FIELD_HEADER) || !values.is_blank(FIELD_VALUE) {
        match values.text(FIELD_HEADER).filter(|t| !t.is_empty()) {
          None => errors.insert(FIELD_HEADER, "header.required"),
          Some(header) if !API_KEY_HEADER_REGEX.is_match(header) => {
            errors.insert(FIELD_HEADER, "header.invalid");
          }
          Some(_) => {}
        }
        if values.is_blank(FIELD_VALUE) {
          errors.insert(FIELD_VALUE, "value.required");
        }
      }
    }
  }

  errors
}

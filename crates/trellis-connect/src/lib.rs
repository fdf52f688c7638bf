//! Trellis Connect
//!
//! The connector domain on top of the wizard core: the custom
//! authenticator creation wizard. Each connector kind resolves at
//! configuration time to its page list and payload assembler, so no
//! runtime string dispatch is involved in picking a wizard variant.
//!
//! The crate covers:
//! - endpoint authentication types and their per-type properties
//! - per-page validators for the create wizard
//! - assembly of the backend request payloads
//! - classification of REST failures into alertable submit failures
//! - the debounced connection-name availability check

mod authentication;
mod classify;
mod error;
mod name_check;
mod payload;
mod validate;
mod variant;

pub use authentication::{
  AuthenticationType, Endpoint, EndpointAuthentication, FIELD_ACCESS_TOKEN,
  FIELD_AUTHENTICATION_TYPE, FIELD_DISPLAY_NAME, FIELD_ENDPOINT_URI, FIELD_HEADER,
  FIELD_IDENTIFIER, FIELD_PASSWORD, FIELD_USERNAME, FIELD_VALUE,
};
pub use classify::{
  ApiErrorBody, DUPLICATE_ERROR_CODE, LIMIT_REACHED_ERROR_CODE, classify_create_failure,
};
pub use error::ConnectError;
pub use name_check::NameAvailabilityChecker;
pub use payload::{
  ConnectorPayload, CustomLocalAuthenticatorPayload, FederatedAuthenticator,
  FederatedAuthenticators, IDENTIFIER_PREFIX, IdentityProviderPayload, encoded_authenticator_id,
};
pub use validate::{validate_endpoint_configuration, validate_general_settings};
pub use variant::ConnectorKind;

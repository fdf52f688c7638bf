//! Assembly of backend request payloads from completed wizard values.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use trellis_form::FieldValues;

use crate::authentication::{
  AuthenticationType, Endpoint, EndpointAuthentication, FIELD_AUTHENTICATION_TYPE,
  FIELD_DISPLAY_NAME, FIELD_ENDPOINT_URI, FIELD_IDENTIFIER,
};
use crate::error::ConnectError;

/// Prefix applied to every custom authenticator identifier before it is
/// sent to the backend.
pub const IDENTIFIER_PREFIX: &str = "custom-";

/// The authenticator id the backend expects: the prefixed identifier,
/// Base64-encoded.
pub fn encoded_authenticator_id(identifier: &str) -> String {
  BASE64.encode(format!("{IDENTIFIER_PREFIX}{identifier}"))
}

/// One federated authenticator entry of an identity provider payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedAuthenticator {
  pub authenticator_id: String,
  pub is_enabled: bool,
  pub endpoint: Endpoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedAuthenticators {
  pub default_authenticator_id: String,
  pub authenticators: Vec<FederatedAuthenticator>,
}

/// Create request for an external (federated) custom authenticator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProviderPayload {
  pub template_id: String,
  pub name: String,
  pub federated_authenticators: FederatedAuthenticators,
}

/// Create request for a custom local authenticator (internal user or
/// two-factor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomLocalAuthenticatorPayload {
  pub name: String,
  pub display_name: String,
  pub is_enabled: bool,
  pub endpoint: Endpoint,
}

/// The assembled request for whichever connector kind was selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConnectorPayload {
  IdentityProvider(IdentityProviderPayload),
  LocalAuthenticator(CustomLocalAuthenticatorPayload),
}

fn required<'a>(values: &'a FieldValues, field: &'static str) -> Result<&'a str, ConnectError> {
  values
    .text(field)
    .filter(|text| !text.is_empty())
    .ok_or(ConnectError::MissingField { field })
}

fn endpoint_from_values(values: &FieldValues) -> Result<Endpoint, ConnectError> {
  let auth_type = AuthenticationType::parse(required(values, FIELD_AUTHENTICATION_TYPE)?)?;
  Ok(Endpoint {
    uri: required(values, FIELD_ENDPOINT_URI)?.to_string(),
    authentication: EndpointAuthentication::from_values(auth_type, values),
  })
}

/// Assemble the identity provider payload for an external authenticator.
pub fn assemble_identity_provider(
  values: &FieldValues,
  template_id: &str,
) -> Result<IdentityProviderPayload, ConnectError> {
  let identifier = required(values, FIELD_IDENTIFIER)?;
  let authenticator_id = encoded_authenticator_id(identifier);

  Ok(IdentityProviderPayload {
    template_id: template_id.to_string(),
    name: required(values, FIELD_DISPLAY_NAME)?.to_string(),
    federated_authenticators: FederatedAuthenticators {
      default_authenticator_id: authenticator_id.clone(),
      authenticators: vec![FederatedAuthenticator {
        authenticator_id,
        is_enabled: true,
        endpoint: endpoint_from_values(values)?,
      }],
    },
  })
}

/// Assemble the payload for a custom local authenticator.
pub fn assemble_local_authenticator(
  values: &FieldValues,
) -> Result<CustomLocalAuthenticatorPayload, ConnectError> {
  let identifier = required(values, FIELD_IDENTIFIER)?;

  Ok(CustomLocalAuthenticatorPayload {
    name: format!("{IDENTIFIER_PREFIX}{identifier}"),
    display_name: required(values, FIELD_DISPLAY_NAME)?.to_string(),
    is_enabled: true,
    endpoint: endpoint_from_values(values)?,
  })
}

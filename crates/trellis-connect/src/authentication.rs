//! Endpoint authentication types and their wizard fields.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use trellis_form::FieldValues;

use crate::error::ConnectError;

// Wizard field names. Globally unique across all pages of the
// authenticator create wizard.
pub const FIELD_IDENTIFIER: &str = "identifier";
pub const FIELD_DISPLAY_NAME: &str = "displayName";
pub const FIELD_ENDPOINT_URI: &str = "endpointUri";
pub const FIELD_AUTHENTICATION_TYPE: &str = "authenticationType";
pub const FIELD_USERNAME: &str = "usernameAuthProperty";
pub const FIELD_PASSWORD: &str = "passwordAuthProperty";
pub const FIELD_ACCESS_TOKEN: &str = "accessTokenAuthProperty";
pub const FIELD_HEADER: &str = "headerAuthProperty";
pub const FIELD_VALUE: &str = "valueAuthProperty";

/// How the IAM server authenticates against the authenticator's
/// external endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthenticationType {
  None,
  Basic,
  Bearer,
  ApiKey,
}

impl AuthenticationType {
  /// Parse the wizard's dropdown value.
  pub fn parse(value: &str) -> Result<Self, ConnectError> {
    match value {
      "NONE" => Ok(AuthenticationType::None),
      "BASIC" => Ok(AuthenticationType::Basic),
      "BEARER" => Ok(AuthenticationType::Bearer),
      "API_KEY" => Ok(AuthenticationType::ApiKey),
      other => Err(ConnectError::UnknownAuthenticationType {
        value: other.to_string(),
      }),
    }
  }

  /// The wizard fields that belong to this authentication type, paired
  /// with the property key the backend expects.
  pub fn property_fields(&self) -> &'static [(&'static str, &'static str)] {
    match self {
      AuthenticationType::None => &[],
      AuthenticationType::Basic => &[(FIELD_USERNAME, "username"), (FIELD_PASSWORD, "password")],
      AuthenticationType::Bearer => &[(FIELD_ACCESS_TOKEN, "accessToken")],
      AuthenticationType::ApiKey => &[(FIELD_HEADER, "header"), (FIELD_VALUE, "value")],
    }
  }
}

/// The authentication block of an endpoint payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointAuthentication {
  #[serde(rename = "type")]
  pub auth_type: AuthenticationType,
  pub properties: HashMap<String, String>,
}

impl EndpointAuthentication {
  /// Build the properties for the selected type from the wizard values.
  ///
  /// Only the selected type's fields are read; properties belonging to a
  /// previously selected, then abandoned type are dropped rather than
  /// carried as stale keys.
  pub fn from_values(auth_type: AuthenticationType, values: &FieldValues) -> Self {
    let properties = auth_type
      .property_fields()
      .iter()
      .filter_map(|(field, property)| {
        values
          .text(field)
          .filter(|text| !text.is_empty())
          .map(|text| (property.to_string(), text.to_string()))
      })
      .collect();
    Self {
      auth_type,
      properties,
    }
  }
}

/// The external endpoint block of a connector payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
  pub uri: String,
  pub authentication: EndpointAuthentication,
}

//! Connector kinds and their wizard wiring.

use serde::{Deserialize, Serialize};
use trellis_form::FieldValues;
use trellis_wizard::WizardPage;

use crate::error::ConnectError;
use crate::payload::{
  ConnectorPayload, assemble_identity_provider, assemble_local_authenticator,
};
use crate::validate::{validate_endpoint_configuration, validate_general_settings};

/// The connector kinds the custom authenticator wizard can create.
///
/// The kind is chosen once, when the wizard is configured; each kind
/// carries its own page list and payload assembler, so no string
/// dispatch happens after configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectorKind {
  /// Federated authenticator calling an external endpoint; creates an
  /// identity provider resource.
  External,
  /// Custom local authenticator for internal users.
  InternalUser,
  /// Custom local authenticator used as a second factor.
  TwoFactor,
}

impl ConnectorKind {
  /// The connection template this kind instantiates on the backend.
  pub fn template_id(&self) -> &'static str {
    match self {
      ConnectorKind::External => "external-custom-authenticator",
      ConnectorKind::InternalUser => "internal-user-custom-authenticator",
      ConnectorKind::TwoFactor => "two-factor-custom-authenticator",
    }
  }

  /// The wizard pages for this kind, in order. All kinds share the same
  /// two-page flow: general settings, then endpoint configuration.
  pub fn pages(&self) -> Vec<WizardPage> {
    vec![
      WizardPage::new("general-settings", validate_general_settings),
      WizardPage::new("configuration", validate_endpoint_configuration),
    ]
  }

  /// Assemble the create request for this kind from a completed value
  /// snapshot.
  pub fn assemble(&self, values: &FieldValues) -> Result<ConnectorPayload, ConnectError> {
    match self {
      ConnectorKind::External => Ok(ConnectorPayload::IdentityProvider(
        assemble_identity_provider(values, self.template_id())?,
      )),
      ConnectorKind::InternalUser | ConnectorKind::TwoFactor => Ok(
        ConnectorPayload::LocalAuthenticator(assemble_local_authenticator(values)?),
      ),
    }
  }
}

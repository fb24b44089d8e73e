//! Platform API environments.

use serde::{Deserialize, Serialize};

use super::NamedEnvironment;

/// One entry of the platform document's `environments[]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiEnvironment {
    /// Environment name, e.g. `production`.
    pub name: String,
    /// Base URL of the REST API, including any version prefix.
    pub api_endpoint: String,
    /// Authentication hints.
    pub auth: AuthConfig,
    /// Path to a kubeconfig for this environment. Parsed, never used.
    pub kubeconfig: String,
    /// Whether this environment is used when none is named.
    pub default: bool,
}

/// Authentication hints for an API environment.
///
/// The client always authenticates with the bearer token from
/// [`API_KEY_ENV`](crate::constants::API_KEY_ENV); these fields are kept so
/// documents written for other tooling decode without loss.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Authentication scheme name.
    #[serde(rename = "type")]
    pub kind: String,
    /// Variable naming an API key.
    pub api_key_env: String,
    /// Variable naming an OAuth client id.
    pub client_id_env: String,
    /// Variable naming an OAuth client secret.
    pub client_secret_env: String,
}

impl NamedEnvironment for ApiEnvironment {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_default(&self) -> bool {
        self.default
    }
}

//! MySQL environments.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::NamedEnvironment;

/// One entry of the MySQL document's `environments[]`.
///
/// Durations are kept as the strings found in the document; the store
/// parses them when it builds the pool so a malformed value surfaces as a
/// configuration error at connect time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseEnvironment {
    /// Environment name, e.g. `production`.
    pub name: String,
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Database (schema) name.
    pub database: String,
    /// Variable holding the user name.
    pub username_env: String,
    /// Variable holding the password.
    pub password_env: String,
    /// Legacy pool size, used when `max_open_connections` is zero.
    pub max_connections: u32,
    /// Pool acquisition timeout, e.g. `10s`.
    pub connection_timeout: String,
    /// Read timeout. Decoded but not applied by the driver.
    pub read_timeout: String,
    /// Write timeout. Decoded but not applied by the driver.
    pub write_timeout: String,
    /// Connections kept warm in the pool.
    #[serde(rename = "max_idle_connections")]
    pub max_idle_conns: u32,
    /// Upper bound on pooled connections.
    #[serde(rename = "max_open_connections")]
    pub max_open_conns: u32,
    /// Maximum lifetime of a pooled connection, e.g. `1h`.
    #[serde(rename = "connection_max_lifetime")]
    pub conn_max_lifetime: String,
    /// TLS requirement.
    pub ssl_mode: SslMode,
    /// CA certificate path.
    pub ssl_ca: Option<String>,
    /// Client certificate path.
    pub ssl_cert: Option<String>,
    /// Client key path.
    pub ssl_key: Option<String>,
    /// Whether this environment is used when none is named.
    pub default: bool,
}

impl NamedEnvironment for DatabaseEnvironment {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_default(&self) -> bool {
        self.default
    }
}

/// TLS requirement for a database environment.
///
/// Spelled the libpq way in documents (`disable`, `prefer`, `require`,
/// `verify-ca`, `verify-full`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
    /// Never use TLS.
    #[default]
    #[serde(alias = "disabled")]
    Disable,
    /// Use TLS when the server offers it.
    #[serde(alias = "preferred")]
    Prefer,
    /// Require TLS without certificate verification.
    #[serde(alias = "required")]
    Require,
    /// Require TLS and verify the server certificate chain.
    VerifyCa,
    /// Require TLS and verify chain and host name.
    VerifyFull,
}

impl SslMode {
    /// Returns `true` when the mode demands an encrypted connection.
    #[must_use]
    pub const fn requires_encryption(self) -> bool {
        matches!(self, Self::Require | Self::VerifyCa | Self::VerifyFull)
    }
}

impl fmt::Display for SslMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Disable => "disable",
            Self::Prefer => "prefer",
            Self::Require => "require",
            Self::VerifyCa => "verify-ca",
            Self::VerifyFull => "verify-full",
        })
    }
}

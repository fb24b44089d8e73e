//! Unified error type for the Deckhand workspace.
//!
//! Every fallible operation in the HTTP client, the MySQL store and the
//! config loader returns [`DeckhandError`]. Callers that need to branch on
//! the failure class use [`DeckhandError::kind`] instead of matching on
//! message text.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a [`DeckhandError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or invalid configuration, including unset credentials.
    Config,
    /// A local file could not be read.
    Io,
    /// A YAML or JSON document could not be decoded.
    Parse,
    /// The target environment, row or remote resource does not exist.
    NotFound,
    /// The database or API could not be reached.
    Connection,
    /// An insert was rejected, typically by a constraint violation.
    Write,
    /// A statement was rejected by the database for another reason.
    Query,
    /// The remote API answered with a non-200 status.
    Api,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Config => "config",
            Self::Io => "io",
            Self::Parse => "parse",
            Self::NotFound => "not_found",
            Self::Connection => "connection",
            Self::Write => "write",
            Self::Query => "query",
            Self::Api => "api",
        };
        f.write_str(name)
    }
}

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum DeckhandError {
    /// A configuration value is missing or invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A YAML document could not be decoded.
    #[error("malformed YAML document: {source}")]
    Yaml {
        /// Underlying YAML error.
        #[from]
        source: serde_yaml::Error,
    },

    /// A JSON body could not be encoded or decoded.
    #[error("malformed JSON: {source}")]
    Json {
        /// Underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// The database or API endpoint is unreachable.
    #[error("connection failed: {message}")]
    Connection {
        /// Description of the connection failure.
        message: String,
    },

    /// An insert was rejected by the database.
    #[error("write rejected: {message}")]
    Write {
        /// Database-reported reason.
        message: String,
    },

    /// A query or update statement failed.
    #[error("query failed: {message}")]
    Query {
        /// Database-reported reason.
        message: String,
    },

    /// The remote API returned a non-200 response.
    #[error("API error: {}", api_summary(.code.as_deref(), .message))]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Machine-readable error code from the error envelope, if decodable.
        code: Option<String>,
        /// Error message from the envelope, or the raw HTTP status line.
        message: String,
        /// Free-form details from the envelope.
        details: Option<serde_json::Value>,
    },
}

fn api_summary(code: Option<&str>, message: &str) -> String {
    match code {
        Some(code) => format!("{code} - {message}"),
        None => message.to_string(),
    }
}

impl DeckhandError {
    /// Builds a [`DeckhandError::Config`] from any message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns the classification of this error.
    ///
    /// API failures answered with HTTP 404 or carrying the `NOT_FOUND` code
    /// classify as [`ErrorKind::NotFound`]; the remote code and message are
    /// still available on the variant.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config { .. } => ErrorKind::Config,
            Self::Io { .. } => ErrorKind::Io,
            Self::Yaml { .. } | Self::Json { .. } => ErrorKind::Parse,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Connection { .. } => ErrorKind::Connection,
            Self::Write { .. } => ErrorKind::Write,
            Self::Query { .. } => ErrorKind::Query,
            Self::Api { status, code, .. } => {
                if *status == 404 || code.as_deref() == Some("NOT_FOUND") {
                    ErrorKind::NotFound
                } else {
                    ErrorKind::Api
                }
            }
        }
    }

    /// Returns `true` when the error denotes a missing resource.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, DeckhandError>;

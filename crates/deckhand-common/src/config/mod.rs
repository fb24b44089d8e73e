//! Environment configuration documents.
//!
//! Both the platform API and the MySQL store are configured by YAML
//! documents that share one envelope:
//!
//! ```yaml
//! apiVersion: v1
//! kind: PlatformConfig
//! metadata: { name: example, version: "1.0" }
//! environments: [...]
//! defaults: { charset: utf8mb4, collation: utf8mb4_unicode_ci, timezone: UTC }
//! tables: [...]
//! ```
//!
//! The shape of each `environments[]` entry differs between the two
//! documents, so [`ConfigDocument`] is generic over it. Decoding is purely
//! structural: absent fields take their zero value.

pub mod api;
pub mod database;
pub mod schema;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{DeckhandError, Result};

pub use self::api::{ApiEnvironment, AuthConfig};
pub use self::database::{DatabaseEnvironment, SslMode};
pub use self::schema::{ColumnSchema, ForeignKey, TableSchema};

/// Document holding API environments.
pub type PlatformConfig = ConfigDocument<ApiEnvironment>;

/// Document holding MySQL environments and table hints.
pub type DatabaseConfig = ConfigDocument<DatabaseEnvironment>;

/// An entry of `environments[]` that can be selected by name or default flag.
pub trait NamedEnvironment {
    /// Name used to select this environment.
    fn name(&self) -> &str;

    /// Whether this entry is selected when no name is given.
    fn is_default(&self) -> bool;
}

/// Document name and version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Document name.
    pub name: String,
    /// Document version.
    pub version: String,
}

/// Session defaults applied to every database connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Connection character set, e.g. `utf8mb4`.
    pub charset: String,
    /// Connection collation, e.g. `utf8mb4_unicode_ci`.
    pub collation: String,
    /// Time zone of the writing application, e.g. `UTC` or `Asia/Shanghai`.
    /// Decoded only; database sessions always run at `+00:00`.
    pub timezone: String,
}

/// A loaded configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "E: Deserialize<'de>"))]
pub struct ConfigDocument<E> {
    /// Schema version of the document.
    #[serde(rename = "apiVersion", default)]
    pub api_version: String,
    /// Document kind.
    #[serde(default)]
    pub kind: String,
    /// Document metadata.
    #[serde(default)]
    pub metadata: Metadata,
    /// Named environments.
    #[serde(default = "Vec::new")]
    pub environments: Vec<E>,
    /// Connection defaults.
    #[serde(default)]
    pub defaults: Defaults,
    /// Table and column hints.
    #[serde(default)]
    pub tables: Vec<TableSchema>,
}

impl<E> Default for ConfigDocument<E> {
    fn default() -> Self {
        Self {
            api_version: String::new(),
            kind: String::new(),
            metadata: Metadata::default(),
            environments: Vec::new(),
            defaults: Defaults::default(),
            tables: Vec::new(),
        }
    }
}

impl<E: DeserializeOwned> ConfigDocument<E> {
    /// Reads and decodes a document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`DeckhandError::Io`] if the file cannot be read and
    /// [`DeckhandError::Yaml`] if it is not a structurally valid document.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading configuration");
        let content = std::fs::read_to_string(path).map_err(|e| DeckhandError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Decodes a document from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`DeckhandError::Yaml`] if the text is malformed.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

impl<E: NamedEnvironment> ConfigDocument<E> {
    /// Returns the environment called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DeckhandError::NotFound`] if no entry has that name.
    pub fn environment(&self, name: &str) -> Result<&E> {
        self.environments
            .iter()
            .find(|e| e.name() == name)
            .ok_or_else(|| DeckhandError::NotFound {
                kind: "environment",
                id: name.to_string(),
            })
    }

    /// Returns the first environment flagged `default: true`.
    ///
    /// # Errors
    ///
    /// Returns [`DeckhandError::NotFound`] if no entry is flagged.
    pub fn default_environment(&self) -> Result<&E> {
        self.environments
            .iter()
            .find(|e| e.is_default())
            .ok_or_else(|| DeckhandError::NotFound {
                kind: "default environment",
                id: "<none flagged>".to_string(),
            })
    }

    /// Resolves `name` if given, the default environment otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`DeckhandError::NotFound`] if the requested entry is absent.
    pub fn select(&self, name: Option<&str>) -> Result<&E> {
        match name {
            Some(name) => self.environment(name),
            None => self.default_environment(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::ErrorKind;

    const PLATFORM_YAML: &str = r#"
apiVersion: v1
kind: PlatformConfig
metadata:
  name: platform
  version: "2.1"
environments:
  - name: development
    api_endpoint: https://dev.example.com/api/v1
    auth:
      type: api_key
      api_key_env: DEV_API_KEY
  - name: production
    api_endpoint: https://prod.example.com/api/v1
    default: true
  - name: staging
    api_endpoint: https://staging.example.com/api/v1
"#;

    #[test]
    fn resolves_every_environment_by_name() {
        let config = PlatformConfig::from_yaml(PLATFORM_YAML).unwrap();
        for (name, endpoint) in [
            ("development", "https://dev.example.com/api/v1"),
            ("production", "https://prod.example.com/api/v1"),
            ("staging", "https://staging.example.com/api/v1"),
        ] {
            assert_eq!(config.environment(name).unwrap().api_endpoint, endpoint);
        }
    }

    #[test]
    fn select_without_name_returns_default() {
        let config = PlatformConfig::from_yaml(PLATFORM_YAML).unwrap();
        assert_eq!(config.select(None).unwrap().name, "production");
    }

    #[test]
    fn missing_default_is_not_found() {
        let yaml = "environments:\n  - name: dev\n    api_endpoint: http://localhost\n";
        let config = PlatformConfig::from_yaml(yaml).unwrap();
        let err = config.default_environment().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn unknown_environment_is_not_found() {
        let config = PlatformConfig::from_yaml(PLATFORM_YAML).unwrap();
        let err = config.environment("qa").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("qa"));
    }

    #[test]
    fn absent_fields_take_zero_values() {
        let config = PlatformConfig::from_yaml("environments:\n  - name: bare\n").unwrap();
        let env = config.environment("bare").unwrap();
        assert!(env.api_endpoint.is_empty());
        assert!(!env.default);
        assert!(config.api_version.is_empty());
        assert!(config.tables.is_empty());
    }

    #[test]
    fn metadata_and_kind_are_decoded() {
        let config = PlatformConfig::from_yaml(PLATFORM_YAML).unwrap();
        assert_eq!(config.api_version, "v1");
        assert_eq!(config.kind, "PlatformConfig");
        assert_eq!(config.metadata.version, "2.1");
    }

    #[test]
    fn malformed_document_is_parse_error() {
        let err = PlatformConfig::from_yaml("environments: {name: [").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn wrong_field_type_is_parse_error() {
        let err = DatabaseConfig::from_yaml("environments:\n  - name: x\n    port: lots\n")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
        file.write_all(PLATFORM_YAML.as_bytes()).expect("write failed");
        let config = PlatformConfig::load(file.path()).expect("load failed");
        assert_eq!(config.environments.len(), 3);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let err = PlatformConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}

//! Rows of the `containers` and `deployments` tables.

use std::collections::BTreeMap;

use chrono::{DateTime, SubsecRound, Utc};
use deckhand_common::error::{DeckhandError, Result};
use deckhand_common::types::{ContainerId, ContainerStatus, DeploymentId, DeploymentStatus};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of `containers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// Primary key.
    pub id: ContainerId,
    /// Container name.
    pub name: String,
    /// Image reference.
    pub image: String,
    /// Lifecycle status.
    pub status: ContainerStatus,
    /// Creation time, second precision.
    pub created_at: DateTime<Utc>,
    /// Labels, stored as a JSON object.
    pub labels: BTreeMap<String, String>,
}

impl ContainerRecord {
    /// A freshly created record with a generated id.
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: ContainerId::generate(),
            name: name.into(),
            image: image.into(),
            status: ContainerStatus::Created,
            created_at: Utc::now().trunc_subsecs(0),
            labels: BTreeMap::new(),
        }
    }

    /// Labels encoded for the `labels` column.
    pub(crate) fn labels_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.labels)?)
    }
}

/// A row of `deployments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// Primary key.
    pub id: DeploymentId,
    /// Deployment name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Lifecycle status.
    pub status: DeploymentStatus,
    /// Target environment.
    pub environment: String,
    /// Creation time, second precision.
    pub created_at: DateTime<Utc>,
    /// Version tag.
    pub version: String,
    /// Desired replica count.
    pub replicas: u32,
}

impl DeploymentRecord {
    /// A freshly created record with a generated id and one replica.
    pub fn new(
        name: impl Into<String>,
        environment: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            id: DeploymentId::generate(),
            name: name.into(),
            description: String::new(),
            status: DeploymentStatus::Created,
            environment: environment.into(),
            created_at: Utc::now().trunc_subsecs(0),
            version: version.into(),
            replicas: 1,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct ContainerRow {
    id: String,
    name: String,
    image: String,
    status: String,
    created_at: DateTime<Utc>,
    labels: Option<String>,
}

impl TryFrom<ContainerRow> for ContainerRecord {
    type Error = DeckhandError;

    fn try_from(row: ContainerRow) -> Result<Self> {
        let labels = match row.labels.as_deref().map(str::trim) {
            None | Some("" | "null") => BTreeMap::new(),
            Some(json) => serde_json::from_str(json)?,
        };
        Ok(Self {
            id: ContainerId::new(row.id),
            name: row.name,
            image: row.image,
            status: row.status.parse().unwrap_or_default(),
            created_at: row.created_at,
            labels,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct DeploymentRow {
    id: String,
    name: String,
    description: Option<String>,
    status: String,
    environment: String,
    created_at: DateTime<Utc>,
    version: String,
    replicas: i64,
}

impl TryFrom<DeploymentRow> for DeploymentRecord {
    type Error = DeckhandError;

    fn try_from(row: DeploymentRow) -> Result<Self> {
        let replicas = u32::try_from(row.replicas).map_err(|_| DeckhandError::Query {
            message: format!("deployment {} has invalid replica count {}", row.id, row.replicas),
        })?;
        Ok(Self {
            id: DeploymentId::new(row.id),
            name: row.name,
            description: row.description.unwrap_or_default(),
            status: row.status.parse().unwrap_or_default(),
            environment: row.environment,
            created_at: row.created_at,
            version: row.version,
            replicas,
        })
    }
}

#[cfg(test)]
mod tests {
    use deckhand_common::error::ErrorKind;

    use super::*;

    fn container_row(labels: Option<&str>) -> ContainerRow {
        ContainerRow {
            id: "c7d8".into(),
            name: "web-server-1".into(),
            image: "nginx:latest".into(),
            status: "RUNNING".into(),
            created_at: Utc::now(),
            labels: labels.map(str::to_string),
        }
    }

    #[test]
    fn container_row_decodes_labels_and_status() {
        let record =
            ContainerRecord::try_from(container_row(Some(r#"{"app":"web","tier":"frontend"}"#)))
                .unwrap();
        assert_eq!(record.status, ContainerStatus::Running);
        assert_eq!(record.labels["tier"], "frontend");
    }

    #[test]
    fn null_or_empty_labels_decode_to_empty_map() {
        for labels in [None, Some(""), Some("null")] {
            let record = ContainerRecord::try_from(container_row(labels)).unwrap();
            assert!(record.labels.is_empty());
        }
    }

    #[test]
    fn malformed_labels_are_parse_errors() {
        let err = ContainerRecord::try_from(container_row(Some("{app"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn unknown_status_decodes_to_unknown() {
        let row = DeploymentRow {
            id: "d1".into(),
            name: "web-frontend".into(),
            description: None,
            status: "rolling-back".into(),
            environment: "production".into(),
            created_at: Utc::now(),
            version: "v2.3.1".into(),
            replicas: 3,
        };
        let record = DeploymentRecord::try_from(row).unwrap();
        assert_eq!(record.status, DeploymentStatus::Unknown);
        assert!(record.description.is_empty());
        assert_eq!(record.replicas, 3);
    }

    #[test]
    fn negative_replicas_are_rejected() {
        let row = DeploymentRow {
            id: "d1".into(),
            name: String::new(),
            description: None,
            status: "active".into(),
            environment: String::new(),
            created_at: Utc::now(),
            version: String::new(),
            replicas: -1,
        };
        assert_eq!(
            DeploymentRecord::try_from(row).unwrap_err().kind(),
            ErrorKind::Query
        );
    }

    #[test]
    fn new_records_have_generated_ids() {
        let record = ContainerRecord::new("web", "nginx:latest");
        assert_eq!(record.id.as_str().len(), 32);
        assert_eq!(record.status, ContainerStatus::Created);
        assert_eq!(record.created_at.timestamp_subsec_nanos(), 0);
    }
}

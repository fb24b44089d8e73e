//! Domain primitive types shared by the HTTP client and the MySQL store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique identifier for a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a new container ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a random container ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when no identifier has been assigned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentId(String);

impl DeploymentId {
    /// Creates a new deployment ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a random deployment ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when no identifier has been assigned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DeploymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a container.
///
/// The platform drives containers through
/// `creating -> starting -> running -> stopping -> stopped`, and a deleted
/// container reports `deleted` in the delete response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerStatus {
    /// The platform accepted the create request.
    Creating,
    /// The container exists but was never started.
    Created,
    /// A start request is in progress.
    Starting,
    /// The container is running.
    Running,
    /// The container is paused.
    Paused,
    /// A restart request is in progress.
    Restarting,
    /// A stop request is in progress.
    Stopping,
    /// The container has stopped.
    Stopped,
    /// The container has been removed.
    Deleted,
    /// The container failed.
    Failed,
    /// A status this client does not recognize.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ContainerStatus {
    /// Returns the lowercase wire and column representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Creating => "creating",
            Self::Created => "created",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Restarting => "restarting",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::Deleted => "deleted",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "creating" => Self::Creating,
            "created" => Self::Created,
            "starting" => Self::Starting,
            "running" => Self::Running,
            "paused" => Self::Paused,
            "restarting" => Self::Restarting,
            "stopping" => Self::Stopping,
            "stopped" => Self::Stopped,
            "deleted" => Self::Deleted,
            "failed" => Self::Failed,
            _ => Self::Unknown,
        })
    }
}

/// Lifecycle state of a deployment.
///
/// Deployments move `created -> active -> deleted`; the replica count is
/// mutated independently of this status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    /// The deployment record exists but has not rolled out.
    Created,
    /// A rollout is queued.
    Pending,
    /// The deployment is serving.
    Active,
    /// A new version is rolling out.
    Updating,
    /// The replica count is changing.
    Scaling,
    /// The rollout failed.
    Failed,
    /// The deployment has been removed.
    Deleted,
    /// A status this client does not recognize.
    #[default]
    #[serde(other)]
    Unknown,
}

impl DeploymentStatus {
    /// Returns the lowercase wire and column representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Updating => "updating",
            Self::Scaling => "scaling",
            Self::Failed => "failed",
            Self::Deleted => "deleted",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "created" => Self::Created,
            "pending" => Self::Pending,
            "active" => Self::Active,
            "updating" => Self::Updating,
            "scaling" => Self::Scaling,
            "failed" => Self::Failed,
            "deleted" => Self::Deleted,
            _ => Self::Unknown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_and_hex() {
        let a = ContainerId::generate();
        let b = ContainerId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn container_status_parses_case_insensitively() {
        assert_eq!("RUNNING".parse::<ContainerStatus>(), Ok(ContainerStatus::Running));
        assert_eq!("stopping".parse::<ContainerStatus>(), Ok(ContainerStatus::Stopping));
    }

    #[test]
    fn unrecognized_status_decodes_to_unknown() {
        let status: ContainerStatus = serde_json::from_str("\"hibernating\"").unwrap();
        assert_eq!(status, ContainerStatus::Unknown);
        assert_eq!("rolling-back".parse::<DeploymentStatus>(), Ok(DeploymentStatus::Unknown));
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&DeploymentStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(ContainerStatus::Creating.to_string(), "creating");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = DeploymentId::new("d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6");
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6\""
        );
    }
}

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use deckhand_common::types::{ContainerId, ContainerStatus};
use serde::{Deserialize, Serialize};

use super::EnvVar;

/// A container as reported or accepted by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Container {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "ContainerId::is_empty")]
    pub id: ContainerId,
    /// Container name.
    pub name: String,
    /// Image reference, e.g. `nginx:latest`.
    pub image: String,
    /// Lifecycle status; omitted from create requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContainerStatus>,
    /// Creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Time the container last started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Free-form labels.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Published ports.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortMapping>,
    /// Bind mounts.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<VolumeMount>,
    /// Network attachment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkAttachment>,
    /// Configured limits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_limits: Option<ResourceLimits>,
    /// Observed usage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_usage: Option<ResourceUsage>,
    /// Environment variables.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub environment_variables: Vec<EnvVar>,
    /// Last health check result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthStatus>,
    /// URL of the log endpoint.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub logs_url: String,
    /// Informational message attached to mutation responses.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl Container {
    /// Creates a create-request body for `name` running `image`.
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            ..Self::default()
        }
    }

    /// Adds a label.
    #[must_use]
    pub fn label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.labels.insert(key.into(), value.into());
        self
    }
}

/// A published port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortMapping {
    /// Port inside the container.
    pub internal: u16,
    /// Port on the host.
    pub external: u16,
    /// `tcp` or `udp`.
    pub protocol: String,
}

/// A bind mount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeMount {
    /// Source path on the host.
    pub host_path: String,
    /// Target path in the container.
    pub container_path: String,
    /// `ro` or `rw`.
    pub mode: String,
}

/// Network the container is attached to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkAttachment {
    /// Network name.
    pub name: String,
    /// Address assigned on that network.
    pub ip_address: String,
}

/// Configured CPU and memory limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceLimits {
    /// CPU limit, e.g. `1.0`.
    pub cpu: String,
    /// Memory limit, e.g. `512MB`.
    pub memory: String,
}

/// Observed resource usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceUsage {
    /// CPU in use.
    pub cpu: String,
    /// Memory in use.
    pub memory: String,
    /// Inbound network rate.
    pub network_rx: String,
    /// Outbound network rate.
    pub network_tx: String,
}

/// Health check configuration and last result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    /// `healthy`, `unhealthy`, ...
    pub status: String,
    /// Time of the last probe.
    pub last_checked: Option<DateTime<Utc>>,
    /// Probed URL.
    pub endpoint: String,
    /// Probe interval, e.g. `30s`.
    pub interval: String,
    /// Probe timeout, e.g. `5s`.
    pub timeout: String,
    /// Failures tolerated before marking unhealthy.
    pub retries: u32,
}

/// One page of containers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerList {
    /// Total number of matching containers.
    pub total: u64,
    /// Page size applied by the server.
    pub limit: u32,
    /// Offset applied by the server.
    pub offset: u32,
    /// Containers on this page.
    pub containers: Vec<Container>,
}

/// Filters for listing containers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContainerQuery {
    /// Only containers in this status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContainerStatus>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Page offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Flags for deleting a container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteContainerOptions {
    /// Delete even if running.
    pub force: bool,
    /// Also remove the container's volumes.
    pub remove_volumes: bool,
}

impl DeleteContainerOptions {
    /// Query pairs for the flags that are set.
    pub(crate) fn query(self) -> Vec<(&'static str, &'static str)> {
        let mut pairs = Vec::new();
        if self.force {
            pairs.push(("force", "true"));
        }
        if self.remove_volumes {
            pairs.push(("remove_volumes", "true"));
        }
        pairs
    }
}

/// Filters for reading container logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogQuery {
    /// Number of trailing lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail: Option<u32>,
    /// Only entries at or after this ISO-8601 instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    /// Only entries before this ISO-8601 instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
    /// Ask the server to follow the stream.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub follow: bool,
}

/// Log entries for a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerLogs {
    /// Entries in chronological order.
    pub logs: Vec<LogEntry>,
}

/// One log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Time the line was written.
    pub timestamp: DateTime<Utc>,
    /// `stdout` or `stderr`.
    #[serde(default)]
    pub stream: String,
    /// Line content.
    #[serde(default)]
    pub message: String,
}

/// Body of an exec request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecRequest {
    /// Argument vector.
    pub command: Vec<String>,
    /// Capture standard output.
    pub attach_stdout: bool,
    /// Capture standard error.
    pub attach_stderr: bool,
}

impl ExecRequest {
    /// Builds a request capturing both streams, splitting `command` on
    /// whitespace.
    pub fn from_command_line(command: &str) -> Self {
        Self {
            command: command.split_whitespace().map(str::to_string).collect(),
            attach_stdout: true,
            attach_stderr: true,
        }
    }
}

/// Result of an exec request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecResult {
    /// Process exit code.
    pub exit_code: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body_omits_server_fields() {
        let body = Container::new("test-container", "ubuntu:latest").label("app", "test");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "test-container",
                "image": "ubuntu:latest",
                "labels": {"app": "test"}
            })
        );
    }

    #[test]
    fn partial_response_decodes_with_defaults() {
        let container: Container = serde_json::from_str(
            r#"{"id":"c7d8","status":"starting","message":"Container is starting"}"#,
        )
        .unwrap();
        assert_eq!(container.id.as_str(), "c7d8");
        assert_eq!(container.status, Some(ContainerStatus::Starting));
        assert!(container.name.is_empty());
        assert!(container.network.is_none());
    }

    #[test]
    fn exec_request_splits_command_line() {
        let req = ExecRequest::from_command_line("ls  -la /tmp");
        assert_eq!(req.command, vec!["ls", "-la", "/tmp"]);
        assert!(req.attach_stdout && req.attach_stderr);
    }

    #[test]
    fn delete_options_emit_only_set_flags() {
        let opts = DeleteContainerOptions {
            force: false,
            remove_volumes: true,
        };
        assert_eq!(opts.query(), vec![("remove_volumes", "true")]);
    }
}

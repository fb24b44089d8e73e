use chrono::{DateTime, Utc};
use deckhand_common::constants::DEFAULT_API_PAGE_SIZE;
use deckhand_common::types::{DeploymentId, DeploymentStatus};
use serde::{Deserialize, Serialize};

use super::EnvVar;

/// A deployment as reported or accepted by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deployment {
    /// Server-assigned identifier.
    #[serde(skip_serializing_if = "DeploymentId::is_empty")]
    pub id: DeploymentId,
    /// Deployment name.
    pub name: String,
    /// Free-text description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Lifecycle status; omitted from create requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DeploymentStatus>,
    /// Target environment name.
    pub environment: String,
    /// Creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Version tag, e.g. `v2.3.1`.
    pub version: String,
    /// Desired replica count.
    pub replicas: u32,
    /// Rollout strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<RolloutStrategy>,
    /// Container templates.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<ContainerSpec>,
    /// Exposed services.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<ServiceSpec>,
    /// Informational message attached to mutation responses.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// How new versions replace old replicas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolloutStrategy {
    /// Strategy name, e.g. `rolling-update`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Extra replicas allowed during a rollout.
    pub max_surge: u32,
    /// Replicas allowed to be unavailable during a rollout.
    pub max_unavailable: u32,
}

/// A container template inside a deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerSpec {
    /// Container name.
    pub name: String,
    /// Image reference.
    pub image: String,
    /// Named ports.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<SpecPort>,
    /// Requests and limits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
    /// Environment variables.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub environment_variables: Vec<EnvVar>,
    /// Readiness probe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthProbe>,
}

/// A named container port and the service port fronting it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecPort {
    /// Port name, e.g. `http`.
    pub name: String,
    /// Port inside the container.
    pub container_port: u16,
    /// Port on the service.
    pub service_port: u16,
}

/// CPU and memory requests and limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceRequirements {
    /// Hard limits.
    pub limits: ResourceQuantity,
    /// Scheduling requests.
    pub requests: ResourceQuantity,
}

/// A CPU and memory pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceQuantity {
    /// CPU, e.g. `0.5`.
    pub cpu: String,
    /// Memory, e.g. `512Mi`.
    pub memory: String,
}

/// HTTP readiness probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthProbe {
    /// Path probed, e.g. `/health`.
    pub http_path: String,
    /// Port probed.
    pub port: u16,
    /// Delay before the first probe.
    pub initial_delay_seconds: u32,
    /// Interval between probes.
    pub period_seconds: u32,
    /// Probe timeout.
    pub timeout_seconds: u32,
    /// Successes required to mark ready.
    pub success_threshold: u32,
    /// Failures required to mark unready.
    pub failure_threshold: u32,
}

/// A service fronting the deployment's containers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSpec {
    /// Service name.
    pub name: String,
    /// Service type, e.g. `LoadBalancer`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Service ports.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<ServicePort>,
    /// Externally reachable host names.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_endpoints: Vec<String>,
}

/// A service port mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicePort {
    /// Port name.
    pub name: String,
    /// Port exposed by the service.
    pub port: u16,
    /// Container port traffic is sent to.
    pub target_port: u16,
}

/// One page of deployments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentList {
    /// Total number of matching deployments.
    pub total: u64,
    /// Page size applied by the server.
    pub limit: u32,
    /// Offset applied by the server.
    pub offset: u32,
    /// Deployments on this page.
    pub deployments: Vec<Deployment>,
}

/// Filters for listing deployments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentQuery {
    /// Environment whose deployments are listed.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub environment: String,
    /// Page size.
    pub limit: u32,
    /// Page offset.
    pub offset: u32,
}

impl DeploymentQuery {
    /// First page of deployments in `environment`.
    pub fn in_environment(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            ..Self::default()
        }
    }
}

impl Default for DeploymentQuery {
    fn default() -> Self {
        Self {
            environment: String::new(),
            limit: DEFAULT_API_PAGE_SIZE,
            offset: 0,
        }
    }
}

/// Body of a scale request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleRequest {
    /// Desired replica count.
    pub replicas: u32,
}

//! Request and response bodies exchanged with the platform API.
//!
//! Every field is optional on the wire: the API omits whatever does not
//! apply to a given response (a `start` call, for example, only echoes
//! `id`, `status` and `message`), so all structs decode missing fields to
//! their defaults and skip empty ones when encoding.

mod container;
mod deployment;

use serde::{Deserialize, Serialize};

pub use self::container::{
    Container, ContainerList, ContainerLogs, ContainerQuery, DeleteContainerOptions, ExecRequest,
    ExecResult, HealthStatus, LogEntry, LogQuery, NetworkAttachment, PortMapping, ResourceLimits,
    ResourceUsage, VolumeMount,
};
pub use self::deployment::{
    ContainerSpec, Deployment, DeploymentList, DeploymentQuery, HealthProbe, ResourceQuantity,
    ResourceRequirements, RolloutStrategy, ScaleRequest, ServicePort, ServiceSpec, SpecPort,
};

/// A `name=value` environment variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvVar {
    /// Variable name.
    pub name: String,
    /// Variable value.
    pub value: String,
}

impl EnvVar {
    /// Creates a variable.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

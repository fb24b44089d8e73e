//! Operations on `/deployments`.

use deckhand_common::error::Result;
use reqwest::Method;

use crate::client::{segment, ApiClient};
use crate::models::{Deployment, DeploymentList, DeploymentQuery, ScaleRequest};

/// Deployment operations bound to an [`ApiClient`].
#[derive(Debug, Clone, Copy)]
pub struct Deployments<'a> {
    client: &'a ApiClient,
}

impl<'a> Deployments<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Lists deployments in the environment named by `query`.
    ///
    /// # Errors
    ///
    /// Returns [`DeckhandError::Connection`](deckhand_common::error::DeckhandError::Connection)
    /// on transport failure and [`DeckhandError::Api`](deckhand_common::error::DeckhandError::Api)
    /// on any non-200 response.
    pub fn list(&self, query: &DeploymentQuery) -> Result<DeploymentList> {
        let request = self.client.request(Method::GET, "deployments").query(query);
        self.client.send(request)
    }

    /// Fetches one deployment.
    ///
    /// # Errors
    ///
    /// Fails as [`list`](Self::list); a missing id reports
    /// [`ErrorKind::NotFound`](deckhand_common::error::ErrorKind::NotFound).
    pub fn get(&self, id: &str) -> Result<Deployment> {
        let request = self.client.request(Method::GET, &path(id, ""));
        self.client.send(request)
    }

    /// Creates a deployment.
    ///
    /// # Errors
    ///
    /// Fails as [`list`](Self::list).
    pub fn create(&self, deployment: &Deployment) -> Result<Deployment> {
        tracing::info!(
            name = %deployment.name,
            environment = %deployment.environment,
            version = %deployment.version,
            "creating deployment"
        );
        let request = self
            .client
            .request(Method::POST, "deployments")
            .json(deployment);
        self.client.send(request)
    }

    /// Replaces a deployment's definition.
    ///
    /// # Errors
    ///
    /// Fails as [`get`](Self::get).
    pub fn update(&self, id: &str, deployment: &Deployment) -> Result<Deployment> {
        tracing::info!(deployment = id, version = %deployment.version, "updating deployment");
        let request = self
            .client
            .request(Method::PUT, &path(id, ""))
            .json(deployment);
        self.client.send(request)
    }

    /// Sets the replica count.
    ///
    /// # Errors
    ///
    /// Fails as [`get`](Self::get).
    pub fn scale(&self, id: &str, replicas: u32) -> Result<Deployment> {
        tracing::info!(deployment = id, replicas, "scaling deployment");
        let request = self
            .client
            .request(Method::POST, &path(id, "/scale"))
            .json(&ScaleRequest { replicas });
        self.client.send(request)
    }

    /// Deletes a deployment. The response body is not inspected.
    ///
    /// # Errors
    ///
    /// Fails as [`get`](Self::get).
    pub fn delete(&self, id: &str, force: bool) -> Result<()> {
        tracing::info!(deployment = id, force, "deleting deployment");
        let mut request = self.client.request(Method::DELETE, &path(id, ""));
        if force {
            request = request.query(&[("force", "true")]);
        }
        self.client.send_discarding(request)
    }
}

fn path(id: &str, suffix: &str) -> String {
    format!("deployments/{}{suffix}", segment(id))
}

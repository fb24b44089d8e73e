//! Operations on `/containers`.

use deckhand_common::error::Result;
use reqwest::Method;

use crate::client::{segment, ApiClient};
use crate::models::{
    Container, ContainerList, ContainerLogs, ContainerQuery, DeleteContainerOptions, ExecRequest,
    ExecResult, LogQuery,
};

/// Container operations bound to an [`ApiClient`].
#[derive(Debug, Clone, Copy)]
pub struct Containers<'a> {
    client: &'a ApiClient,
}

impl<'a> Containers<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Lists containers matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`DeckhandError::Connection`](deckhand_common::error::DeckhandError::Connection)
    /// on transport failure and [`DeckhandError::Api`](deckhand_common::error::DeckhandError::Api)
    /// on any non-200 response.
    pub fn list(&self, query: &ContainerQuery) -> Result<ContainerList> {
        let request = self.client.request(Method::GET, "containers").query(query);
        self.client.send(request)
    }

    /// Fetches one container.
    ///
    /// # Errors
    ///
    /// Fails as [`list`](Self::list); a missing id reports
    /// [`ErrorKind::NotFound`](deckhand_common::error::ErrorKind::NotFound).
    pub fn get(&self, id: &str) -> Result<Container> {
        let request = self.client.request(Method::GET, &path(id, ""));
        self.client.send(request)
    }

    /// Creates a container and returns it as accepted by the server,
    /// including its assigned id.
    ///
    /// # Errors
    ///
    /// Fails as [`list`](Self::list).
    pub fn create(&self, container: &Container) -> Result<Container> {
        tracing::info!(name = %container.name, image = %container.image, "creating container");
        let request = self
            .client
            .request(Method::POST, "containers")
            .json(container);
        self.client.send(request)
    }

    /// Starts a container.
    ///
    /// # Errors
    ///
    /// Fails as [`get`](Self::get).
    pub fn start(&self, id: &str) -> Result<Container> {
        tracing::info!(container = id, "starting container");
        let request = self.client.request(Method::POST, &path(id, "/start"));
        self.client.send(request)
    }

    /// Stops a container, waiting up to `timeout` seconds before it is
    /// killed.
    ///
    /// # Errors
    ///
    /// Fails as [`get`](Self::get).
    pub fn stop(&self, id: &str, timeout: Option<u32>) -> Result<Container> {
        tracing::info!(container = id, ?timeout, "stopping container");
        let request = with_timeout(self.client.request(Method::POST, &path(id, "/stop")), timeout);
        self.client.send(request)
    }

    /// Restarts a container.
    ///
    /// # Errors
    ///
    /// Fails as [`get`](Self::get).
    pub fn restart(&self, id: &str, timeout: Option<u32>) -> Result<Container> {
        tracing::info!(container = id, ?timeout, "restarting container");
        let request =
            with_timeout(self.client.request(Method::POST, &path(id, "/restart")), timeout);
        self.client.send(request)
    }

    /// Deletes a container.
    ///
    /// # Errors
    ///
    /// Fails as [`get`](Self::get).
    pub fn delete(&self, id: &str, options: DeleteContainerOptions) -> Result<Container> {
        tracing::info!(
            container = id,
            force = options.force,
            remove_volumes = options.remove_volumes,
            "deleting container"
        );
        let request = self
            .client
            .request(Method::DELETE, &path(id, ""))
            .query(&options.query());
        self.client.send(request)
    }

    /// Reads a container's logs.
    ///
    /// # Errors
    ///
    /// Fails as [`get`](Self::get).
    pub fn logs(&self, id: &str, query: &LogQuery) -> Result<ContainerLogs> {
        let request = self
            .client
            .request(Method::GET, &path(id, "/logs"))
            .query(query);
        self.client.send(request)
    }

    /// Runs a command inside a container and returns its captured output.
    ///
    /// # Errors
    ///
    /// Fails as [`get`](Self::get).
    pub fn exec(&self, id: &str, exec: &ExecRequest) -> Result<ExecResult> {
        tracing::info!(container = id, command = ?exec.command, "executing in container");
        let request = self
            .client
            .request(Method::POST, &path(id, "/exec"))
            .json(exec);
        self.client.send(request)
    }
}

fn path(id: &str, suffix: &str) -> String {
    format!("containers/{}{suffix}", segment(id))
}

fn with_timeout(
    request: reqwest::blocking::RequestBuilder,
    timeout: Option<u32>,
) -> reqwest::blocking::RequestBuilder {
    match timeout {
        Some(seconds) => request.query(&[("timeout", seconds)]),
        None => request,
    }
}

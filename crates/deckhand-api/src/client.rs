//! Authenticated HTTP client and response handling shared by all resources.

use std::fmt;

use deckhand_common::config::PlatformConfig;
use deckhand_common::constants::{API_KEY_ENV, HTTP_REQUEST_TIMEOUT};
use deckhand_common::credentials::CredentialSource;
use deckhand_common::error::{DeckhandError, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::containers::Containers;
use crate::deployments::Deployments;

const APPLICATION_JSON: &str = "application/json";

/// Error envelope returned by the API on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    /// The error payload.
    pub error: ErrorBody,
}

/// Payload of an [`ErrorEnvelope`].
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable code, e.g. `NOT_FOUND`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Optional structured details.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// Client for one API environment.
pub struct ApiClient {
    base_url: String,
    token: String,
    http: Client,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client for `base_url` authenticating with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`DeckhandError::Config`] if the URL is not absolute or the
    /// HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let _ = Url::parse(&base_url).map_err(|e| {
            DeckhandError::config(format!("invalid API endpoint '{base_url}': {e}"))
        })?;

        let http = Client::builder()
            .timeout(HTTP_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DeckhandError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            token: token.into(),
            http,
        })
    }

    /// Resolves an environment from `config` and builds a client for it.
    ///
    /// With `environment == None` the entry flagged `default` is used. The
    /// bearer token is read from [`API_KEY_ENV`] through `credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`DeckhandError::NotFound`] if the environment cannot be
    /// resolved and [`DeckhandError::Config`] if the token is unset.
    pub fn from_config(
        config: &PlatformConfig,
        environment: Option<&str>,
        credentials: &impl CredentialSource,
    ) -> Result<Self> {
        let env = config.select(environment)?;
        let token = credentials.require(API_KEY_ENV)?;
        tracing::debug!(environment = %env.name, endpoint = %env.api_endpoint, "resolved API environment");
        Self::new(env.api_endpoint.clone(), token)
    }

    /// Returns the base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Operations on `/containers`.
    #[must_use]
    pub const fn containers(&self) -> Containers<'_> {
        Containers::new(self)
    }

    /// Operations on `/deployments`.
    #[must_use]
    pub const fn deployments(&self) -> Deployments<'_> {
        Deployments::new(self)
    }

    /// Starts a request for `path`, relative to the base URL, with the
    /// bearer and JSON headers every call carries.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(ACCEPT, APPLICATION_JSON)
            .header(CONTENT_TYPE, APPLICATION_JSON)
    }

    /// Sends `request` and decodes a `200 OK` body as `T`.
    pub(crate) fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.dispatch(request)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Sends `request` and discards the `200 OK` body.
    pub(crate) fn send_discarding(&self, request: RequestBuilder) -> Result<()> {
        let _ = self.dispatch(request)?;
        Ok(())
    }

    fn dispatch(&self, request: RequestBuilder) -> Result<String> {
        let request = request
            .build()
            .map_err(|e| DeckhandError::config(format!("invalid request: {e}")))?;
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(%method, %url, "sending API request");

        let response = self.http.execute(request).map_err(|e| DeckhandError::Connection {
            message: format!("{method} {url}: {e}"),
        })?;
        let status = response.status();
        let body = response.text().map_err(|e| DeckhandError::Connection {
            message: format!("failed to read response body from {url}: {e}"),
        })?;

        if status != StatusCode::OK {
            tracing::warn!(%method, %url, %status, "API request failed");
            return Err(api_error(status, &body));
        }
        Ok(body)
    }
}

/// Converts a non-200 response into [`DeckhandError::Api`], preferring the
/// structured envelope and falling back to the status line.
fn api_error(status: StatusCode, body: &str) -> DeckhandError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => DeckhandError::Api {
            status: status.as_u16(),
            code: Some(envelope.error.code),
            message: envelope.error.message,
            details: envelope.error.details,
        },
        Err(_) => DeckhandError::Api {
            status: status.as_u16(),
            code: None,
            message: status.to_string(),
            details: None,
        },
    }
}

/// Percent-encodes an identifier for use as a path segment.
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

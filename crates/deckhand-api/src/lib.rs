//! # deckhand-api
//!
//! Blocking client for the platform's REST API.
//!
//! - [`ApiClient`](client::ApiClient): resolves an environment, holds the
//!   bearer token and the HTTP connection pool.
//! - [`Containers`](containers::Containers): `/containers` operations.
//! - [`Deployments`](deployments::Deployments): `/deployments` operations.
//!
//! Every call is a single request with a fixed 30 second timeout. Any
//! response other than `200 OK` is returned as
//! [`DeckhandError::Api`](deckhand_common::error::DeckhandError::Api).
//!
//! # Example
//!
//! ```rust,no_run
//! use deckhand_api::client::ApiClient;
//! use deckhand_api::models::ContainerQuery;
//! use deckhand_common::config::PlatformConfig;
//! use deckhand_common::credentials::ProcessEnv;
//!
//! let config = PlatformConfig::load("config/platform.yaml".as_ref())?;
//! let client = ApiClient::from_config(&config, None, &ProcessEnv)?;
//! let page = client.containers().list(&ContainerQuery::default())?;
//! # Ok::<(), deckhand_common::error::DeckhandError>(())
//! ```

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod client;
pub mod containers;
pub mod deployments;
pub mod models;

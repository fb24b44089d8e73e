//! # deckhand-store
//!
//! Blocking access to the `containers` and `deployments` tables of a MySQL
//! database described by a database environment document.
//!
//! - [`connection`]: DSN construction, pool sizing and [`MysqlStore`].
//! - [`repository`]: the [`Repository`](repository::Repository) trait
//!   shared by both tables.
//! - [`containers`] / [`deployments`]: the two implementations.
//! - [`schema`]: `CREATE TABLE IF NOT EXISTS` rendering from table hints.
//!
//! Every statement auto-commits. An update or delete that reports zero
//! affected rows fails with
//! [`DeckhandError::NotFound`](deckhand_common::error::DeckhandError::NotFound).

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod connection;
pub mod containers;
pub mod deployments;
mod error;
pub mod records;
pub mod repository;
pub mod schema;

pub use connection::MysqlStore;

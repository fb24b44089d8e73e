//! # deckhand-common
//!
//! Shared error type, resource identifiers and status enums, environment
//! configuration documents, and credential lookup used across the entire
//! Deckhand workspace.
//!
//! This crate is the leaf of the dependency graph: the HTTP client
//! (`deckhand-api`), the MySQL store (`deckhand-store`) and the CLI all
//! build on the primitives defined here.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod types;

//! Credential lookup by variable name.
//!
//! Environment documents never contain secrets; they name the variables
//! that hold them. Connection builders receive a [`CredentialSource`] so
//! tests and embedders can supply values without touching the process
//! environment.

use std::collections::HashMap;

use crate::error::{DeckhandError, Result};

/// A source of named secret values.
pub trait CredentialSource {
    /// Returns the value stored under `name`, if any.
    fn lookup(&self, name: &str) -> Option<String>;

    /// Returns the value under `name`, failing when it is unset or empty.
    ///
    /// # Errors
    ///
    /// Returns [`DeckhandError::Config`] if the variable is unset or empty.
    fn require(&self, name: &str) -> Result<String> {
        match self.lookup(name) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(DeckhandError::config(format!(
                "environment variable {name} not set"
            ))),
        }
    }
}

/// Reads credentials from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl CredentialSource for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl CredentialSource for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<S: CredentialSource + ?Sized> CredentialSource for &S {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

//! Shared primitives for all Rust crates in Mailshift.

#![forbid(unsafe_code)]

/// Mailbox and principal identity helpers.
pub mod identity;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use identity::{identity_key, same_identity};

/// Result type used across Mailshift crates.
pub type AppResult<T> = Result<T, AppError>;

/// Identifier attached to every report produced by one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Creates a random run identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RunId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or configuration value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A collaborating service (folder lookup, grant execution) failed.
    #[error("external service error: {0}")]
    External(String),

    /// Internal unexpected error, including local I/O failures.
    #[error("internal error: {0}")]
    Internal(String),
}

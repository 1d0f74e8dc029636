//! Error types for the domain model

use crate::types::Domain;
use thiserror::Error;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while building or validating domain values
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    /// Entry title is empty or whitespace
    #[error("Title must not be empty")]
    EmptyTitle,

    /// Status tag outside the domain's vocabulary
    #[error("Unknown status '{status}' for {domain}")]
    UnknownStatus { domain: Domain, status: String },

    /// Platform outside the supported list
    #[error("Unknown platform '{0}'")]
    UnknownPlatform(String),

    /// Book format outside the supported list
    #[error("Unknown book format '{0}'")]
    UnknownFormat(String),

    /// Domain name could not be parsed
    #[error("Unknown collection '{0}' (expected games, anime or books)")]
    UnknownDomain(String),
}

// crates/notion/src/error.rs
//! Error types for Notion operations

use shelfkeeper_core::ModelError;
use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while talking to the collection database
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport failure (DNS, TLS, timeout, connection reset)
    #[error("Network error: {0}")]
    Network(String),

    /// Notion answered with a non-success status
    #[error("Notion returned {status}: {message}")]
    Remote { status: u16, message: String },

    /// The target database lacks a property or has it with another type
    #[error("Database property '{property}' should be {expected}, found {found}")]
    SchemaMismatch {
        property: String,
        expected: String,
        found: String,
    },

    /// A response did not have the expected shape
    #[error("Unexpected response: {0}")]
    Parse(String),

    /// The entry does not fit the collection's vocabularies
    #[error("Invalid entry: {0}")]
    InvalidEntry(#[from] ModelError),
}

impl StoreError {
    /// Returns true if the page or database does not exist (or is not shared)
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Remote { status: 404, .. })
    }

    /// Returns true if the token was rejected
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, StoreError::Remote { status: 401, .. })
    }
}

// crates/session/src/error.rs
//! Error types for the interactive session

use shelfkeeper_catalog::SourceError;
use shelfkeeper_config::ConfigError;
use shelfkeeper_core::ModelError;
use shelfkeeper_notion::StoreError;
use thiserror::Error;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur during a session
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading from or writing to the terminal failed
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Catalog search or enrichment failed
    #[error("{0}")]
    Catalog(#[from] SourceError),

    /// Collection database operation failed
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Settings could not be read or written
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// An entry broke a vocabulary rule
    #[error("{0}")]
    Model(#[from] ModelError),
}

impl SessionError {
    /// Errors that end the session instead of returning to a menu
    pub fn is_fatal(&self) -> bool {
        matches!(self, SessionError::Terminal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_terminal_errors_are_fatal() {
        assert!(SessionError::Terminal("closed".into()).is_fatal());
        assert!(!SessionError::Catalog(SourceError::NoResults).is_fatal());
        assert!(!SessionError::Store(StoreError::Network("reset".into())).is_fatal());
    }

    #[test]
    fn test_display_passes_through() {
        let err: SessionError = StoreError::Remote {
            status: 404,
            message: "Could not find database".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Notion returned 404: Could not find database");
    }
}

// FILE: crates/catalog/src/lib.rs

mod google_books;
mod http;
mod jikan;
mod steamgriddb;
mod traits;

pub use google_books::GoogleBooksSource;
pub use jikan::JikanSource;
pub use steamgriddb::SteamGridDbSource;
use std::fmt;
pub use traits::{CatalogSource, SearchMode, SearchQuery, SourceMetadata};

/// Result type for catalog operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors from catalog sources
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// Transport failure or non-success status
    Network(String),
    /// Response body could not be decoded
    Parse(String),
    /// The query matched nothing
    NoResults,
    /// Invalid query
    InvalidQuery(String),
    /// The source needs an API key and none is configured
    MissingApiKey(&'static str),
}

impl SourceError {
    /// Whether the flow can simply report "no results" and carry on
    pub fn is_empty_result(&self) -> bool {
        matches!(self, SourceError::NoResults)
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Network(e) => write!(f, "Network error: {}", e),
            SourceError::Parse(e) => write!(f, "Parse error: {}", e),
            SourceError::NoResults => write!(f, "No results found"),
            SourceError::InvalidQuery(e) => write!(f, "Invalid query: {}", e),
            SourceError::MissingApiKey(source) => write!(f, "No API key configured for {}", source),
        }
    }
}

impl std::error::Error for SourceError {}

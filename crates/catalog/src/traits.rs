// FILE: crates/catalog/src/traits.rs

use crate::SourceResult;
use shelfkeeper_core::{CatalogItem, Domain};

/// A metadata catalog the Add flow can search
pub trait CatalogSource {
    /// Search for candidates, most relevant first
    ///
    /// Returns `SourceError::NoResults` rather than an empty list.
    fn search(&self, query: &SearchQuery) -> SourceResult<Vec<CatalogItem>>;

    /// Fill in the details the search response lacks (artwork, studios, ISBN...)
    fn enrich(&self, item: CatalogItem) -> SourceResult<CatalogItem>;

    /// Get metadata about the source
    fn metadata(&self) -> SourceMetadata;
}

/// What a query's text should be matched against
///
/// Only Google Books distinguishes modes; other sources treat every mode as `Title`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Title,
    Author,
    Isbn,
    Any,
}

impl SearchMode {
    pub const ALL: [SearchMode; 4] = [
        SearchMode::Title,
        SearchMode::Author,
        SearchMode::Isbn,
        SearchMode::Any,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SearchMode::Title => "Title",
            SearchMode::Author => "Author",
            SearchMode::Isbn => "ISBN",
            SearchMode::Any => "Any field",
        }
    }
}

/// Search query
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub text: String,
    pub mode: SearchMode,
    pub limit: usize,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: SearchMode::Title,
            limit: 10,
        }
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Trimmed text, or `InvalidQuery` when there is nothing to search for
    pub(crate) fn checked_text(&self) -> SourceResult<&str> {
        let text = self.text.trim();
        if text.is_empty() {
            Err(crate::SourceError::InvalidQuery("Empty query".to_string()))
        } else {
            Ok(text)
        }
    }
}

/// Source metadata
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    pub name: String,
    pub domain: Domain,
    pub base_url: String,
    pub requires_auth: bool,
}

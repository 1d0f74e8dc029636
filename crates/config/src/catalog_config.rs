//! External catalog settings

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Keys and preferences for the metadata search APIs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// SteamGridDB API key (games only)
    pub steamgriddb_api_key: String,

    /// ISO 639-1 language Google Books results are restricted to first;
    /// empty disables the restriction
    pub books_language: String,

    /// Maximum number of candidates shown per search
    pub result_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            steamgriddb_api_key: String::new(),
            books_language: "pl".to_string(),
            result_limit: 10,
        }
    }
}

impl CatalogConfig {
    pub fn books_language(&self) -> Option<&str> {
        (!self.books_language.is_empty()).then_some(self.books_language.as_str())
    }
}

impl ConfigSection for CatalogConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::all([
            Validator::in_range(self.result_limit, 1, 40, "catalog.result_limit"),
            Validator::language_code(&self.books_language, "catalog.books_language"),
        ])
    }

    fn section_name(&self) -> &'static str {
        "catalog"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CatalogConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.books_language(), Some("pl"));
    }

    #[test]
    fn test_empty_language_disables_restriction() {
        let config = CatalogConfig {
            books_language: String::new(),
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.books_language(), None);
    }

    #[test]
    fn test_bad_language_rejected() {
        let config = CatalogConfig {
            books_language: "Polish".to_string(),
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_result_limit_range() {
        let config = CatalogConfig {
            result_limit: 41,
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

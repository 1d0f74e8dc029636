//! Notion connection settings

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use shelfkeeper_core::Domain;

/// Length of a Notion object id without dashes
pub const NOTION_ID_LEN: usize = 32;

/// Notion integration token and one database per collection
///
/// Empty strings mean "not set".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NotionConfig {
    /// Integration secret (sent as a bearer token)
    pub token: String,

    pub games_database_id: String,
    pub anime_database_id: String,
    pub books_database_id: String,

    /// Rows per page when listing the library
    pub page_size: usize,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            games_database_id: String::new(),
            anime_database_id: String::new(),
            books_database_id: String::new(),
            page_size: 10,
        }
    }
}

impl NotionConfig {
    /// Database id configured for a collection, if any
    pub fn database_id(&self, domain: Domain) -> Option<&str> {
        let id = match domain {
            Domain::Games => &self.games_database_id,
            Domain::Anime => &self.anime_database_id,
            Domain::Books => &self.books_database_id,
        };
        (!id.is_empty()).then_some(id.as_str())
    }
}

impl ConfigSection for NotionConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![Validator::in_range(
            self.page_size,
            1,
            100,
            "notion.page_size",
        )];

        for (field, id) in [
            ("notion.games_database_id", &self.games_database_id),
            ("notion.anime_database_id", &self.anime_database_id),
            ("notion.books_database_id", &self.books_database_id),
        ] {
            if !id.is_empty() {
                results.push(Validator::hex_id(id, NOTION_ID_LEN, field));
            }
        }

        Validator::all(results)
    }

    fn section_name(&self) -> &'static str {
        "notion"
    }
}

/// Extracts a database id from a Notion URL or a pasted id
///
/// Accepts `https://www.notion.so/{workspace}/{id}?v=...`,
/// `https://www.notion.so/{workspace}/{Title}-{id}`, a dashed UUID or a
/// bare id. Dashes are removed and the result is cut to 32 characters.
pub fn normalize_database_id(input: &str) -> String {
    let input = input.trim();

    let raw = if input.starts_with("https://") || input.starts_with("http://") {
        let path = input
            .split(['?', '#'])
            .next()
            .unwrap_or(input)
            .trim_end_matches('/');
        let last = path.rsplit('/').next().unwrap_or(path);
        last.rsplit('-').next().unwrap_or(last)
    } else {
        input
    };

    raw.chars().filter(|c| *c != '-').take(NOTION_ID_LEN).collect()
}

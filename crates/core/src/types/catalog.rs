//! Search results returned by external catalogs

use crate::types::{AiringState, Domain};
use serde::{Deserialize, Serialize};

/// A candidate record from an external catalog
///
/// Lives only between a search and the user's pick; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Identifier in the source catalog (SteamGridDB id, MAL id, volume id)
    pub source_id: String,
    pub title: String,
    pub year: Option<i32>,
    /// Small square artwork, used as the page icon
    pub icon_url: Option<String>,
    /// Large artwork, used as the page cover
    pub cover_url: Option<String>,
    pub details: Details,
}

/// Domain-specific fields a catalog may supply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Details {
    Game,
    Anime(AnimeDetails),
    Book(BookDetails),
}

impl Details {
    /// Empty detail block for a domain
    pub fn empty(domain: Domain) -> Self {
        match domain {
            Domain::Games => Details::Game,
            Domain::Anime => Details::Anime(AnimeDetails::default()),
            Domain::Books => Details::Book(BookDetails::default()),
        }
    }

    pub fn domain(&self) -> Domain {
        match self {
            Details::Game => Domain::Games,
            Details::Anime(_) => Domain::Anime,
            Details::Book(_) => Domain::Books,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimeDetails {
    pub episodes: Option<u32>,
    pub seasons: Option<u32>,
    pub studios: Vec<String>,
    pub airing: Option<AiringState>,
    pub synopsis: Option<String>,
    pub mal_url: Option<String>,
    pub anidb_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookDetails {
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    pub description: Option<String>,
    pub page_count: Option<u32>,
    pub categories: Vec<String>,
    pub isbn: Option<String>,
    pub info_link: Option<String>,
}

impl CatalogItem {
    /// Creates an item with only the fields every catalog provides
    pub fn new(domain: Domain, source_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            title: title.into(),
            year: None,
            icon_url: None,
            cover_url: None,
            details: Details::empty(domain),
        }
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    pub fn domain(&self) -> Domain {
        self.details.domain()
    }

    /// One-line label for selection menus
    ///
    /// Books include their authors: `Dune by Frank Herbert (1965)`.
    pub fn display_label(&self) -> String {
        let year = self
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        match &self.details {
            Details::Book(book) if !book.authors.is_empty() => {
                format!("{} by {} ({})", self.title, book.authors.join(", "), year)
            }
            Details::Book(_) => format!("{} by Unknown ({})", self.title, year),
            _ => format!("{} ({})", self.title, year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_has_matching_details() {
        let item = CatalogItem::new(Domain::Anime, "1", "Cowboy Bebop");
        assert_eq!(item.domain(), Domain::Anime);
        assert!(matches!(item.details, Details::Anime(_)));
    }

    #[test]
    fn test_display_label_game() {
        let item = CatalogItem::new(Domain::Games, "42", "Portal 2").with_year(Some(2011));
        assert_eq!(item.display_label(), "Portal 2 (2011)");

        let unknown = CatalogItem::new(Domain::Games, "43", "Portal 3");
        assert_eq!(unknown.display_label(), "Portal 3 (Unknown)");
    }

    #[test]
    fn test_display_label_book_lists_authors() {
        let mut item = CatalogItem::new(Domain::Books, "vol", "Good Omens").with_year(Some(1990));
        if let Details::Book(book) = &mut item.details {
            book.authors = vec!["Terry Pratchett".into(), "Neil Gaiman".into()];
        }
        assert_eq!(
            item.display_label(),
            "Good Omens by Terry Pratchett, Neil Gaiman (1990)"
        );
    }
}

//! Collection entries as stored in the remote database

use crate::error::{ModelError, ModelResult};
use crate::types::{
    AnimeDetails, BookDetails, CatalogItem, Details, Domain, Validator, BOOK_FORMATS,
    GAME_PLATFORMS,
};
use serde::{Deserialize, Serialize};

/// One game, anime or book in the user's collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub title: String,
    pub year: Option<i32>,
    /// Status tag; `None` means no status
    pub status: Option<String>,
    pub icon_url: Option<String>,
    pub cover_url: Option<String>,
    pub attributes: Attributes,
}

/// Domain-specific attributes of an entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Attributes {
    Game(GameAttributes),
    Anime(AnimeDetails),
    Book(BookAttributes),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameAttributes {
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookAttributes {
    pub details: BookDetails,
    pub format: Option<String>,
}

impl Attributes {
    pub fn empty(domain: Domain) -> Self {
        match domain {
            Domain::Games => Attributes::Game(GameAttributes::default()),
            Domain::Anime => Attributes::Anime(AnimeDetails::default()),
            Domain::Books => Attributes::Book(BookAttributes::default()),
        }
    }

    pub fn domain(&self) -> Domain {
        match self {
            Attributes::Game(_) => Domain::Games,
            Attributes::Anime(_) => Domain::Anime,
            Attributes::Book(_) => Domain::Books,
        }
    }
}

impl CollectionEntry {
    /// Creates an entry with just a title
    pub fn new(domain: Domain, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: None,
            status: None,
            icon_url: None,
            cover_url: None,
            attributes: Attributes::empty(domain),
        }
    }

    /// Builds an entry from the catalog item the user picked
    pub fn from_catalog(item: CatalogItem, status: Option<String>) -> Self {
        let attributes = match item.details {
            Details::Game => Attributes::Game(GameAttributes::default()),
            Details::Anime(anime) => Attributes::Anime(anime),
            Details::Book(details) => Attributes::Book(BookAttributes {
                details,
                format: None,
            }),
        };

        Self {
            title: item.title,
            year: item.year,
            status,
            icon_url: item.icon_url,
            cover_url: item.cover_url,
            attributes,
        }
    }

    pub fn domain(&self) -> Domain {
        self.attributes.domain()
    }

    /// Sets the platform; ignored for non-game entries
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        if let Attributes::Game(game) = &mut self.attributes {
            game.platform = Some(platform.into());
        }
        self
    }

    /// Sets the book format; ignored for non-book entries
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        if let Attributes::Book(book) = &mut self.attributes {
            book.format = Some(format.into());
        }
        self
    }

    pub fn platform(&self) -> Option<&str> {
        match &self.attributes {
            Attributes::Game(game) => game.platform.as_deref(),
            _ => None,
        }
    }

    pub fn format(&self) -> Option<&str> {
        match &self.attributes {
            Attributes::Book(book) => book.format.as_deref(),
            _ => None,
        }
    }

    /// Checks the entry against the domain vocabularies
    pub fn check(&self) -> ModelResult<()> {
        if self.title.trim().is_empty() {
            return Err(ModelError::EmptyTitle);
        }
        if let Some(status) = &self.status {
            self.domain().check_status(status)?;
        }
        if let Some(platform) = self.platform() {
            if !GAME_PLATFORMS.contains(&platform) {
                return Err(ModelError::UnknownPlatform(platform.to_string()));
            }
        }
        if let Some(format) = self.format() {
            if !BOOK_FORMATS.contains(&format) {
                return Err(ModelError::UnknownFormat(format.to_string()));
            }
        }
        Ok(())
    }

    /// Applies a partial update in place
    pub fn apply(&mut self, patch: &EntryPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(year) = patch.year {
            self.year = Some(year);
        }
        if let Some(status) = &patch.status {
            self.status = status.clone();
        }
        if let Some(icon) = &patch.icon_url {
            self.icon_url = Some(icon.clone());
        }
        if let Some(cover) = &patch.cover_url {
            self.cover_url = Some(cover.clone());
        }
        match &mut self.attributes {
            Attributes::Game(game) => {
                if let Some(platform) = &patch.platform {
                    game.platform = Some(platform.clone());
                }
            }
            Attributes::Book(book) => {
                if let Some(format) = &patch.format {
                    book.format = Some(format.clone());
                }
            }
            Attributes::Anime(_) => {}
        }
    }
}

impl Validator for CollectionEntry {
    fn validate(&self) -> Result<(), Vec<String>> {
        self.check().map_err(|e| vec![e.to_string()])
    }
}

/// An entry read back from the remote store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    /// Remote row identifier (Notion page id)
    pub id: String,
    /// Link to the row in the remote UI
    pub url: Option<String>,
    pub entry: CollectionEntry,
}

/// Fields to overwrite on an existing entry
///
/// `None` leaves a field untouched. For `status`, `Some(None)` clears the tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub status: Option<Option<String>>,
    pub platform: Option<String>,
    pub format: Option<String>,
    pub icon_url: Option<String>,
    pub cover_url: Option<String>,
}

impl EntryPatch {
    /// Patch that only changes the status
    pub fn status(status: Option<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Collects the editable fields that differ between two versions
    pub fn between(before: &CollectionEntry, after: &CollectionEntry) -> Self {
        fn changed<T: PartialEq + Clone>(old: &Option<T>, new: &Option<T>) -> Option<T> {
            match new {
                Some(value) if old.as_ref() != Some(value) => Some(value.clone()),
                _ => None,
            }
        }

        Self {
            title: (before.title != after.title && !after.title.trim().is_empty())
                .then(|| after.title.clone()),
            year: changed(&before.year, &after.year),
            status: (before.status != after.status).then(|| after.status.clone()),
            platform: changed(
                &before.platform().map(str::to_string),
                &after.platform().map(str::to_string),
            ),
            format: changed(
                &before.format().map(str::to_string),
                &after.format().map(str::to_string),
            ),
            icon_url: changed(&before.icon_url, &after.icon_url),
            cover_url: changed(&before.cover_url, &after.cover_url),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

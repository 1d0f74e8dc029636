//! Shared domain model for shelfkeeper
//!
//! Everything the other crates pass between each other lives here:
//! - `Domain`: which collection (games, anime, books) a program manages
//! - `CatalogItem`: an ephemeral search result from an external catalog
//! - `CollectionEntry` / `StoredEntry`: a row in the user's remote collection
//! - `EntryPatch`: a partial update of an existing row

pub mod error;
pub mod types;

pub use error::{ModelError, ModelResult};
pub use types::{
    normalize_status, AiringState, AnimeDetails, Attributes, BookAttributes, BookDetails,
    CatalogItem, CollectionEntry, Details, Domain, EntryPatch, GameAttributes, StoredEntry,
    Validator, BOOK_FORMATS, GAME_PLATFORMS, NO_STATUS,
};

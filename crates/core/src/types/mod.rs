//! Domain types for shelfkeeper
//!
//! - `domain`: collection kinds and their status/platform/format vocabularies
//! - `catalog`: search results from external catalogs
//! - `entry`: rows of the remote collection and partial updates
//! - `common`: shared traits

mod catalog;
mod common;
mod domain;
mod entry;

pub use catalog::{AnimeDetails, BookDetails, CatalogItem, Details};
pub use common::Validator;
pub use domain::{
    normalize_status, AiringState, Domain, BOOK_FORMATS, GAME_PLATFORMS, NO_STATUS,
};
pub use entry::{
    Attributes, BookAttributes, CollectionEntry, EntryPatch, GameAttributes, StoredEntry,
};

//! Notion adapter for shelfkeeper collections
//!
//! Maps `CollectionEntry` values onto the typed properties of a Notion
//! database and back. All traffic goes through the `Transport` trait so the
//! mapping can be exercised against `MemoryTransport` without a network.

mod error;
pub mod memory;
pub mod properties;
pub mod schema;
mod store;
mod transport;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryTransport;
pub use schema::{PropertyKind, PropertySpec};
pub use store::{CollectionStore, EntryPage, NotionStore};
pub use transport::{HttpTransport, Method, Transport, NOTION_API_BASE, NOTION_VERSION};

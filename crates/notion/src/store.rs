// crates/notion/src/store.rs
//! Collection CRUD against one Notion database

use crate::error::{StoreError, StoreResult};
use crate::properties::{decode_page, encode_entry, encode_patch, external_file};
use crate::schema::{check_schema, NAME};
use crate::transport::{Method, Transport};
use serde_json::{json, Value};
use shelfkeeper_core::{CollectionEntry, Domain, EntryPatch, StoredEntry};
use std::cell::Cell;

/// Largest page Notion returns from a query
const MAX_PAGE_SIZE: usize = 100;

/// One page of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct EntryPage {
    pub entries: Vec<StoredEntry>,
    /// Cursor for the following page, if any
    pub next_cursor: Option<String>,
}

/// Storage for one collection
pub trait CollectionStore {
    fn domain(&self) -> Domain;

    /// Checks the remote database has every property the collection writes
    fn verify_schema(&self) -> StoreResult<()>;

    /// Creates a row and returns its id
    fn create(&self, entry: &CollectionEntry) -> StoreResult<String>;

    /// Lists rows sorted by name, `page_size` at a time
    fn list(&self, cursor: Option<&str>, page_size: usize) -> StoreResult<EntryPage>;

    /// Rows whose name contains `text` (case-insensitive)
    fn search(&self, text: &str) -> StoreResult<Vec<StoredEntry>>;

    /// Overwrites the fields present in `patch`
    fn update(&self, id: &str, patch: &EntryPatch) -> StoreResult<()>;

    /// Archives a row
    fn delete(&self, id: &str) -> StoreResult<()>;
}

/// `CollectionStore` backed by a Notion database
pub struct NotionStore<T: Transport> {
    transport: T,
    database_id: String,
    domain: Domain,
    schema_checked: Cell<bool>,
}

impl<T: Transport> NotionStore<T> {
    pub fn new(transport: T, database_id: impl Into<String>, domain: Domain) -> Self {
        Self {
            transport,
            database_id: database_id.into(),
            domain,
            schema_checked: Cell::new(false),
        }
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Verifies the schema once per store; later writes skip the request
    fn ensure_schema(&self) -> StoreResult<()> {
        if !self.schema_checked.get() {
            self.verify_schema()?;
        }
        Ok(())
    }

    fn query(&self, body: &Value) -> StoreResult<EntryPage> {
        let path = format!("databases/{}/query", self.database_id);
        let response = self.transport.request(Method::Post, &path, Some(body))?;

        let entries = response["results"]
            .as_array()
            .ok_or_else(|| StoreError::Parse("query response without results".to_string()))?
            .iter()
            .map(|page| decode_page(self.domain, page))
            .collect::<StoreResult<Vec<_>>>()?;

        let next_cursor = if response["has_more"].as_bool().unwrap_or(false) {
            response["next_cursor"].as_str().map(str::to_string)
        } else {
            None
        };

        Ok(EntryPage {
            entries,
            next_cursor,
        })
    }
}

impl<T: Transport> CollectionStore for NotionStore<T> {
    fn domain(&self) -> Domain {
        self.domain
    }

    fn verify_schema(&self) -> StoreResult<()> {
        let path = format!("databases/{}", self.database_id);
        let database = self.transport.request(Method::Get, &path, None)?;
        check_schema(self.domain, &database)?;
        self.schema_checked.set(true);
        Ok(())
    }

    fn create(&self, entry: &CollectionEntry) -> StoreResult<String> {
        entry.check()?;
        self.ensure_schema()?;

        let mut body = json!({
            "parent": { "database_id": self.database_id },
            "properties": encode_entry(entry),
        });
        if let Some(icon) = &entry.icon_url {
            body["icon"] = external_file(icon);
        }
        if let Some(cover) = &entry.cover_url {
            body["cover"] = external_file(cover);
        }

        let page = self.transport.request(Method::Post, "pages", Some(&body))?;
        let id = page["id"]
            .as_str()
            .ok_or_else(|| StoreError::Parse("created page without id".to_string()))?;

        log::info!("Created {} entry '{}' ({})", self.domain.noun(), entry.title, id);
        Ok(id.to_string())
    }

    fn list(&self, cursor: Option<&str>, page_size: usize) -> StoreResult<EntryPage> {
        let mut body = json!({
            "page_size": page_size.clamp(1, MAX_PAGE_SIZE),
            "sorts": [{ "property": NAME, "direction": "ascending" }],
        });
        if let Some(cursor) = cursor {
            body["start_cursor"] = json!(cursor);
        }
        self.query(&body)
    }

    fn search(&self, text: &str) -> StoreResult<Vec<StoredEntry>> {
        let mut body = json!({
            "page_size": MAX_PAGE_SIZE,
            "filter": { "property": NAME, "title": { "contains": text.trim() } },
            "sorts": [{ "property": NAME, "direction": "ascending" }],
        });

        let mut found = Vec::new();
        loop {
            let page = self.query(&body)?;
            found.extend(page.entries);
            match page.next_cursor {
                Some(cursor) => body["start_cursor"] = json!(cursor),
                None => break,
            }
        }

        log::debug!("Search '{}' matched {} entries", text, found.len());
        Ok(found)
    }

    fn update(&self, id: &str, patch: &EntryPatch) -> StoreResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        if let Some(status) = patch.status.as_ref().and_then(|s| s.as_deref()) {
            self.domain.check_status(status)?;
        }
        self.ensure_schema()?;

        let mut body = json!({ "properties": encode_patch(self.domain, patch) });
        if let Some(icon) = &patch.icon_url {
            body["icon"] = external_file(icon);
        }
        if let Some(cover) = &patch.cover_url {
            body["cover"] = external_file(cover);
        }

        self.transport
            .request(Method::Patch, &format!("pages/{}", id), Some(&body))?;
        log::info!("Updated {} entry {}", self.domain.noun(), id);
        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        let body = json!({ "archived": true });
        self.transport
            .request(Method::Patch, &format!("pages/{}", id), Some(&body))?;
        log::info!("Archived {} entry {}", self.domain.noun(), id);
        Ok(())
    }
}

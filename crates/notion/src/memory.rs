// crates/notion/src/memory.rs
//! In-memory stand-in for the Notion API
//!
//! Understands the handful of endpoints `NotionStore` calls and keeps pages
//! in a `Vec`, so the full property mapping runs without a network. Clones
//! share state, which lets a test hand one clone to a store and inspect the
//! other.

use crate::error::{StoreError, StoreResult};
use crate::schema::{database_json, NAME};
use crate::transport::{Method, Transport};
use serde_json::{json, Value};
use shelfkeeper_core::Domain;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct MemoryState {
    database: Value,
    pages: Vec<Value>,
    next_id: u64,
    requests: Vec<(Method, String, Option<Value>)>,
    fail_next: Option<(u16, String)>,
}

#[derive(Debug, Clone)]
pub struct MemoryTransport {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryTransport {
    /// Empty database with the collection's layout
    pub fn new(domain: Domain) -> Self {
        Self::with_database(database_json(domain))
    }

    /// Empty database described by a `GET /databases/{id}` body
    pub fn with_database(database: Value) -> Self {
        Self {
            state: Rc::new(RefCell::new(MemoryState {
                database,
                next_id: 1,
                ..Default::default()
            })),
        }
    }

    /// Makes the next request fail with the given status
    pub fn fail_next(&self, status: u16, message: impl Into<String>) {
        self.state.borrow_mut().fail_next = Some((status, message.into()));
    }

    /// Stored page by id, including archived ones
    pub fn page(&self, id: &str) -> Option<Value> {
        self.state
            .borrow()
            .pages
            .iter()
            .find(|p| p["id"] == id)
            .cloned()
    }

    /// Pages that are not archived
    pub fn live_pages(&self) -> Vec<Value> {
        self.state
            .borrow()
            .pages
            .iter()
            .filter(|p| !is_archived(p))
            .cloned()
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.state.borrow().requests.len()
    }

    /// Method and path of every request so far
    pub fn requests(&self) -> Vec<(Method, String)> {
        self.state
            .borrow()
            .requests
            .iter()
            .map(|(method, path, _)| (*method, path.clone()))
            .collect()
    }

    /// Path and body of the most recent request that had a body
    pub fn last_body(&self) -> Option<(String, Value)> {
        self.state
            .borrow()
            .requests
            .iter()
            .rev()
            .find_map(|(_, path, body)| body.clone().map(|b| (path.clone(), b)))
    }

    fn handle(
        state: &mut MemoryState,
        method: Method,
        segments: &[&str],
        body: &Value,
    ) -> StoreResult<Value> {
        match (method, segments) {
            (Method::Get, ["databases", _]) => Ok(state.database.clone()),
            (Method::Post, ["databases", _, "query"]) => Ok(Self::query(state, body)),
            (Method::Post, ["pages"]) => Self::create(state, body),
            (Method::Patch, ["pages", id]) => Self::patch(state, id, body),
            _ => Err(StoreError::Remote {
                status: 400,
                message: format!("Invalid request URL: {}", segments.join("/")),
            }),
        }
    }

    fn query(state: &MemoryState, body: &Value) -> Value {
        let needle = body["filter"]["title"]["contains"]
            .as_str()
            .map(str::to_lowercase);

        let mut matches: Vec<&Value> = state
            .pages
            .iter()
            .filter(|p| !is_archived(p))
            .filter(|p| match &needle {
                Some(needle) => title_of(p).to_lowercase().contains(needle),
                None => true,
            })
            .collect();
        matches.sort_by_key(|p| title_of(p).to_lowercase());

        let start: usize = body["start_cursor"]
            .as_str()
            .and_then(|c| c.parse().ok())
            .unwrap_or(0);
        let size = body["page_size"].as_u64().unwrap_or(100) as usize;
        let end = (start + size).min(matches.len());
        let has_more = end < matches.len();

        json!({
            "object": "list",
            "results": matches.get(start..end).unwrap_or_default(),
            "has_more": has_more,
            "next_cursor": has_more.then(|| end.to_string()),
        })
    }

    fn create(state: &mut MemoryState, body: &Value) -> StoreResult<Value> {
        let properties = body["properties"].as_object().cloned().unwrap_or_default();
        for (name, value) in &properties {
            check_property(&state.database, name, value)?;
        }

        let id = format!("page-{}", state.next_id);
        state.next_id += 1;

        let page = json!({
            "object": "page",
            "id": id,
            "url": format!("https://www.notion.so/{}", id),
            "archived": false,
            "parent": body["parent"].clone(),
            "icon": body["icon"].clone(),
            "cover": body["cover"].clone(),
            "properties": properties,
        });
        state.pages.push(page.clone());
        Ok(page)
    }

    fn patch(state: &mut MemoryState, id: &str, body: &Value) -> StoreResult<Value> {
        if let Some(properties) = body["properties"].as_object() {
            for (name, value) in properties {
                check_property(&state.database, name, value)?;
            }
        }

        let page = state
            .pages
            .iter_mut()
            .find(|p| p["id"] == id)
            .ok_or_else(|| StoreError::Remote {
                status: 404,
                message: format!("Could not find page with ID: {}", id),
            })?;

        if let Some(properties) = body["properties"].as_object() {
            for (name, value) in properties {
                page["properties"][name] = value.clone();
            }
        }
        for key in ["icon", "cover", "archived"] {
            if let Some(value) = body.get(key) {
                page[key] = value.clone();
            }
        }

        Ok(page.clone())
    }
}

impl Transport for MemoryTransport {
    fn request(&self, method: Method, path: &str, body: Option<&Value>) -> StoreResult<Value> {
        let mut state = self.state.borrow_mut();
        state
            .requests
            .push((method, path.to_string(), body.cloned()));

        if let Some((status, message)) = state.fail_next.take() {
            return Err(StoreError::Remote { status, message });
        }

        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        Self::handle(&mut state, method, &segments, body.unwrap_or(&Value::Null))
    }
}

fn is_archived(page: &Value) -> bool {
    page["archived"].as_bool().unwrap_or(false)
}

fn title_of(page: &Value) -> String {
    page["properties"][NAME]["title"]
        .as_array()
        .map(|chunks| {
            chunks
                .iter()
                .filter_map(|c| c["text"]["content"].as_str())
                .collect()
        })
        .unwrap_or_default()
}

/// Rejects properties the database does not define, like Notion does
fn check_property(database: &Value, name: &str, value: &Value) -> StoreResult<()> {
    let kind = database["properties"][name]["type"].as_str().ok_or_else(|| {
        StoreError::Remote {
            status: 400,
            message: format!("{} is not a property that exists.", name),
        }
    })?;

    if value.get(kind).is_none() {
        return Err(StoreError::Remote {
            status: 400,
            message: format!("{} is expected to be {}.", name, kind),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_route() {
        let transport = MemoryTransport::new(Domain::Games);
        let err = transport.request(Method::Get, "users/me", None).unwrap_err();
        assert!(matches!(err, StoreError::Remote { status: 400, .. }));
    }

    #[test]
    fn test_fail_next_only_once() {
        let transport = MemoryTransport::new(Domain::Games);
        transport.fail_next(503, "Service unavailable");
        assert!(transport.request(Method::Get, "databases/x", None).is_err());
        assert!(transport.request(Method::Get, "databases/x", None).is_ok());
        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn test_rejects_unknown_property() {
        let transport = MemoryTransport::new(Domain::Games);
        let body = json!({ "properties": { "Rating": { "number": 5 } } });
        let err = transport
            .request(Method::Post, "pages", Some(&body))
            .unwrap_err();
        assert!(err.to_string().contains("Rating is not a property"));
    }

    #[test]
    fn test_clones_share_pages() {
        let transport = MemoryTransport::new(Domain::Games);
        let other = transport.clone();
        let body = json!({ "properties": { "Name": { "title": [] } } });
        transport.request(Method::Post, "pages", Some(&body)).unwrap();
        assert_eq!(other.live_pages().len(), 1);
    }
}

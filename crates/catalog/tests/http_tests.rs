//! Catalog sources against a local HTTP server with canned replies

use shelfkeeper_catalog::{
    CatalogSource, GoogleBooksSource, SearchMode, SearchQuery, SourceError, SteamGridDbSource,
};
use shelfkeeper_core::{CatalogItem, Details, Domain};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// Answers one connection per canned reply, in order, and records request targets
struct StubServer {
    base_url: String,
    targets: Arc<Mutex<Vec<String>>>,
    handle: Option<JoinHandle<()>>,
}

impl StubServer {
    fn start(replies: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let targets = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&targets);

        let handle = thread::spawn(move || {
            for (status, body) in replies {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                let mut reader = BufReader::new(stream);

                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                let target = request_line.split_whitespace().nth(1).unwrap_or("").to_string();
                seen.lock().unwrap().push(target);

                loop {
                    let mut header = String::new();
                    if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                        break;
                    }
                }

                let response = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let mut stream = reader.into_inner();
                stream.write_all(response.as_bytes()).unwrap();
                stream.flush().unwrap();
            }
        });

        Self {
            base_url,
            targets,
            handle: Some(handle),
        }
    }

    /// Waits for every reply to be served and returns the request targets
    fn finish(mut self) -> Vec<String> {
        if let Some(handle) = self.handle.take() {
            handle.join().unwrap();
        }
        self.targets.lock().unwrap().clone()
    }

    fn targets(&self) -> Vec<String> {
        self.targets.lock().unwrap().clone()
    }
}

const NO_VOLUMES: &str = r#"{"kind":"books#volumes","totalItems":0}"#;

const DUNE_VOLUMES: &str = r#"{"kind":"books#volumes","totalItems":1,"items":[
    {"id":"B1hSG45JCX4C","volumeInfo":{"title":"Dune","authors":["Frank Herbert"],
     "publishedDate":"1965"}}]}"#;

#[test]
fn test_books_retry_without_language_when_nothing_found() {
    let server = StubServer::start(vec![(200, NO_VOLUMES), (200, DUNE_VOLUMES)]);
    let source = GoogleBooksSource::with_base_url(&server.base_url, Some("pl".to_string()));

    let items = source.search(&SearchQuery::new("Dune")).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Dune");
    assert_eq!(items[0].year, Some(1965));

    let targets = server.finish();
    assert_eq!(targets.len(), 2);
    assert!(targets[0].starts_with("/volumes?"));
    assert!(targets[0].contains("q=intitle%3ADune"));
    assert!(targets[0].contains("langRestrict=pl"));
    assert!(targets[1].starts_with("/volumes?"));
    assert!(!targets[1].contains("langRestrict"));
}

#[test]
fn test_books_found_in_language_make_one_request() {
    let server = StubServer::start(vec![(200, DUNE_VOLUMES)]);
    let source = GoogleBooksSource::with_base_url(&server.base_url, Some("pl".to_string()));

    let items = source.search(&SearchQuery::new("Dune")).unwrap();
    assert_eq!(items.len(), 1);

    let targets = server.finish();
    assert_eq!(targets.len(), 1);
    assert!(targets[0].contains("langRestrict=pl"));
}

#[test]
fn test_isbn_search_never_drops_language() {
    // a second reply is queued so an unwanted retry would be served and show up
    let server = StubServer::start(vec![(200, NO_VOLUMES), (200, DUNE_VOLUMES)]);
    let source = GoogleBooksSource::with_base_url(&server.base_url, Some("pl".to_string()));

    let query = SearchQuery::new("978-0-441-01359-3").with_mode(SearchMode::Isbn);
    let result = source.search(&query);
    assert!(matches!(result, Err(SourceError::NoResults)));

    let targets = server.targets();
    assert_eq!(targets.len(), 1);
    assert!(targets[0].contains("q=isbn%3A9780441013593"));
    assert!(targets[0].contains("langRestrict=pl"));
}

#[test]
fn test_steamgriddb_search_and_artwork() {
    let server = StubServer::start(vec![
        (
            200,
            r#"{"success":true,"data":[{"id":7,"name":"Portal 2","release":1303171200}]}"#,
        ),
        (
            200,
            r#"{"success":true,"data":[
                {"id":1,"url":"https://cdn.test/icon.ico","mime":"image/vnd.microsoft.icon"},
                {"id":2,"url":"https://cdn.test/icon.png","mime":"image/png"}]}"#,
        ),
        (
            200,
            r#"{"success":true,"data":[{"id":3,"url":"https://cdn.test/grid.png","mime":"image/png"}]}"#,
        ),
    ]);
    let source = SteamGridDbSource::with_base_url(&server.base_url, "sgdb-key");

    let items = source.search(&SearchQuery::new("Portal 2")).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].source_id, "7");
    assert_eq!(items[0].year, Some(2011));

    let item = source.enrich(items[0].clone()).unwrap();
    assert_eq!(item.icon_url.as_deref(), Some("https://cdn.test/icon.png"));
    assert_eq!(item.cover_url.as_deref(), Some("https://cdn.test/grid.png"));
    assert!(matches!(item.details, Details::Game));

    assert_eq!(
        server.finish(),
        vec![
            "/search/autocomplete/Portal%202".to_string(),
            "/icons/game/7".to_string(),
            "/grids/game/7".to_string(),
        ]
    );
}

#[test]
fn test_steamgriddb_missing_artwork_keeps_item() {
    let server = StubServer::start(vec![
        (401, r#"{"success":false,"errors":["Invalid API key"]}"#),
        (200, r#"{"success":true,"data":[]}"#),
    ]);
    let source = SteamGridDbSource::with_base_url(&server.base_url, "bad-key");

    let item = CatalogItem::new(Domain::Games, "7", "Portal 2");
    let item = source.enrich(item).unwrap();
    assert_eq!(item.title, "Portal 2");
    assert_eq!(item.icon_url, None);
    assert_eq!(item.cover_url, None);

    assert_eq!(server.finish().len(), 2);
}

#[test]
fn test_http_error_status_is_network_error() {
    let server = StubServer::start(vec![(503, r#"{"error":"busy"}"#)]);
    let source = SteamGridDbSource::with_base_url(&server.base_url, "sgdb-key");

    match source.search(&SearchQuery::new("Portal")) {
        Err(SourceError::Network(message)) => assert!(message.contains("503")),
        other => panic!("unexpected {:?}", other),
    }
    server.finish();
}

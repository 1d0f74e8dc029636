// crates/notion/src/transport.rs
//! Raw JSON requests against the Notion API

use crate::error::{StoreError, StoreResult};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

pub const NOTION_API_BASE: &str = "https://api.notion.com/v1";

/// API version sent with every request
pub const NOTION_VERSION: &str = "2022-06-28";

/// HTTP verbs the adapter needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        }
    }
}

/// Sends one request and returns the decoded JSON body
///
/// `path` is relative to the API root, e.g. `pages/{id}`. Implementations map
/// non-success statuses to `StoreError::Remote`.
pub trait Transport {
    fn request(&self, method: Method, path: &str, body: Option<&Value>) -> StoreResult<Value>;
}

/// Blocking HTTPS transport authenticated with an integration token
pub struct HttpTransport {
    inner: Client,
    base_url: String,
    token: String,
}

impl HttpTransport {
    pub fn new(token: impl Into<String>) -> StoreResult<Self> {
        Self::with_base_url(NOTION_API_BASE, token)
    }

    pub fn with_base_url(base_url: &str, token: impl Into<String>) -> StoreResult<Self> {
        let inner = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION"),
            ))
            .build()
            .map_err(|e| StoreError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            inner,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }
}

impl Transport for HttpTransport {
    fn request(&self, method: Method, path: &str, body: Option<&Value>) -> StoreResult<Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        log::debug!("{} {}", method.as_str(), url);

        let builder = match method {
            Method::Get => self.inner.get(&url),
            Method::Post => self.inner.post(&url),
            Method::Patch => self.inner.patch(&url),
        };

        let mut builder = builder
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .map_err(|e| StoreError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| StoreError::Network(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(remote_error(status.as_u16(), &text));
        }

        serde_json::from_str(&text)
            .map_err(|e| StoreError::Parse(format!("Invalid JSON from Notion: {}", e)))
    }
}

/// Builds `StoreError::Remote` from an error response body
///
/// Notion errors look like `{"object":"error","status":400,"code":"...","message":"..."}`.
pub(crate) fn remote_error(status: u16, body: &str) -> StoreError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "no error message".to_string()
            } else {
                body.trim().chars().take(200).collect()
            }
        });
    StoreError::Remote { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_uses_notion_message() {
        let body = r#"{"object":"error","status":404,"code":"object_not_found","message":"Could not find database"}"#;
        match remote_error(404, body) {
            StoreError::Remote { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Could not find database");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_remote_error_without_json_body() {
        match remote_error(502, "Bad Gateway") {
            StoreError::Remote { message, .. } => assert_eq!(message, "Bad Gateway"),
            other => panic!("unexpected {:?}", other),
        }
        match remote_error(500, "") {
            StoreError::Remote { message, .. } => assert_eq!(message, "no error message"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_transport_builds() {
        assert!(HttpTransport::new("secret_test").is_ok());
    }
}

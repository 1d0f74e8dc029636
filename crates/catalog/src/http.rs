// FILE: crates/catalog/src/http.rs

use crate::{SourceError, SourceResult};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration as StdDuration;

/// Blocking JSON client shared by the catalog sources
pub(crate) struct JsonClient {
    base_url: String,
    bearer: Option<String>,
    client: Option<reqwest::blocking::Client>,
}

impl JsonClient {
    pub(crate) fn new(base_url: &str, bearer: Option<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(StdDuration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION"),
            ))
            .build()
            .ok();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer,
            client,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL with percent-encoded path segments appended
    pub(crate) fn url(&self, segments: &[&str]) -> SourceResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SourceError::InvalidQuery(format!("Bad base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| SourceError::InvalidQuery("Base URL cannot take a path".to_string()))?
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn get_json<T: DeserializeOwned>(&self, url: Url) -> SourceResult<T> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| SourceError::Network("HTTP client not available".to_string()))?;

        log::debug!("GET {}", url);

        let mut request = client.get(url);
        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| SourceError::Network(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Network(format!(
                "HTTP {} {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json()
            .map_err(|e| SourceError::Parse(format!("JSON parse error: {}", e)))
    }
}

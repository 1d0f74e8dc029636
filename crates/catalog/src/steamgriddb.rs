// FILE: crates/catalog/src/steamgriddb.rs

use crate::http::JsonClient;
use crate::{CatalogSource, SearchQuery, SourceError, SourceMetadata, SourceResult};
use chrono::{DateTime, Datelike};
use serde::Deserialize;
use shelfkeeper_core::{CatalogItem, Domain};

/// SteamGridDB game search with icon and poster artwork
pub struct SteamGridDbSource {
    http: JsonClient,
}

impl SteamGridDbSource {
    const API_BASE: &'static str = "https://www.steamgriddb.com/api/v2";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(Self::API_BASE, api_key)
    }

    pub fn with_base_url(base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            http: JsonClient::new(base_url, Some(api_key.into())),
        }
    }

    /// Icons for a game, PNG preferred
    pub fn icon_url(&self, game_id: &str) -> SourceResult<Option<String>> {
        let url = self.http.url(&["icons", "game", game_id])?;
        let body: Envelope<Asset> = self.http.get_json(url)?;
        Ok(pick_icon(&body.into_data()?))
    }

    /// First vertical grid (poster) for a game
    pub fn poster_url(&self, game_id: &str) -> SourceResult<Option<String>> {
        let url = self.http.url(&["grids", "game", game_id])?;
        let body: Envelope<Asset> = self.http.get_json(url)?;
        Ok(body.into_data()?.into_iter().next().map(|a| a.url))
    }
}

impl CatalogSource for SteamGridDbSource {
    fn search(&self, query: &SearchQuery) -> SourceResult<Vec<CatalogItem>> {
        let text = query.checked_text()?;
        let url = self.http.url(&["search", "autocomplete", text])?;
        let body: Envelope<GameHit> = self.http.get_json(url)?;
        parse_search(body, query.limit)
    }

    fn enrich(&self, mut item: CatalogItem) -> SourceResult<CatalogItem> {
        // Missing artwork is not worth failing an Add over
        match self.icon_url(&item.source_id) {
            Ok(icon) => item.icon_url = icon,
            Err(e) => log::warn!("No icon for game {}: {}", item.source_id, e),
        }
        match self.poster_url(&item.source_id) {
            Ok(cover) => item.cover_url = cover,
            Err(e) => log::warn!("No poster for game {}: {}", item.source_id, e),
        }
        Ok(item)
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "SteamGridDB".to_string(),
            domain: Domain::Games,
            base_url: self.http.base_url().to_string(),
            requires_auth: true,
        }
    }
}

/// Every SteamGridDB response is wrapped in `{success, data, errors}`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default)]
    errors: Vec<String>,
}

impl<T> Envelope<T> {
    fn into_data(self) -> SourceResult<Vec<T>> {
        if self.success {
            Ok(self.data)
        } else if self.errors.is_empty() {
            Err(SourceError::Network("SteamGridDB reported failure".to_string()))
        } else {
            Err(SourceError::Network(self.errors.join("; ")))
        }
    }
}

#[derive(Debug, Deserialize)]
struct GameHit {
    id: u64,
    #[serde(default)]
    name: String,
    /// Unix timestamp of the release date
    #[serde(default)]
    release: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Asset {
    #[serde(default)]
    url: String,
    #[serde(default)]
    mime: String,
}

fn parse_search(body: Envelope<GameHit>, limit: usize) -> SourceResult<Vec<CatalogItem>> {
    let items: Vec<CatalogItem> = body
        .into_data()?
        .into_iter()
        .filter(|hit| !hit.name.trim().is_empty())
        .take(limit)
        .map(|hit| {
            CatalogItem::new(Domain::Games, hit.id.to_string(), hit.name.trim())
                .with_year(hit.release.and_then(release_year))
        })
        .collect();

    if items.is_empty() {
        Err(SourceError::NoResults)
    } else {
        Ok(items)
    }
}

fn release_year(timestamp: i64) -> Option<i32> {
    DateTime::from_timestamp(timestamp, 0).map(|date| date.year())
}

fn pick_icon(assets: &[Asset]) -> Option<String> {
    assets
        .iter()
        .find(|a| a.mime.ends_with("png"))
        .or_else(|| assets.first())
        .map(|a| a.url.clone())
        .filter(|url| !url.is_empty())
}

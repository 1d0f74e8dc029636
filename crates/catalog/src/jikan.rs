// FILE: crates/catalog/src/jikan.rs

use crate::http::JsonClient;
use crate::{CatalogSource, SearchQuery, SourceError, SourceMetadata, SourceResult};
use serde::Deserialize;
use shelfkeeper_core::{AiringState, AnimeDetails, CatalogItem, Details, Domain};

/// Jikan (unofficial MyAnimeList API) anime search
pub struct JikanSource {
    http: JsonClient,
}

impl JikanSource {
    const API_BASE: &'static str = "https://api.jikan.moe/v4";

    /// Jikan caps `limit` at 25
    const MAX_LIMIT: usize = 25;

    pub fn new() -> Self {
        Self::with_base_url(Self::API_BASE)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: JsonClient::new(base_url, None),
        }
    }

    /// Full record for one anime, including relations and external links
    pub fn details(&self, mal_id: &str) -> SourceResult<CatalogItem> {
        let url = self.http.url(&["anime", mal_id, "full"])?;
        let body: Single = self.http.get_json(url)?;
        Ok(body.data.into_item())
    }
}

impl Default for JikanSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogSource for JikanSource {
    fn search(&self, query: &SearchQuery) -> SourceResult<Vec<CatalogItem>> {
        let text = query.checked_text()?;
        let mut url = self.http.url(&["anime"])?;
        url.query_pairs_mut()
            .append_pair("q", text)
            .append_pair("limit", &query.limit.min(Self::MAX_LIMIT).to_string());

        let body: Page = self.http.get_json(url)?;
        parse_search(body, query.limit)
    }

    fn enrich(&self, item: CatalogItem) -> SourceResult<CatalogItem> {
        match self.details(&item.source_id) {
            Ok(full) => Ok(full),
            Err(e) => {
                log::warn!(
                    "Could not fetch full details for {}: {}",
                    item.source_id,
                    e
                );
                Ok(item)
            }
        }
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Jikan".to_string(),
            domain: Domain::Anime,
            base_url: self.http.base_url().to_string(),
            requires_auth: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    data: Vec<AnimeRecord>,
}

#[derive(Debug, Deserialize)]
struct Single {
    data: AnimeRecord,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AnimeRecord {
    mal_id: u64,
    title: String,
    url: Option<String>,
    episodes: Option<u32>,
    status: Option<String>,
    synopsis: Option<String>,
    year: Option<i32>,
    aired: Aired,
    images: Images,
    studios: Vec<Named>,
    relations: Vec<Relation>,
    external: Vec<ExternalLink>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Aired {
    from: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Images {
    jpg: ImageSet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImageSet {
    image_url: Option<String>,
    large_image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Named {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Relation {
    relation: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExternalLink {
    name: String,
    url: String,
}

impl AnimeRecord {
    fn start_year(&self) -> Option<i32> {
        self.year.or_else(|| {
            self.aired
                .from
                .as_deref()
                .and_then(|date| date.get(..4))
                .and_then(|y| y.parse().ok())
        })
    }

    /// MAL has no season count; sequels and prequels approximate it,
    /// and a show without either counts as one season
    fn seasons(&self) -> u32 {
        let related = self
            .relations
            .iter()
            .filter(|r| r.relation == "Sequel" || r.relation == "Prequel")
            .count() as u32;
        related + 1
    }

    fn into_item(self) -> CatalogItem {
        let image = self
            .images
            .jpg
            .large_image_url
            .clone()
            .or_else(|| self.images.jpg.image_url.clone())
            .filter(|url| !url.is_empty());

        let details = AnimeDetails {
            episodes: self.episodes,
            seasons: Some(self.seasons()),
            studios: self
                .studios
                .iter()
                .map(|s| s.name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
            airing: self.status.as_deref().map(AiringState::from_source),
            synopsis: self.synopsis.clone().filter(|s| !s.trim().is_empty()),
            mal_url: self.url.clone(),
            anidb_url: self
                .external
                .iter()
                .find(|link| link.name.eq_ignore_ascii_case("AniDB"))
                .map(|link| link.url.clone()),
        };

        let mut item = CatalogItem::new(Domain::Anime, self.mal_id.to_string(), self.title.trim())
            .with_year(self.start_year());
        item.icon_url = image.clone();
        item.cover_url = image;
        item.details = Details::Anime(details);
        item
    }
}

fn parse_search(body: Page, limit: usize) -> SourceResult<Vec<CatalogItem>> {
    let items: Vec<CatalogItem> = body
        .data
        .into_iter()
        .filter(|record| !record.title.trim().is_empty())
        .take(limit)
        .map(AnimeRecord::into_item)
        .collect();

    if items.is_empty() {
        Err(SourceError::NoResults)
    } else {
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{"data":{
        "mal_id":1,
        "url":"https://myanimelist.net/anime/1/Cowboy_Bebop",
        "images":{"jpg":{"image_url":"https://cdn.myanimelist.net/images/anime/4/19644.jpg",
                         "large_image_url":"https://cdn.myanimelist.net/images/anime/4/19644l.jpg"}},
        "title":"Cowboy Bebop",
        "episodes":26,
        "status":"Finished Airing",
        "aired":{"from":"1998-04-03T00:00:00+00:00"},
        "synopsis":"Crime is timeless.",
        "year":1998,
        "studios":[{"mal_id":14,"name":"Sunrise"}],
        "relations":[
            {"relation":"Adaptation","entry":[]},
            {"relation":"Side story","entry":[]},
            {"relation":"Sequel","entry":[]}
        ],
        "external":[{"name":"AniDB","url":"https://anidb.net/perl-bin/animedb.pl?show=anime&aid=23"}]
    }}"#;

    #[test]
    fn test_metadata() {
        let meta = JikanSource::new().metadata();
        assert_eq!(meta.name, "Jikan");
        assert!(!meta.requires_auth);
        assert_eq!(meta.domain, Domain::Anime);
    }

    #[test]
    fn test_full_record_mapping() {
        let body: Single = serde_json::from_str(FULL).unwrap();
        let item = body.data.into_item();

        assert_eq!(item.source_id, "1");
        assert_eq!(item.title, "Cowboy Bebop");
        assert_eq!(item.year, Some(1998));
        assert_eq!(
            item.cover_url.as_deref(),
            Some("https://cdn.myanimelist.net/images/anime/4/19644l.jpg")
        );

        let Details::Anime(details) = item.details else {
            panic!("expected anime details");
        };
        assert_eq!(details.episodes, Some(26));
        assert_eq!(details.seasons, Some(2));
        assert_eq!(details.studios, vec!["Sunrise".to_string()]);
        assert_eq!(details.airing, Some(AiringState::Ended));
        assert!(details.anidb_url.unwrap().contains("anidb.net"));
        assert!(details.mal_url.unwrap().contains("myanimelist.net"));
    }

    #[test]
    fn test_search_record_without_year_uses_aired() {
        let body: Page = serde_json::from_str(
            r#"{"data":[{"mal_id":5,"title":"Frieren","year":null,
                "status":"Currently Airing","aired":{"from":"2023-09-29T00:00:00+00:00"},
                "images":{"jpg":{"image_url":"https://cdn/x.jpg"}}}]}"#,
        )
        .unwrap();
        let items = parse_search(body, 10).unwrap();

        assert_eq!(items[0].year, Some(2023));
        assert_eq!(items[0].icon_url.as_deref(), Some("https://cdn/x.jpg"));
        match &items[0].details {
            Details::Anime(d) => {
                assert_eq!(d.airing, Some(AiringState::Airing));
                assert_eq!(d.seasons, Some(1));
            }
            other => panic!("unexpected details {:?}", other),
        }
    }

    #[test]
    fn test_empty_search_is_no_results() {
        let body: Page = serde_json::from_str(r#"{"data":[],"pagination":{}}"#).unwrap();
        assert_eq!(parse_search(body, 10).unwrap_err(), SourceError::NoResults);
    }

    #[test]
    fn test_search_caps_results() {
        let records: Vec<String> = (1..=15)
            .map(|i| format!(r#"{{"mal_id":{},"title":"Show {}"}}"#, i, i))
            .collect();
        let body: Page =
            serde_json::from_str(&format!(r#"{{"data":[{}]}}"#, records.join(","))).unwrap();
        assert_eq!(parse_search(body, 10).unwrap().len(), 10);
    }

    #[test]
    #[ignore = "Requires network access"]
    fn test_real_search() {
        let source = JikanSource::new();
        match source.search(&SearchQuery::new("Cowboy Bebop").with_limit(5)) {
            Ok(items) => {
                assert!(items.len() <= 5);
                println!("Found {} anime", items.len());
            }
            Err(e) => eprintln!("Search failed: {}", e),
        }
    }
}

// FILE: crates/catalog/src/google_books.rs

use crate::http::JsonClient;
use crate::{CatalogSource, SearchMode, SearchQuery, SourceError, SourceMetadata, SourceResult};
use serde::Deserialize;
use shelfkeeper_core::{BookDetails, CatalogItem, Details, Domain};

/// Google Books volume search
pub struct GoogleBooksSource {
    http: JsonClient,
    language: Option<String>,
}

impl GoogleBooksSource {
    const API_BASE: &'static str = "https://www.googleapis.com/books/v1";

    /// Google Books caps `maxResults` at 40
    const MAX_LIMIT: usize = 40;

    /// `language` restricts results to one ISO 639-1 language first
    pub fn new(language: Option<String>) -> Self {
        Self::with_base_url(Self::API_BASE, language)
    }

    pub fn with_base_url(base_url: &str, language: Option<String>) -> Self {
        Self {
            http: JsonClient::new(base_url, None),
            language: language.filter(|l| !l.is_empty()),
        }
    }

    /// Full volume record
    pub fn volume(&self, volume_id: &str) -> SourceResult<CatalogItem> {
        let url = self.http.url(&["volumes", volume_id])?;
        let volume: Volume = self.http.get_json(url)?;
        Ok(volume.into_item())
    }

    fn fetch(&self, query: &SearchQuery, language: Option<&str>) -> SourceResult<VolumeList> {
        let text = query.checked_text()?;
        let mut url = self.http.url(&["volumes"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", &build_query(text, query.mode))
                .append_pair("maxResults", &query.limit.min(Self::MAX_LIMIT).to_string())
                .append_pair("orderBy", "relevance")
                .append_pair("printType", "books");
            if let Some(lang) = language {
                pairs.append_pair("langRestrict", lang);
            }
        }
        self.http.get_json(url)
    }
}

impl CatalogSource for GoogleBooksSource {
    fn search(&self, query: &SearchQuery) -> SourceResult<Vec<CatalogItem>> {
        let language = self.language.as_deref();
        let first = parse_search(self.fetch(query, language)?, query.limit);

        match (first, language) {
            (Err(SourceError::NoResults), Some(lang)) if query.mode != SearchMode::Isbn => {
                log::warn!(
                    "No books found in '{}', retrying without language restriction",
                    lang
                );
                parse_search(self.fetch(query, None)?, query.limit)
            }
            (result, _) => result,
        }
    }

    fn enrich(&self, item: CatalogItem) -> SourceResult<CatalogItem> {
        match self.volume(&item.source_id) {
            Ok(full) => Ok(full),
            Err(e) => {
                log::warn!("Could not fetch volume {}: {}", item.source_id, e);
                Ok(item)
            }
        }
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Google Books".to_string(),
            domain: Domain::Books,
            base_url: self.http.base_url().to_string(),
            requires_auth: false,
        }
    }
}

/// The `q` parameter for a search mode
fn build_query(text: &str, mode: SearchMode) -> String {
    match mode {
        SearchMode::Title => format!("intitle:{}", text),
        SearchMode::Author => format!("inauthor:{}", text),
        SearchMode::Isbn => format!("isbn:{}", text.replace('-', "")),
        SearchMode::Any => text.to_string(),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VolumeList {
    items: Vec<Volume>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Volume {
    id: String,
    #[serde(rename = "volumeInfo")]
    info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct VolumeInfo {
    title: String,
    authors: Vec<String>,
    publisher: Option<String>,
    published_date: Option<String>,
    description: Option<String>,
    page_count: Option<u32>,
    categories: Vec<String>,
    industry_identifiers: Vec<Identifier>,
    image_links: ImageLinks,
    info_link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Identifier {
    #[serde(rename = "type")]
    kind: String,
    identifier: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ImageLinks {
    extra_large: Option<String>,
    large: Option<String>,
    medium: Option<String>,
    small: Option<String>,
    thumbnail: Option<String>,
}

impl ImageLinks {
    /// Largest available image, cleaned up for embedding
    fn best(&self) -> Option<String> {
        [
            &self.extra_large,
            &self.large,
            &self.medium,
            &self.small,
            &self.thumbnail,
        ]
        .into_iter()
        .flatten()
        .find(|url| !url.is_empty())
        .map(|url| clean_image_url(url))
    }
}

fn clean_image_url(url: &str) -> String {
    let url = match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    };
    url.replace("&zoom=1", "")
}

/// Leading year of `2011`, `2011-04` or `2011-04-19`
fn published_year(date: &str) -> Option<i32> {
    date.split('-').next().and_then(|y| y.trim().parse().ok())
}

impl Volume {
    fn isbn(&self) -> Option<String> {
        let find = |kind: &str| {
            self.info
                .industry_identifiers
                .iter()
                .find(|id| id.kind == kind)
                .map(|id| id.identifier.clone())
        };
        find("ISBN_13").or_else(|| find("ISBN_10"))
    }

    fn into_item(self) -> CatalogItem {
        let image = self.info.image_links.best();
        let isbn = self.isbn();
        let info = self.info;

        let details = BookDetails {
            authors: info.authors,
            publisher: info.publisher,
            description: info.description,
            page_count: info.page_count.filter(|&p| p > 0),
            categories: info.categories,
            isbn,
            info_link: info.info_link,
        };

        let mut item = CatalogItem::new(Domain::Books, self.id, info.title.trim())
            .with_year(info.published_date.as_deref().and_then(published_year));
        item.icon_url = image.clone();
        item.cover_url = image;
        item.details = Details::Book(details);
        item
    }
}

fn parse_search(body: VolumeList, limit: usize) -> SourceResult<Vec<CatalogItem>> {
    let items: Vec<CatalogItem> = body
        .items
        .into_iter()
        .filter(|volume| !volume.info.title.trim().is_empty())
        .take(limit)
        .map(Volume::into_item)
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

    const VOLUME: &str = r#"{
        "kind":"books#volume",
        "id":"B1hSG45JCX4C",
        "volumeInfo":{
            "title":"Dune",
            "authors":["Frank Herbert"],
            "publisher":"Penguin",
            "publishedDate":"2003-08-26",
            "description":"Set on the desert planet Arrakis.",
            "industryIdentifiers":[
                {"type":"ISBN_10","identifier":"0441013597"},
                {"type":"ISBN_13","identifier":"9780441013593"}
            ],
            "pageCount":528,
            "categories":["Fiction"],
            "imageLinks":{
                "smallThumbnail":"http://books.google.com/books/content?id=B1h&printsec=frontcover&img=1&zoom=5",
                "thumbnail":"http://books.google.com/books/content?id=B1h&printsec=frontcover&img=1&zoom=1&source=gbs_api"
            },
            "infoLink":"https://books.google.com/books?id=B1hSG45JCX4C"
        }
    }"#;

    #[test]
    fn test_metadata() {
        let meta = GoogleBooksSource::new(Some("pl".into())).metadata();
        assert_eq!(meta.name, "Google Books");
        assert_eq!(meta.domain, Domain::Books);
    }

    #[test]
    fn test_build_query_modes() {
        assert_eq!(build_query("Dune", SearchMode::Title), "intitle:Dune");
        assert_eq!(build_query("Herbert", SearchMode::Author), "inauthor:Herbert");
        assert_eq!(
            build_query("978-0-441-01359-3", SearchMode::Isbn),
            "isbn:9780441013593"
        );
        assert_eq!(build_query("desert spice", SearchMode::Any), "desert spice");
    }

    #[test]
    fn test_volume_mapping() {
        let volume: Volume = serde_json::from_str(VOLUME).unwrap();
        let item = volume.into_item();

        assert_eq!(item.source_id, "B1hSG45JCX4C");
        assert_eq!(item.year, Some(2003));
        assert_eq!(
            item.cover_url.as_deref(),
            Some("https://books.google.com/books/content?id=B1h&printsec=frontcover&img=1&source=gbs_api")
        );

        let Details::Book(book) = item.details else {
            panic!("expected book details");
        };
        assert_eq!(book.authors, vec!["Frank Herbert".to_string()]);
        assert_eq!(book.isbn.as_deref(), Some("9780441013593"));
        assert_eq!(book.page_count, Some(528));
        assert_eq!(book.publisher.as_deref(), Some("Penguin"));
    }

    #[test]
    fn test_title_is_stored_without_subtitle() {
        let volume: Volume = serde_json::from_str(
            r#"{"id":"s","volumeInfo":{"title":" Dune Messiah ","subtitle":"Book Two"}}"#,
        )
        .unwrap();
        assert_eq!(volume.into_item().title, "Dune Messiah");
    }

    #[test]
    fn test_isbn_10_fallback() {
        let volume: Volume = serde_json::from_str(
            r#"{"id":"x","volumeInfo":{"title":"Old","industryIdentifiers":[
                {"type":"OTHER","identifier":"UOM:39015"},
                {"type":"ISBN_10","identifier":"0441013597"}]}}"#,
        )
        .unwrap();
        assert_eq!(volume.isbn().as_deref(), Some("0441013597"));
    }

    #[test]
    fn test_best_image_prefers_largest() {
        let links = ImageLinks {
            medium: Some("http://img/medium&zoom=1".into()),
            thumbnail: Some("http://img/thumb".into()),
            ..Default::default()
        };
        assert_eq!(links.best().as_deref(), Some("https://img/medium"));
        assert_eq!(ImageLinks::default().best(), None);
    }

    #[test]
    fn test_published_year_variants() {
        assert_eq!(published_year("1965"), Some(1965));
        assert_eq!(published_year("1965-08"), Some(1965));
        assert_eq!(published_year("unknown"), None);
    }

    #[test]
    fn test_empty_list_is_no_results() {
        let body: VolumeList =
            serde_json::from_str(r#"{"kind":"books#volumes","totalItems":0}"#).unwrap();
        assert_eq!(parse_search(body, 10).unwrap_err(), SourceError::NoResults);
    }

    #[test]
    fn test_empty_language_means_unrestricted() {
        let source = GoogleBooksSource::new(Some(String::new()));
        assert!(source.language.is_none());
    }

    #[test]
    #[ignore = "Requires network access"]
    fn test_real_search_with_fallback() {
        let source = GoogleBooksSource::new(Some("pl".into()));
        let query = SearchQuery::new("Neuromancer").with_mode(SearchMode::Title);
        match source.search(&query) {
            Ok(items) => assert!(items.iter().all(|i| !i.title.is_empty())),
            Err(e) => eprintln!("Search failed: {}", e),
        }
    }
}

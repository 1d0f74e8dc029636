// crates/notion/src/properties.rs
//! Conversion between collection entries and Notion property values

use crate::error::{StoreError, StoreResult};
use crate::schema::{year_property, NAME, STATUS};
use serde_json::{json, Map, Value};
use shelfkeeper_core::{
    AiringState, AnimeDetails, Attributes, BookAttributes, BookDetails, CollectionEntry, Domain,
    EntryPatch, GameAttributes, StoredEntry,
};

/// Notion rejects rich text content longer than this
pub const RICH_TEXT_LIMIT: usize = 2000;

/// Maximum length of a select option name
pub const OPTION_NAME_LIMIT: usize = 100;

/// Cuts text to `limit` characters, never splitting a character
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte, _)) => text[..byte].to_string(),
        None => text.to_string(),
    }
}

/// Select option names may not contain commas
fn option_name(name: &str) -> String {
    truncate(name.replace(',', "").trim(), OPTION_NAME_LIMIT)
}

fn text_chunks(text: &str) -> Value {
    json!([{ "type": "text", "text": { "content": truncate(text, RICH_TEXT_LIMIT) } }])
}

pub fn title_value(text: &str) -> Value {
    json!({ "title": text_chunks(text) })
}

/// `None` clears the property
pub fn rich_text_value(text: Option<&str>) -> Value {
    match text.filter(|t| !t.is_empty()) {
        Some(text) => json!({ "rich_text": text_chunks(text) }),
        None => json!({ "rich_text": [] }),
    }
}

pub fn number_value(number: Option<i64>) -> Value {
    json!({ "number": number })
}

pub fn select_value(name: Option<&str>) -> Value {
    json!({ "select": name.map(|n| json!({ "name": option_name(n) })) })
}

pub fn multi_select_value<S: AsRef<str>>(names: &[S]) -> Value {
    let options: Vec<Value> = names
        .iter()
        .map(|n| option_name(n.as_ref()))
        .filter(|n| !n.is_empty())
        .map(|n| json!({ "name": n }))
        .collect();
    json!({ "multi_select": options })
}

pub fn url_value(url: Option<&str>) -> Value {
    json!({ "url": url })
}

/// Status holds at most one tag; `None` clears it
pub fn status_value(status: Option<&str>) -> Value {
    multi_select_value(status.as_slice())
}

/// Page icon or cover pointing at an external image
pub fn external_file(url: &str) -> Value {
    json!({ "type": "external", "external": { "url": url } })
}

/// Properties for a new page
///
/// Unknown values are left out so Notion keeps the column empty.
pub fn encode_entry(entry: &CollectionEntry) -> Map<String, Value> {
    let domain = entry.domain();
    let mut props = Map::new();

    props.insert(NAME.to_string(), title_value(&entry.title));
    if let Some(year) = entry.year {
        props.insert(
            year_property(domain).to_string(),
            number_value(Some(year.into())),
        );
    }
    props.insert(STATUS.to_string(), status_value(entry.status.as_deref()));

    match &entry.attributes {
        Attributes::Game(game) => {
            if let Some(platform) = game.platform.as_deref() {
                props.insert("Platforma".to_string(), select_value(Some(platform)));
            }
        }
        Attributes::Anime(anime) => encode_anime(anime, &mut props),
        Attributes::Book(book) => encode_book(book, &mut props),
    }

    props
}

fn encode_anime(anime: &AnimeDetails, props: &mut Map<String, Value>) {
    if !anime.studios.is_empty() {
        props.insert("Studio".to_string(), multi_select_value(&anime.studios));
    }
    if let Some(episodes) = anime.episodes {
        props.insert("Episodes".to_string(), number_value(Some(episodes.into())));
    }
    if let Some(seasons) = anime.seasons {
        props.insert("Seasons".to_string(), number_value(Some(seasons.into())));
    }
    if let Some(airing) = anime.airing {
        props.insert("Airing".to_string(), multi_select_value(&[airing.as_tag()]));
    }
    if let Some(synopsis) = anime.synopsis.as_deref() {
        props.insert("Synopsis".to_string(), rich_text_value(Some(synopsis)));
    }
    if let Some(url) = anime.mal_url.as_deref() {
        props.insert("MAL".to_string(), url_value(Some(url)));
    }
    if let Some(url) = anime.anidb_url.as_deref() {
        props.insert("AniDB".to_string(), url_value(Some(url)));
    }
}

fn encode_book(book: &BookAttributes, props: &mut Map<String, Value>) {
    let details = &book.details;
    if !details.authors.is_empty() {
        props.insert("Authors".to_string(), multi_select_value(&details.authors));
    }
    if let Some(format) = book.format.as_deref() {
        props.insert("Format".to_string(), select_value(Some(format)));
    }
    if let Some(pages) = details.page_count {
        props.insert("Pages".to_string(), number_value(Some(pages.into())));
    }
    if !details.categories.is_empty() {
        props.insert(
            "Categories".to_string(),
            multi_select_value(&details.categories),
        );
    }
    for (name, value) in [
        ("Publisher", &details.publisher),
        ("Description", &details.description),
        ("ISBN", &details.isbn),
        ("Info", &details.info_link),
    ] {
        if let Some(text) = value.as_deref() {
            props.insert(name.to_string(), rich_text_value(Some(text)));
        }
    }
}

/// Properties for a partial update; fields absent from the patch are left out
pub fn encode_patch(domain: Domain, patch: &EntryPatch) -> Map<String, Value> {
    let mut props = Map::new();

    if let Some(title) = &patch.title {
        props.insert(NAME.to_string(), title_value(title));
    }
    if let Some(year) = patch.year {
        props.insert(
            year_property(domain).to_string(),
            number_value(Some(year.into())),
        );
    }
    if let Some(status) = &patch.status {
        props.insert(STATUS.to_string(), status_value(status.as_deref()));
    }
    match domain {
        Domain::Games => {
            if let Some(platform) = patch.platform.as_deref() {
                props.insert("Platforma".to_string(), select_value(Some(platform)));
            }
        }
        Domain::Books => {
            if let Some(format) = patch.format.as_deref() {
                props.insert("Format".to_string(), select_value(Some(format)));
            }
        }
        Domain::Anime => {}
    }

    props
}

/// Concatenated text of a `title` or `rich_text` array
///
/// Responses carry `plain_text`; request-shaped values only `text.content`.
fn read_text(value: &Value) -> String {
    value
        .as_array()
        .map(|chunks| {
            chunks
                .iter()
                .filter_map(|chunk| {
                    chunk
                        .get("plain_text")
                        .or_else(|| chunk.get("text").and_then(|t| t.get("content")))
                        .and_then(Value::as_str)
                })
                .collect()
        })
        .unwrap_or_default()
}

fn read_title(props: &Value, name: &str) -> String {
    read_text(&props[name]["title"])
}

fn read_rich_text(props: &Value, name: &str) -> Option<String> {
    Some(read_text(&props[name]["rich_text"])).filter(|t| !t.is_empty())
}

fn read_number(props: &Value, name: &str) -> Option<f64> {
    props[name]["number"].as_f64()
}

fn read_select(props: &Value, name: &str) -> Option<String> {
    props[name]["select"]["name"].as_str().map(str::to_string)
}

fn read_multi_select(props: &Value, name: &str) -> Vec<String> {
    props[name]["multi_select"]
        .as_array()
        .map(|options| {
            options
                .iter()
                .filter_map(|o| o["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn read_url(props: &Value, name: &str) -> Option<String> {
    props[name]["url"].as_str().map(str::to_string)
}

/// URL of an external (or uploaded) icon/cover; emoji icons yield `None`
fn read_file(file: &Value) -> Option<String> {
    file["external"]["url"]
        .as_str()
        .or_else(|| file["file"]["url"].as_str())
        .map(str::to_string)
}

fn read_count(props: &Value, name: &str) -> Option<u32> {
    read_number(props, name).map(|n| n.max(0.0) as u32)
}

/// Reads a page object back into a stored entry
pub fn decode_page(domain: Domain, page: &Value) -> StoreResult<StoredEntry> {
    let id = page["id"]
        .as_str()
        .ok_or_else(|| StoreError::Parse("page without id".to_string()))?;
    let props = &page["properties"];

    let attributes = match domain {
        Domain::Games => Attributes::Game(GameAttributes {
            platform: read_select(props, "Platforma"),
        }),
        Domain::Anime => Attributes::Anime(AnimeDetails {
            episodes: read_count(props, "Episodes"),
            seasons: read_count(props, "Seasons"),
            studios: read_multi_select(props, "Studio"),
            airing: read_multi_select(props, "Airing")
                .first()
                .and_then(|tag| AiringState::from_tag(tag)),
            synopsis: read_rich_text(props, "Synopsis"),
            mal_url: read_url(props, "MAL"),
            anidb_url: read_url(props, "AniDB"),
        }),
        Domain::Books => Attributes::Book(BookAttributes {
            details: BookDetails {
                authors: read_multi_select(props, "Authors"),
                publisher: read_rich_text(props, "Publisher"),
                description: read_rich_text(props, "Description"),
                page_count: read_count(props, "Pages"),
                categories: read_multi_select(props, "Categories"),
                isbn: read_rich_text(props, "ISBN"),
                info_link: read_rich_text(props, "Info"),
            },
            format: read_select(props, "Format"),
        }),
    };

    let entry = CollectionEntry {
        title: read_title(props, NAME),
        year: read_number(props, year_property(domain)).map(|n| n as i32),
        status: read_multi_select(props, STATUS).into_iter().next(),
        icon_url: read_file(&page["icon"]),
        cover_url: read_file(&page["cover"]),
        attributes,
    };

    Ok(StoredEntry {
        id: id.to_string(),
        url: page["url"].as_str().map(str::to_string),
        entry,
    })
}

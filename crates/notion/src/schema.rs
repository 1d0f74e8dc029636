// crates/notion/src/schema.rs
//! Property layout each collection database must have

use crate::error::{StoreError, StoreResult};
use serde_json::Value;
use shelfkeeper_core::Domain;

/// Title property, present in every collection
pub const NAME: &str = "Name";

/// Status tag (multi-select holding at most one option)
pub const STATUS: &str = "Status";

/// Notion property types the collections use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Title,
    Number,
    Select,
    MultiSelect,
    RichText,
    Url,
}

impl PropertyKind {
    /// The `type` string Notion uses
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::Title => "title",
            PropertyKind::Number => "number",
            PropertyKind::Select => "select",
            PropertyKind::MultiSelect => "multi_select",
            PropertyKind::RichText => "rich_text",
            PropertyKind::Url => "url",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySpec {
    pub name: &'static str,
    pub kind: PropertyKind,
}

const fn prop(name: &'static str, kind: PropertyKind) -> PropertySpec {
    PropertySpec { name, kind }
}

const GAMES: &[PropertySpec] = &[
    prop(NAME, PropertyKind::Title),
    prop("Wydano", PropertyKind::Number),
    prop(STATUS, PropertyKind::MultiSelect),
    prop("Platforma", PropertyKind::Select),
];

const ANIME: &[PropertySpec] = &[
    prop(NAME, PropertyKind::Title),
    prop("Wydano", PropertyKind::Number),
    prop(STATUS, PropertyKind::MultiSelect),
    prop("Studio", PropertyKind::MultiSelect),
    prop("Episodes", PropertyKind::Number),
    prop("Seasons", PropertyKind::Number),
    prop("Airing", PropertyKind::MultiSelect),
    prop("Synopsis", PropertyKind::RichText),
    prop("MAL", PropertyKind::Url),
    prop("AniDB", PropertyKind::Url),
];

const BOOKS: &[PropertySpec] = &[
    prop(NAME, PropertyKind::Title),
    prop("Authors", PropertyKind::MultiSelect),
    prop("Published", PropertyKind::Number),
    prop(STATUS, PropertyKind::MultiSelect),
    prop("Format", PropertyKind::Select),
    prop("Pages", PropertyKind::Number),
    prop("Publisher", PropertyKind::RichText),
    prop("Description", PropertyKind::RichText),
    prop("Categories", PropertyKind::MultiSelect),
    prop("ISBN", PropertyKind::RichText),
    prop("Info", PropertyKind::RichText),
];

/// Properties a collection database must define
pub fn schema_for(domain: Domain) -> &'static [PropertySpec] {
    match domain {
        Domain::Games => GAMES,
        Domain::Anime => ANIME,
        Domain::Books => BOOKS,
    }
}

/// Name of the release-year property
pub fn year_property(domain: Domain) -> &'static str {
    match domain {
        Domain::Games | Domain::Anime => "Wydano",
        Domain::Books => "Published",
    }
}

/// Checks a `GET /databases/{id}` response against the collection layout
///
/// Reports the first property that is missing or has another type.
pub fn check_schema(domain: Domain, database: &Value) -> StoreResult<()> {
    let properties = database
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| StoreError::Parse("database has no properties".to_string()))?;

    for spec in schema_for(domain) {
        let found = properties
            .get(spec.name)
            .and_then(|p| p.get("type"))
            .and_then(Value::as_str);

        match found {
            Some(kind) if kind == spec.kind.as_str() => {}
            other => {
                return Err(StoreError::SchemaMismatch {
                    property: spec.name.to_string(),
                    expected: spec.kind.as_str().to_string(),
                    found: other.unwrap_or("missing").to_string(),
                })
            }
        }
    }

    Ok(())
}

/// Database object with exactly the collection layout
///
/// Used by `MemoryTransport` and handy for creating a matching database.
pub fn database_json(domain: Domain) -> Value {
    let properties: serde_json::Map<String, Value> = schema_for(domain)
        .iter()
        .map(|spec| {
            let kind = spec.kind.as_str();
            let mut property = serde_json::Map::new();
            property.insert("name".to_string(), Value::from(spec.name));
            property.insert("type".to_string(), Value::from(kind));
            property.insert(kind.to_string(), Value::Object(serde_json::Map::new()));
            (spec.name.to_string(), Value::Object(property))
        })
        .collect();

    serde_json::json!({
        "object": "database",
        "title": [{ "plain_text": domain.label() }],
        "properties": properties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_schema_has_name_and_status() {
        for domain in Domain::ALL {
            let schema = schema_for(domain);
            assert_eq!(schema[0], prop(NAME, PropertyKind::Title));
            assert!(schema.contains(&prop(STATUS, PropertyKind::MultiSelect)));
        }
    }

    #[test]
    fn test_generated_database_passes() {
        for domain in Domain::ALL {
            assert!(check_schema(domain, &database_json(domain)).is_ok());
        }
    }

    #[test]
    fn test_missing_property() {
        let db = json!({ "properties": {
            "Name": { "type": "title" },
            "Wydano": { "type": "number" },
            "Status": { "type": "multi_select" }
        }});
        match check_schema(Domain::Games, &db) {
            Err(StoreError::SchemaMismatch { property, found, .. }) => {
                assert_eq!(property, "Platforma");
                assert_eq!(found, "missing");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_wrong_type() {
        let mut db = database_json(Domain::Books);
        db["properties"]["Status"]["type"] = json!("select");
        match check_schema(Domain::Books, &db) {
            Err(StoreError::SchemaMismatch {
                property,
                expected,
                found,
            }) => {
                assert_eq!(property, "Status");
                assert_eq!(expected, "multi_select");
                assert_eq!(found, "select");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_extra_properties_are_fine() {
        let mut db = database_json(Domain::Anime);
        db["properties"]["Rating"] = json!({ "type": "number" });
        assert!(check_schema(Domain::Anime, &db).is_ok());
    }
}

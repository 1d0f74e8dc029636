// crates/session/src/prompts.rs
//! Prompts and table layouts shared by the flows

use crate::{SessionResult, Terminal};
use shelfkeeper_catalog::SearchMode;
use shelfkeeper_core::{
    normalize_status, Attributes, Domain, StoredEntry, BOOK_FORMATS, GAME_PLATFORMS,
};

/// Appended to selection menus that can be left without choosing
pub(crate) const BACK: &str = "Back";
pub(crate) const CANCEL: &str = "Cancel";

/// Picks one of `options`, pre-selecting `default` when present
pub(crate) fn choose_from<T: Terminal + ?Sized>(
    terminal: &mut T,
    prompt: &str,
    options: &[&str],
    default: &str,
) -> SessionResult<Option<String>> {
    let items: Vec<String> = options.iter().map(|o| o.to_string()).collect();
    let start = options.iter().position(|o| *o == default).unwrap_or(0);
    Ok(terminal
        .select(prompt, &items, start)?
        .and_then(|index| items.get(index).cloned()))
}

/// Status tag for a collection
///
/// Outer `None` means cancelled; `Some(None)` means "No Status".
pub(crate) fn choose_status<T: Terminal + ?Sized>(
    terminal: &mut T,
    domain: Domain,
    default: &str,
) -> SessionResult<Option<Option<String>>> {
    let choices = domain.status_choices();
    let options: Vec<&str> = choices.iter().map(String::as_str).collect();
    Ok(choose_from(terminal, "Status", &options, default)?.map(|c| normalize_status(&c)))
}

pub(crate) fn choose_platform<T: Terminal + ?Sized>(
    terminal: &mut T,
    default: &str,
) -> SessionResult<Option<String>> {
    choose_from(terminal, "Platform", GAME_PLATFORMS, default)
}

pub(crate) fn choose_format<T: Terminal + ?Sized>(
    terminal: &mut T,
    default: &str,
) -> SessionResult<Option<String>> {
    choose_from(terminal, "Format", BOOK_FORMATS, default)
}

/// How a book query is matched; other domains always search by title
pub(crate) fn choose_search_mode<T: Terminal + ?Sized>(
    terminal: &mut T,
) -> SessionResult<Option<SearchMode>> {
    let labels: Vec<String> = SearchMode::ALL
        .iter()
        .map(|mode| mode.label().to_string())
        .collect();
    Ok(terminal
        .select("Search by", &labels, 0)?
        .and_then(|index| SearchMode::ALL.get(index).copied()))
}

/// Parses a year typed by the user; blank means unknown
pub(crate) fn parse_year(text: &str) -> Result<Option<i32>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<i32>() {
        Ok(year) if (1000..=9999).contains(&year) => Ok(Some(year)),
        _ => Err(format!("'{}' is not a four-digit year", text)),
    }
}

/// Table header for a collection listing
pub(crate) fn table_headers(domain: Domain) -> Vec<String> {
    let columns: &[&str] = match domain {
        Domain::Games => &["#", "Title", "Year", "Status", "Platform"],
        Domain::Anime => &["#", "Title", "Year", "Status", "Episodes", "Airing"],
        Domain::Books => &["#", "Title", "Authors", "Year", "Status", "Format"],
    };
    columns.iter().map(|c| c.to_string()).collect()
}

/// One table row; `number` is the 1-based position on screen
pub(crate) fn table_row(number: usize, stored: &StoredEntry) -> Vec<String> {
    let entry = &stored.entry;
    let year = entry
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "-".to_string());
    let status = entry.status.clone().unwrap_or_else(|| "-".to_string());
    let or_dash = |value: Option<&str>| value.unwrap_or("-").to_string();

    let mut row = vec![number.to_string(), entry.title.clone()];
    match &entry.attributes {
        Attributes::Game(game) => {
            row.extend([year, status, or_dash(game.platform.as_deref())]);
        }
        Attributes::Anime(anime) => {
            row.extend([
                year,
                status,
                anime
                    .episodes
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                or_dash(anime.airing.map(|a| a.as_tag())),
            ]);
        }
        Attributes::Book(book) => {
            let authors = if book.details.authors.is_empty() {
                "-".to_string()
            } else {
                book.details.authors.join(", ")
            };
            row.extend([authors, year, status, or_dash(book.format.as_deref())]);
        }
    }
    row
}

/// Menu label for picking an entry
pub(crate) fn entry_label(stored: &StoredEntry) -> String {
    match stored.entry.year {
        Some(year) => format!("{} ({})", stored.entry.title, year),
        None => stored.entry.title.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Reply, ScriptedTerminal};
    use shelfkeeper_core::{CollectionEntry, NO_STATUS};

    #[test]
    fn test_choose_status_no_status() {
        let mut term = ScriptedTerminal::new([Reply::choose(NO_STATUS)]);
        let status = choose_status(&mut term, Domain::Books, "Reading").unwrap();
        assert_eq!(status, Some(None));
    }

    #[test]
    fn test_choose_status_default() {
        let mut term = ScriptedTerminal::new([Reply::Accept]);
        let status = choose_status(&mut term, Domain::Anime, "Watched").unwrap();
        assert_eq!(status, Some(Some("Watched".to_string())));
    }

    #[test]
    fn test_choose_status_accepting_no_status_default() {
        let mut term = ScriptedTerminal::new([Reply::Accept]);
        let status = choose_status(&mut term, Domain::Games, NO_STATUS).unwrap();
        assert_eq!(status, Some(None));
    }

    #[test]
    fn test_choose_status_cancel() {
        let mut term = ScriptedTerminal::new([Reply::Cancel]);
        assert_eq!(choose_status(&mut term, Domain::Games, "W trakcie").unwrap(), None);
    }

    #[test]
    fn test_choose_search_mode() {
        let mut term = ScriptedTerminal::new([Reply::choose("ISBN")]);
        assert_eq!(choose_search_mode(&mut term).unwrap(), Some(SearchMode::Isbn));
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year(" 2011 "), Ok(Some(2011)));
        assert_eq!(parse_year(""), Ok(None));
        assert!(parse_year("11").is_err());
        assert!(parse_year("soon").is_err());
    }

    #[test]
    fn test_table_row_matches_headers() {
        for domain in Domain::ALL {
            let stored = StoredEntry {
                id: "p".into(),
                url: None,
                entry: CollectionEntry::new(domain, "Title"),
            };
            assert_eq!(table_row(1, &stored).len(), table_headers(domain).len());
        }
    }
}

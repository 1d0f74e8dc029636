//! Collection domains and their fixed vocabularies

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Menu label that clears the status tag instead of setting one
pub const NO_STATUS: &str = "No Status";

/// Platforms offered for games (single-select in Notion)
pub const GAME_PLATFORMS: &[&str] = &["PC", "PS4", "PS5", "Switch"];

/// Formats offered for books (single-select in Notion)
pub const BOOK_FORMATS: &[&str] = &[
    "Physical",
    "Digital (PDF)",
    "Digital (EPUB)",
    "Digital (Other)",
    "Audiobook",
];

const GAME_STATUSES: &[&str] = &["Chcę zagrać", "Przestałem grać", "W trakcie", "Ukończone"];
const ANIME_STATUSES: &[&str] = &["Watching", "To Watch", "Watched", "Abandoned"];
const BOOK_STATUSES: &[&str] = &["Reading", "To Read", "Read", "Abandoned"];

/// The kind of collection a program manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Games,
    Anime,
    Books,
}

impl Domain {
    /// All domains, in menu order
    pub const ALL: [Domain; 3] = [Domain::Games, Domain::Anime, Domain::Books];

    /// Singular noun used in prompts ("Add game")
    pub fn noun(&self) -> &'static str {
        match self {
            Domain::Games => "game",
            Domain::Anime => "anime",
            Domain::Books => "book",
        }
    }

    /// Title-cased collection name used in banners
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Games => "Games",
            Domain::Anime => "Anime",
            Domain::Books => "Books",
        }
    }

    /// Name of the external catalog searched for this domain
    pub fn catalog_name(&self) -> &'static str {
        match self {
            Domain::Games => "SteamGridDB",
            Domain::Anime => "MyAnimeList",
            Domain::Books => "Google Books",
        }
    }

    /// Status tags accepted by the remote `Status` property
    pub fn statuses(&self) -> &'static [&'static str] {
        match self {
            Domain::Games => GAME_STATUSES,
            Domain::Anime => ANIME_STATUSES,
            Domain::Books => BOOK_STATUSES,
        }
    }

    /// Status menu choices, ending with the "No Status" option
    pub fn status_choices(&self) -> Vec<String> {
        self.statuses()
            .iter()
            .map(|s| s.to_string())
            .chain(std::iter::once(NO_STATUS.to_string()))
            .collect()
    }

    /// Checks that a status tag belongs to this domain
    pub fn check_status(&self, status: &str) -> Result<(), ModelError> {
        if self.statuses().contains(&status) {
            Ok(())
        } else {
            Err(ModelError::UnknownStatus {
                domain: *self,
                status: status.to_string(),
            })
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Games => write!(f, "games"),
            Domain::Anime => write!(f, "anime"),
            Domain::Books => write!(f, "books"),
        }
    }
}

impl FromStr for Domain {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "games" | "game" => Ok(Domain::Games),
            "anime" => Ok(Domain::Anime),
            "books" | "book" => Ok(Domain::Books),
            other => Err(ModelError::UnknownDomain(other.to_string())),
        }
    }
}

/// Maps a status menu choice to the tag to store; "No Status" clears it
pub fn normalize_status(choice: &str) -> Option<String> {
    let trimmed = choice.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NO_STATUS) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Whether an anime is still being broadcast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiringState {
    Airing,
    Ended,
}

impl AiringState {
    /// Interprets MyAnimeList's free-form status text
    ///
    /// "Currently Airing", "Airing" and "Not yet aired" count as airing,
    /// anything else ("Finished Airing", ...) as ended.
    pub fn from_source(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "airing" | "currently airing" | "not yet aired" => AiringState::Airing,
            _ => AiringState::Ended,
        }
    }

    /// Multi-select option name in the remote database
    pub fn as_tag(&self) -> &'static str {
        match self {
            AiringState::Airing => "AIRING",
            AiringState::Ended => "ENDED",
        }
    }

    /// Parses the remote tag back
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "AIRING" => Some(AiringState::Airing),
            "ENDED" => Some(AiringState::Ended),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_round_trips_through_str() {
        for domain in Domain::ALL {
            let parsed: Domain = domain.to_string().parse().unwrap();
            assert_eq!(parsed, domain);
        }
        assert!("vinyls".parse::<Domain>().is_err());
    }

    #[test]
    fn test_status_choices_end_with_no_status() {
        let choices = Domain::Anime.status_choices();
        assert_eq!(choices.len(), 5);
        assert_eq!(choices.last().map(String::as_str), Some(NO_STATUS));
    }

    #[test]
    fn test_check_status() {
        assert!(Domain::Books.check_status("To Read").is_ok());
        assert!(Domain::Books.check_status("Watching").is_err());
        assert!(Domain::Games.check_status("W trakcie").is_ok());
    }

    #[test]
    fn test_normalize_status() {
        assert_eq!(normalize_status("Watched"), Some("Watched".to_string()));
        assert_eq!(normalize_status("No Status"), None);
        assert_eq!(normalize_status("no status"), None);
        assert_eq!(normalize_status("  "), None);
    }

    #[test]
    fn test_airing_from_source() {
        assert_eq!(AiringState::from_source("Currently Airing"), AiringState::Airing);
        assert_eq!(AiringState::from_source("Not yet aired"), AiringState::Airing);
        assert_eq!(AiringState::from_source("Finished Airing"), AiringState::Ended);
        assert_eq!(AiringState::from_tag(AiringState::Ended.as_tag()), Some(AiringState::Ended));
    }
}

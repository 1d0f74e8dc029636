//! Key/value access to the settings the programs need
//!
//! `Settings` is what the interactive session talks to: it reads a single
//! key, writes a single key, and persists every write immediately.

use crate::manager::ConfigManager;
use crate::notion_config::{normalize_database_id, NOTION_ID_LEN};
use crate::validation::Validator;
use crate::{Config, ConfigError, ConfigResult};
use shelfkeeper_core::Domain;
use std::fmt;
use std::str::FromStr;

/// A single user-editable setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    NotionToken,
    GamesDatabaseId,
    AnimeDatabaseId,
    BooksDatabaseId,
    SteamGridDbApiKey,
    BooksLanguage,
}

impl SettingKey {
    pub const ALL: [SettingKey; 6] = [
        SettingKey::NotionToken,
        SettingKey::GamesDatabaseId,
        SettingKey::AnimeDatabaseId,
        SettingKey::BooksDatabaseId,
        SettingKey::SteamGridDbApiKey,
        SettingKey::BooksLanguage,
    ];

    /// Dotted path of the key in `config.toml`
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::NotionToken => "notion.token",
            SettingKey::GamesDatabaseId => "notion.games_database_id",
            SettingKey::AnimeDatabaseId => "notion.anime_database_id",
            SettingKey::BooksDatabaseId => "notion.books_database_id",
            SettingKey::SteamGridDbApiKey => "catalog.steamgriddb_api_key",
            SettingKey::BooksLanguage => "catalog.books_language",
        }
    }

    /// Human-readable name for menus
    pub fn label(&self) -> &'static str {
        match self {
            SettingKey::NotionToken => "Notion Token",
            SettingKey::GamesDatabaseId => "Games Database ID",
            SettingKey::AnimeDatabaseId => "Anime Database ID",
            SettingKey::BooksDatabaseId => "Books Database ID",
            SettingKey::SteamGridDbApiKey => "SteamGridDB API Key",
            SettingKey::BooksLanguage => "Google Books Language",
        }
    }

    /// Whether the value should be masked when displayed
    pub fn is_secret(&self) -> bool {
        matches!(self, SettingKey::NotionToken | SettingKey::SteamGridDbApiKey)
    }

    pub fn is_database_id(&self) -> bool {
        matches!(
            self,
            SettingKey::GamesDatabaseId | SettingKey::AnimeDatabaseId | SettingKey::BooksDatabaseId
        )
    }

    /// The database id key of a collection
    pub fn database_for(domain: Domain) -> Self {
        match domain {
            Domain::Games => SettingKey::GamesDatabaseId,
            Domain::Anime => SettingKey::AnimeDatabaseId,
            Domain::Books => SettingKey::BooksDatabaseId,
        }
    }

    /// Keys that must be set before a program can talk to its services
    pub fn required_for(domain: Domain) -> Vec<SettingKey> {
        let mut keys = vec![SettingKey::NotionToken, Self::database_for(domain)];
        if domain == Domain::Games {
            keys.push(SettingKey::SteamGridDbApiKey);
        }
        keys
    }

    /// Keys shown in a program's settings menu
    pub fn relevant_for(domain: Domain) -> Vec<SettingKey> {
        let mut keys = Self::required_for(domain);
        if domain == Domain::Books {
            keys.push(SettingKey::BooksLanguage);
        }
        keys
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidSetting {
                key: s.to_string(),
                reason: "unknown setting".to_string(),
            })
    }
}

impl Config {
    /// Returns the value of a setting, or `MissingSetting` when empty
    pub fn get(&self, key: SettingKey) -> ConfigResult<&str> {
        let value = match key {
            SettingKey::NotionToken => &self.notion.token,
            SettingKey::GamesDatabaseId => &self.notion.games_database_id,
            SettingKey::AnimeDatabaseId => &self.notion.anime_database_id,
            SettingKey::BooksDatabaseId => &self.notion.books_database_id,
            SettingKey::SteamGridDbApiKey => &self.catalog.steamgriddb_api_key,
            SettingKey::BooksLanguage => &self.catalog.books_language,
        };

        if value.is_empty() {
            Err(ConfigError::MissingSetting {
                key: key.as_str().to_string(),
            })
        } else {
            Ok(value)
        }
    }

    /// Sets a setting after normalizing and checking the value
    ///
    /// Database ids may be given as Notion URLs.
    pub fn set(&mut self, key: SettingKey, value: &str) -> ConfigResult<()> {
        let invalid = |e: crate::ValidationError| ConfigError::InvalidSetting {
            key: key.as_str().to_string(),
            reason: e.message,
        };

        let value = if key.is_database_id() {
            let id = normalize_database_id(value);
            Validator::hex_id(&id, NOTION_ID_LEN, key.as_str()).map_err(invalid)?;
            id
        } else {
            let trimmed = value.trim();
            Validator::not_empty(trimmed, key.as_str()).map_err(invalid)?;
            trimmed.to_string()
        };

        let previous = std::mem::replace(self.slot_mut(key), value);
        // other fields may be invalid already; only this one is checked
        if let Err(errors) = self.validate() {
            if let Some(error) = errors.into_iter().find(|e| e.field == key.as_str()) {
                *self.slot_mut(key) = previous;
                return Err(invalid(error));
            }
        }
        Ok(())
    }

    /// Clears a setting
    pub fn unset(&mut self, key: SettingKey) {
        self.slot_mut(key).clear();
    }

    /// Required keys that are still empty for a collection
    pub fn missing_for(&self, domain: Domain) -> Vec<SettingKey> {
        SettingKey::required_for(domain)
            .into_iter()
            .filter(|key| self.get(*key).is_err())
            .collect()
    }

    fn slot_mut(&mut self, key: SettingKey) -> &mut String {
        match key {
            SettingKey::NotionToken => &mut self.notion.token,
            SettingKey::GamesDatabaseId => &mut self.notion.games_database_id,
            SettingKey::AnimeDatabaseId => &mut self.notion.anime_database_id,
            SettingKey::BooksDatabaseId => &mut self.notion.books_database_id,
            SettingKey::SteamGridDbApiKey => &mut self.catalog.steamgriddb_api_key,
            SettingKey::BooksLanguage => &mut self.catalog.books_language,
        }
    }
}

/// Masks a secret for display, keeping the last four characters
pub fn mask_secret(value: &str) -> String {
    if value.is_empty() {
        return "Not set".to_string();
    }
    let chars: Vec<char> = value.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{}{}", "*".repeat(10), tail)
}

/// Settings loaded once at startup and written through on every change
pub struct Settings {
    manager: ConfigManager,
    stored: Config,
    effective: Config,
    load_warnings: Vec<String>,
}

impl Settings {
    /// Loads settings from the manager's config file
    ///
    /// A missing file yields defaults; an unreadable or unparsable file is
    /// an error, since silently replacing it would drop the user's keys.
    /// Invalid values are put back to their defaults and reported through
    /// `load_warnings`; the file is rewritten on the next change.
    pub fn load(manager: ConfigManager) -> ConfigResult<Self> {
        let mut stored = manager.load()?;
        let load_warnings: Vec<String> = stored
            .repair()
            .iter()
            .map(|error| format!("{}, using the default instead", error))
            .collect();
        for warning in &load_warnings {
            log::warn!("{}: {}", manager.config_path().display(), warning);
        }

        let effective = ConfigManager::apply_env_overrides(stored.clone());
        Ok(Self {
            manager,
            stored,
            effective,
            load_warnings,
        })
    }

    /// Problems found in the file when it was loaded
    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    /// Current configuration, including environment overrides
    pub fn config(&self) -> &Config {
        &self.effective
    }

    pub fn manager(&self) -> &ConfigManager {
        &self.manager
    }

    pub fn get(&self, key: SettingKey) -> ConfigResult<&str> {
        self.effective.get(key)
    }

    /// Sets a value and writes the config file immediately
    pub fn set(&mut self, key: SettingKey, value: &str) -> ConfigResult<()> {
        let mut updated = self.stored.clone();
        updated.set(key, value)?;
        self.commit(updated)?;
        log::info!("Updated setting {}", key);
        Ok(())
    }

    /// Clears a value and writes the config file immediately
    pub fn unset(&mut self, key: SettingKey) -> ConfigResult<()> {
        let mut updated = self.stored.clone();
        updated.unset(key);
        self.commit(updated)?;
        log::info!("Cleared setting {}", key);
        Ok(())
    }

    /// Value formatted for display (secrets masked)
    pub fn display_value(&self, key: SettingKey) -> String {
        match self.get(key) {
            Ok(value) if key.is_secret() => mask_secret(value),
            Ok(value) => value.to_string(),
            Err(_) => "Not set".to_string(),
        }
    }

    fn commit(&mut self, updated: Config) -> ConfigResult<()> {
        self.manager.save(&updated)?;
        self.effective = ConfigManager::apply_env_overrides(updated.clone());
        self.stored = updated;
        Ok(())
    }
}

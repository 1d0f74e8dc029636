//! Settings for the shelfkeeper programs
//!
//! One `config.toml` in the user's config directory holds the Notion token,
//! the three database ids and the catalog keys. It has three tables, `app`,
//! `notion` and `catalog`, each a `ConfigSection`. The programs read and
//! change it one `SettingKey` at a time through `Settings`, which writes the
//! file after every change.
//!
//! ```rust,no_run
//! use shelfkeeper_config::{ConfigManager, SettingKey, Settings};
//!
//! let manager = ConfigManager::new().expect("no config directory");
//! let mut settings = Settings::load(manager).expect("corrupt config");
//! settings
//!     .set(SettingKey::AnimeDatabaseId, "https://www.notion.so/me/0123456789abcdef0123456789abcdef")
//!     .expect("could not save");
//! ```

mod error;
mod manager;
mod persistence;
mod settings;
mod validation;

pub mod app_config;
pub mod catalog_config;
pub mod notion_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::{ConfigManager, ENV_LOG_LEVEL, ENV_NOTION_TOKEN, ENV_STEAMGRIDDB_API_KEY};
pub use settings::{mask_secret, SettingKey, Settings};
pub use validation::{ConfigSection, Validator};

pub use app_config::{AppConfig, LogLevel};
pub use catalog_config::CatalogConfig;
pub use notion_config::{normalize_database_id, NotionConfig, NOTION_ID_LEN};

use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: u32 = 1;

/// Contents of `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// File format version, for future migrations
    pub version: u32,
    pub app: AppConfig,
    pub notion: NotionConfig,
    pub catalog: CatalogConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every invalid field across all sections
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = [
            self.app.validate(),
            self.notion.validate(),
            self.catalog.validate(),
        ]
        .into_iter()
        .filter_map(Result::err)
        .flatten()
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Puts every invalid field back to its default and returns what was wrong
    pub fn repair(&mut self) -> Vec<ValidationError> {
        let errors = match self.validate() {
            Ok(()) => return Vec::new(),
            Err(errors) => errors,
        };

        let defaults = Config::default();
        for error in &errors {
            match error.field.as_str() {
                "notion.page_size" => self.notion.page_size = defaults.notion.page_size,
                "notion.games_database_id" => self.notion.games_database_id.clear(),
                "notion.anime_database_id" => self.notion.anime_database_id.clear(),
                "notion.books_database_id" => self.notion.books_database_id.clear(),
                "catalog.result_limit" => self.catalog.result_limit = defaults.catalog.result_limit,
                "catalog.books_language" => {
                    self.catalog.books_language = defaults.catalog.books_language.clone()
                }
                other => log::warn!("No default to restore for {}", other),
            }
        }
        errors
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            notion: NotionConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

// crates/session/src/services.rs
//! Building catalog and store clients from settings

use crate::SessionResult;
use shelfkeeper_catalog::{CatalogSource, GoogleBooksSource, JikanSource, SteamGridDbSource};
use shelfkeeper_config::{Config, SettingKey};
use shelfkeeper_core::Domain;
use shelfkeeper_notion::{CollectionStore, HttpTransport, NotionStore};

/// The remote services one session talks to
pub struct Services {
    pub catalog: Box<dyn CatalogSource>,
    pub store: Box<dyn CollectionStore>,
}

/// Creates services from the current configuration
///
/// Called at startup and again after every settings change.
pub trait ServiceFactory {
    fn build(&self, domain: Domain, config: &Config) -> SessionResult<Services>;
}

/// Real HTTP clients for SteamGridDB, Jikan, Google Books and Notion
#[derive(Debug, Default, Clone, Copy)]
pub struct LiveServices;

impl ServiceFactory for LiveServices {
    fn build(&self, domain: Domain, config: &Config) -> SessionResult<Services> {
        let token = config.get(SettingKey::NotionToken)?;
        let database_id = config.get(SettingKey::database_for(domain))?;

        let catalog: Box<dyn CatalogSource> = match domain {
            Domain::Games => Box::new(SteamGridDbSource::new(
                config.get(SettingKey::SteamGridDbApiKey)?,
            )),
            Domain::Anime => Box::new(JikanSource::new()),
            Domain::Books => Box::new(GoogleBooksSource::new(
                config.catalog.books_language().map(str::to_string),
            )),
        };

        let transport = HttpTransport::new(token)?;
        let store = Box::new(NotionStore::new(transport, database_id, domain));

        log::debug!(
            "Built services for {}: {} + Notion database {}",
            domain,
            catalog.metadata().name,
            database_id
        );

        Ok(Services { catalog, store })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SessionError;
    use shelfkeeper_config::ConfigError;

    const ID: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_missing_token_is_reported() {
        let result = LiveServices.build(Domain::Anime, &Config::default());
        assert!(matches!(
            result,
            Err(SessionError::Config(ConfigError::MissingSetting { .. }))
        ));
    }

    #[test]
    fn test_games_need_steamgriddb_key() {
        let mut config = Config::default();
        config.set(SettingKey::NotionToken, "secret_x").unwrap();
        config.set(SettingKey::GamesDatabaseId, ID).unwrap();

        match LiveServices.build(Domain::Games, &config) {
            Err(SessionError::Config(ConfigError::MissingSetting { key })) => {
                assert_eq!(key, "catalog.steamgriddb_api_key")
            }
            Err(other) => panic!("unexpected error {:?}", other),
            Ok(_) => panic!("games should need a SteamGridDB key"),
        }
    }

    #[test]
    fn test_anime_builds_without_network() {
        let mut config = Config::default();
        config.set(SettingKey::NotionToken, "secret_x").unwrap();
        config.set(SettingKey::AnimeDatabaseId, ID).unwrap();

        let services = LiveServices.build(Domain::Anime, &config).unwrap();
        assert_eq!(services.catalog.metadata().name, "Jikan");
        assert_eq!(services.store.domain(), Domain::Anime);
    }
}

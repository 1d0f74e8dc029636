//! Locating, loading and saving the config file

use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult, LogLevel};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Secrets and the log level can come from the environment instead of the file
pub const ENV_NOTION_TOKEN: &str = "SHELFKEEPER_NOTION_TOKEN";
pub const ENV_STEAMGRIDDB_API_KEY: &str = "SHELFKEEPER_STEAMGRIDDB_API_KEY";
pub const ENV_LOG_LEVEL: &str = "SHELFKEEPER_LOG_LEVEL";

const FILE_NAME: &str = "config.toml";

/// Owns the location of `config.toml`
///
/// By default this is the platform config directory for `shelfkeeper`
/// (`~/.config/shelfkeeper` on Linux, `~/Library/Application Support/shelfkeeper`
/// on macOS, `%APPDATA%\shelfkeeper` on Windows).
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> ConfigResult<Self> {
        let dirs = ProjectDirs::from("", "", "shelfkeeper").ok_or_else(|| {
            ConfigError::PathResolutionError {
                reason: "no home directory to put the config in".to_string(),
            }
        })?;
        Self::with_directory(dirs.config_dir().to_path_buf())
    }

    /// Uses `config_dir` instead of the platform default (`--config-dir`, tests)
    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        Ok(Self {
            persistence: ConfigPersistence::new(config_dir.join(FILE_NAME)),
            config_dir,
        })
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(FILE_NAME)
    }

    /// Reads the file; defaults when it does not exist, an error when corrupt
    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Replaces values with `SHELFKEEPER_*` variables that are set
    ///
    /// Overrides are never written back to the file.
    pub fn apply_env_overrides(mut config: Config) -> Config {
        if let Some(token) = env_value(ENV_NOTION_TOKEN) {
            log::debug!("Notion token taken from {}", ENV_NOTION_TOKEN);
            config.notion.token = token;
        }

        if let Some(key) = env_value(ENV_STEAMGRIDDB_API_KEY) {
            log::debug!("SteamGridDB key taken from {}", ENV_STEAMGRIDDB_API_KEY);
            config.catalog.steamgriddb_api_key = key;
        }

        if let Some(level) = env_value(ENV_LOG_LEVEL) {
            match level.parse::<LogLevel>() {
                Ok(level) => config.app.log_level = level,
                Err(_) => log::warn!("Ignoring unknown {}={}", ENV_LOG_LEVEL, level),
            }
        }

        config
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> (TempDir, ConfigManager) {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_directory(dir.path().to_path_buf()).unwrap();
        (dir, manager)
    }

    #[test]
    fn test_default_location_resolves() {
        let manager = ConfigManager::new().unwrap();
        assert!(manager.config_dir().ends_with("shelfkeeper"));
        assert!(manager.config_path().ends_with("config.toml"));
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let (_dir, manager) = manager();
        assert_eq!(manager.load().unwrap(), Config::default());
        assert!(!manager.config_path().exists());
    }

    #[test]
    fn test_saved_change_loads_back() {
        let (_dir, manager) = manager();
        let mut config = Config::default();
        config.catalog.steamgriddb_api_key = "sgdb-key".into();
        manager.save(&config).unwrap();

        assert_eq!(manager.load().unwrap().catalog.steamgriddb_api_key, "sgdb-key");
    }

    #[test]
    fn test_env_token_overrides_file() {
        let (_dir, manager) = manager();
        let mut config = Config::default();
        config.notion.token = "secret_file".into();
        manager.save(&config).unwrap();

        std::env::set_var(ENV_NOTION_TOKEN, "secret_from_env");
        let config = ConfigManager::apply_env_overrides(manager.load().unwrap());
        std::env::remove_var(ENV_NOTION_TOKEN);

        assert_eq!(config.notion.token, "secret_from_env");
        assert_eq!(manager.load().unwrap().notion.token, "secret_file");
    }
}

//! Reading and writing `config.toml`
//!
//! Writes go to a temp file in the same directory and are renamed over the
//! old file, so a crash never leaves half a config behind. The previous file
//! is kept as `config.toml.backup`.

use crate::{Config, ConfigError, ConfigResult, CONFIG_VERSION};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct ConfigPersistence {
    config_path: PathBuf,
}

fn joined(errors: &[crate::ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ConfigPersistence {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn backup_path(&self) -> PathBuf {
        self.config_path.with_extension("toml.backup")
    }

    /// Missing file means defaults; an empty or unparsable one is an error
    ///
    /// Values are not validated here. `Settings::load` resets the invalid
    /// ones so a bad value typed into the file never blocks later saves.
    pub fn load(&self) -> ConfigResult<Config> {
        let path = &self.config_path;
        if !path.exists() {
            log::info!("No config at {}, starting from defaults", path.display());
            return Ok(Config::default());
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;
        if text.trim().is_empty() {
            return Err(ConfigError::ReadError {
                path: path.clone(),
                source: io::Error::new(io::ErrorKind::InvalidData, "config file is empty"),
            });
        }

        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::ParseError {
            path: path.clone(),
            source,
        })?;

        if config.version > CONFIG_VERSION {
            log::warn!(
                "{} was written by a newer version (format {}, this build reads {})",
                path.display(),
                config.version,
                CONFIG_VERSION
            );
        }
        Ok(config)
    }

    /// Validates, backs up the old file, then replaces it atomically
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        config
            .validate()
            .map_err(|errors| ConfigError::ValidationError(joined(&errors)))?;

        let dir = self
            .config_path
            .parent()
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: format!("{} has no parent directory", self.config_path.display()),
            })?;
        create_dir(dir)?;

        if self.config_path.exists() {
            let backup = self.backup_path();
            fs::copy(&self.config_path, &backup)
                .map_err(|source| ConfigError::BackupError { source })?;
            log::debug!("Previous config kept at {}", backup.display());
        }

        let text = toml::to_string_pretty(config)?;
        let mut file = NamedTempFile::new_in(dir).map_err(ConfigError::IoError)?;
        file.write_all(text.as_bytes()).map_err(ConfigError::IoError)?;
        file.flush().map_err(ConfigError::IoError)?;
        file.persist(&self.config_path)
            .map_err(|e| ConfigError::WriteError {
                path: self.config_path.clone(),
                source: e.error,
            })?;

        log::info!("Saved config to {}", self.config_path.display());
        Ok(())
    }
}

fn create_dir(dir: &Path) -> ConfigResult<()> {
    if dir.exists() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| ConfigError::DirectoryCreationError {
        path: dir.to_path_buf(),
        source,
    })?;
    log::info!("Created config directory {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ID: &str = "0123456789abcdef0123456789abcdef";

    fn in_temp_dir() -> (TempDir, ConfigPersistence) {
        let dir = TempDir::new().unwrap();
        let persistence = ConfigPersistence::new(dir.path().join("config.toml"));
        (dir, persistence)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let (_dir, persistence) = in_temp_dir();
        assert_eq!(persistence.load().unwrap(), Config::default());
    }

    #[test]
    fn test_saved_keys_load_back() {
        let (_dir, persistence) = in_temp_dir();
        let mut config = Config::default();
        config.notion.token = "secret_roundtrip".to_string();
        config.notion.games_database_id = ID.to_string();

        persistence.save(&config).unwrap();
        assert_eq!(persistence.load().unwrap(), config);
    }

    #[test]
    fn test_nested_directory_is_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("config.toml");
        ConfigPersistence::new(path.clone())
            .save(&Config::default())
            .unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_second_save_keeps_previous_file() {
        let (_dir, persistence) = in_temp_dir();
        let mut config = Config::default();
        config.notion.token = "secret_old".to_string();
        persistence.save(&config).unwrap();

        config.notion.token = "secret_new".to_string();
        persistence.save(&config).unwrap();

        let backup = fs::read_to_string(persistence.backup_path()).unwrap();
        assert!(backup.contains("secret_old"));
        assert!(!backup.contains("secret_new"));
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let (_dir, persistence) = in_temp_dir();
        fs::write(&persistence.config_path, "notion = {{{").unwrap();
        assert!(matches!(
            persistence.load(),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_empty_file_is_corruption() {
        let (_dir, persistence) = in_temp_dir();
        fs::write(&persistence.config_path, "   \n").unwrap();
        assert!(persistence.load().unwrap_err().is_corruption());
    }

    #[test]
    fn test_invalid_config_is_not_written() {
        let (_dir, persistence) = in_temp_dir();
        let mut config = Config::default();
        config.notion.anime_database_id = "not-an-id".to_string();

        assert!(matches!(
            persistence.save(&config),
            Err(ConfigError::ValidationError(_))
        ));
        assert!(!persistence.config_path.exists());
    }

    #[test]
    fn test_invalid_values_still_load() {
        let (_dir, persistence) = in_temp_dir();
        fs::write(&persistence.config_path, "[notion]\npage_size = 500\n").unwrap();
        assert_eq!(persistence.load().unwrap().notion.page_size, 500);
    }
}

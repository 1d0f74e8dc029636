// crates/session/src/flows/settings.rs
//! View and change the settings one program uses

use crate::prompts::BACK;
use crate::{SessionResult, Terminal};
use shelfkeeper_config::{SettingKey, Settings};
use shelfkeeper_core::Domain;

/// Settings menu; returns whether anything was saved
pub(crate) fn run<T: Terminal + ?Sized>(
    terminal: &mut T,
    settings: &mut Settings,
    domain: Domain,
) -> SessionResult<bool> {
    let keys = SettingKey::relevant_for(domain);
    let headers = vec!["Setting".to_string(), "Value".to_string()];
    let mut labels: Vec<String> = keys.iter().map(|key| key.label().to_string()).collect();
    labels.push(BACK.to_string());

    let mut changed = false;
    loop {
        let rows: Vec<Vec<String>> = keys
            .iter()
            .map(|key| vec![key.label().to_string(), settings.display_value(*key)])
            .collect();
        terminal.table(&headers, &rows);

        let Some(key) = terminal
            .select("Choose a setting to change", &labels, 0)?
            .and_then(|index| keys.get(index).copied())
        else {
            return Ok(changed);
        };

        // secrets are never echoed back as a default
        let current = if key.is_secret() {
            None
        } else {
            settings.get(key).ok().map(str::to_string)
        };
        let prompt = if key.is_database_id() {
            format!("{} (Notion URL or ID)", key.label())
        } else {
            key.label().to_string()
        };

        let Some(value) = terminal.input(&prompt, current.as_deref())? else {
            continue;
        };
        let value = value.trim();

        let result = if value.is_empty() {
            if key.is_secret() {
                terminal.warn(&format!("{} cannot be empty", key.label()));
                continue;
            }
            settings.unset(key)
        } else {
            settings.set(key, value)
        };

        match result {
            Ok(()) => {
                changed = true;
                terminal.success(&format!("{} saved", key.label()));
            }
            Err(e) => {
                log::warn!("Rejected value for {}: {}", key, e);
                terminal.error(&e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MessageLevel, Reply, ScriptedTerminal};
    use shelfkeeper_config::ConfigManager;
    use tempfile::TempDir;

    const ID: &str = "0123456789abcdef0123456789abcdef";

    fn settings(dir: &TempDir) -> Settings {
        Settings::load(ConfigManager::with_directory(dir.path().to_path_buf()).unwrap()).unwrap()
    }

    #[test]
    fn test_database_id_from_url_is_saved() {
        let dir = TempDir::new().unwrap();
        let mut settings = settings(&dir);
        let url = format!("https://www.notion.so/me/Books-{}?v=1", ID);
        let mut term = ScriptedTerminal::new([
            Reply::choose("Books Database"),
            Reply::text(url),
            Reply::choose(BACK),
        ]);

        assert!(run(&mut term, &mut settings, Domain::Books).unwrap());
        assert_eq!(settings.get(SettingKey::BooksDatabaseId).unwrap(), ID);
        assert!(term.has_message(MessageLevel::Success, "saved"));
    }

    #[test]
    fn test_invalid_value_keeps_menu_open() {
        let dir = TempDir::new().unwrap();
        let mut settings = settings(&dir);
        let mut term = ScriptedTerminal::new([
            Reply::choose("Games Database"),
            Reply::text("not-an-id"),
            Reply::choose(BACK),
        ]);

        assert!(!run(&mut term, &mut settings, Domain::Games).unwrap());
        assert_eq!(term.remaining(), 0);
        let errors = term
            .messages()
            .iter()
            .filter(|(level, _)| *level == MessageLevel::Error)
            .count();
        assert_eq!(errors, 1);
    }

    #[test]
    fn test_secret_cannot_be_cleared() {
        let dir = TempDir::new().unwrap();
        let mut settings = settings(&dir);
        let mut term = ScriptedTerminal::new([
            Reply::choose("SteamGridDB"),
            Reply::text("  "),
            Reply::Cancel,
        ]);

        assert!(!run(&mut term, &mut settings, Domain::Games).unwrap());
        assert!(term.has_message(MessageLevel::Warning, "cannot be empty"));
    }
}

// crates/session/src/session.rs
//! Main loop of an interactive session

use crate::flows::{self, Flow};
use crate::{MenuState, ServiceFactory, Services, SessionResult, Terminal};
use shelfkeeper_config::Settings;
use shelfkeeper_core::Domain;

/// One program run against one collection
pub struct Session<T: Terminal, F: ServiceFactory> {
    domain: Domain,
    terminal: T,
    settings: Settings,
    factory: F,
    services: Option<Services>,
}

impl<T: Terminal, F: ServiceFactory> Session<T, F> {
    pub fn new(domain: Domain, terminal: T, settings: Settings, factory: F) -> Self {
        Self {
            domain,
            terminal,
            settings,
            factory,
            services: None,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn into_terminal(self) -> T {
        self.terminal
    }

    /// Runs menus until the user exits
    ///
    /// Errors inside a flow are shown and the session goes back to the main
    /// menu. Only a broken terminal ends the session with an error.
    pub fn run(&mut self) -> SessionResult<()> {
        log::info!("Starting {} session", self.domain);

        let mut state = self.start();
        while state != MenuState::Exit {
            log::debug!("{} session: {:?}", self.domain, state);
            state = self.step(state)?;
        }

        log::info!("{} session finished", self.domain);
        Ok(())
    }

    /// First state: settings when anything required is missing
    fn start(&mut self) -> MenuState {
        for warning in self.settings.load_warnings() {
            self.terminal.warn(&format!("config.toml: {}", warning));
        }

        let missing = self.settings.config().missing_for(self.domain);
        if missing.is_empty() {
            self.connect();
            return MenuState::MainMenu;
        }

        let names: Vec<&str> = missing.iter().map(|key| key.label()).collect();
        self.terminal.warn(&format!(
            "Some settings are missing: {}. Please configure them first.",
            names.join(", ")
        ));
        MenuState::SettingsFlow
    }

    /// Rebuilds services from the current settings
    fn connect(&mut self) {
        self.services = None;
        if !self.settings.config().missing_for(self.domain).is_empty() {
            return;
        }

        match self.factory.build(self.domain, self.settings.config()) {
            Ok(services) => {
                if let Err(e) = services.store.verify_schema() {
                    log::warn!("Schema check failed for {}: {}", self.domain, e);
                    self.terminal.warn(&format!(
                        "Could not verify your {} database: {}",
                        self.domain.label(),
                        e
                    ));
                }
                self.services = Some(services);
            }
            Err(e) => {
                log::error!("Failed to set up {} services: {}", self.domain, e);
                self.terminal.error(&format!("Could not connect: {}", e));
            }
        }
    }

    fn step(&mut self, state: MenuState) -> SessionResult<MenuState> {
        let outcome = match state {
            MenuState::Exit => return Ok(MenuState::Exit),
            MenuState::MainMenu => return self.main_menu(),
            MenuState::SettingsFlow => {
                let outcome =
                    flows::settings::run(&mut self.terminal, &mut self.settings, self.domain);
                if matches!(outcome, Ok(true)) || self.services.is_none() {
                    self.connect();
                }
                outcome.map(|_| ())
            }
            MenuState::AddFlow | MenuState::LibraryFlow => {
                let Some(services) = self.services.as_ref() else {
                    self.terminal
                        .warn("Not connected. Check your settings and try again.");
                    return Ok(MenuState::SettingsFlow);
                };
                let mut flow = Flow::new(
                    self.domain,
                    &mut self.terminal,
                    services,
                    self.settings.config(),
                );
                if state == MenuState::AddFlow {
                    flow.add()
                } else {
                    flow.library()
                }
            }
        };

        match outcome {
            Ok(()) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                log::warn!("{:?} failed: {}", state, e);
                self.terminal.error(&e.to_string());
            }
        }
        Ok(MenuState::MainMenu)
    }

    fn main_menu(&mut self) -> SessionResult<MenuState> {
        let labels: Vec<String> = MenuState::MAIN_CHOICES
            .iter()
            .map(|state| state.label(self.domain))
            .collect();
        let prompt = format!("{} collection", self.domain.label());

        let next = self
            .terminal
            .select(&prompt, &labels, 0)?
            .and_then(|index| MenuState::MAIN_CHOICES.get(index).copied())
            .unwrap_or(MenuState::Exit);
        if next.needs_services() && self.services.is_none() {
            self.connect();
        }
        Ok(next)
    }
}

//! The add, library and settings flows

mod add;
mod library;
pub(crate) mod settings;

use crate::{Services, SessionResult, Terminal};
use shelfkeeper_config::Config;
use shelfkeeper_core::Domain;

/// Everything a catalog or library flow works with
pub(crate) struct Flow<'a, T: Terminal + ?Sized> {
    domain: Domain,
    terminal: &'a mut T,
    services: &'a Services,
    config: &'a Config,
}

impl<'a, T: Terminal + ?Sized> Flow<'a, T> {
    pub(crate) fn new(
        domain: Domain,
        terminal: &'a mut T,
        services: &'a Services,
        config: &'a Config,
    ) -> Self {
        Self {
            domain,
            terminal,
            services,
            config,
        }
    }

    /// Leaves the current action without committing anything
    fn cancelled(&mut self) -> SessionResult<()> {
        self.terminal.info("Cancelled");
        Ok(())
    }
}

// crates/session/src/flows/add.rs
//! Search a catalog and add the chosen item to the collection

use super::Flow;
use crate::prompts::{choose_format, choose_platform, choose_search_mode, choose_status, CANCEL};
use crate::{SessionResult, Terminal};
use shelfkeeper_catalog::{SearchMode, SearchQuery};
use shelfkeeper_core::{CatalogItem, CollectionEntry, Domain, NO_STATUS};

impl<T: Terminal + ?Sized> Flow<'_, T> {
    /// Search, pick, enrich, tag and create
    pub(crate) fn add(&mut self) -> SessionResult<()> {
        let Some(item) = self.pick_from_catalog(None)? else {
            return self.cancelled();
        };

        let Some(status) = choose_status(&mut *self.terminal, self.domain, NO_STATUS)? else {
            return self.cancelled();
        };

        let mut entry = CollectionEntry::from_catalog(item, status);
        match self.domain {
            Domain::Games => match choose_platform(&mut *self.terminal, "PC")? {
                Some(platform) => entry = entry.with_platform(platform),
                None => return self.cancelled(),
            },
            Domain::Books => match choose_format(&mut *self.terminal, "Physical")? {
                Some(format) => entry = entry.with_format(format),
                None => return self.cancelled(),
            },
            Domain::Anime => {}
        }

        self.services.store.create(&entry)?;
        self.terminal.success(&format!(
            "Added '{}' to your {} collection",
            entry.title,
            self.domain.label()
        ));
        Ok(())
    }

    /// Prompts for a query and lets the user pick one enriched result
    ///
    /// `Ok(None)` when the user cancels or nothing matched.
    pub(super) fn pick_from_catalog(
        &mut self,
        default_query: Option<&str>,
    ) -> SessionResult<Option<CatalogItem>> {
        let mode = if self.domain == Domain::Books {
            match choose_search_mode(&mut *self.terminal)? {
                Some(mode) => mode,
                None => return Ok(None),
            }
        } else {
            SearchMode::Title
        };

        let prompt = format!(
            "Search {} for a {}",
            self.domain.catalog_name(),
            self.domain.noun()
        );
        let Some(text) = self.terminal.input(&prompt, default_query)? else {
            return Ok(None);
        };
        let text = text.trim();
        if text.is_empty() {
            self.terminal.warn("Search text cannot be empty");
            return Ok(None);
        }

        let query = SearchQuery::new(text)
            .with_mode(mode)
            .with_limit(self.config.catalog.result_limit);
        let results = match self.services.catalog.search(&query) {
            Ok(results) => results,
            Err(e) if e.is_empty_result() => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        if results.is_empty() {
            self.terminal
                .warn(&format!("No results found for '{}'", text));
            return Ok(None);
        }

        let mut labels: Vec<String> = results.iter().map(CatalogItem::display_label).collect();
        labels.push(CANCEL.to_string());

        let prompt = format!("Select a {}", self.domain.noun());
        let Some(item) = self
            .terminal
            .select(&prompt, &labels, 0)?
            .and_then(|index| results.into_iter().nth(index))
        else {
            return Ok(None);
        };

        log::debug!("Enriching '{}' ({})", item.title, item.source_id);
        Ok(Some(self.services.catalog.enrich(item)?))
    }
}

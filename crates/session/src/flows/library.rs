// crates/session/src/flows/library.rs
//! Browse, search, edit and delete collection entries

use super::Flow;
use crate::prompts::{
    choose_format, choose_from, choose_platform, choose_status, entry_label, parse_year,
    table_headers, table_row, BACK,
};
use crate::{SessionResult, Terminal};
use shelfkeeper_core::{Domain, EntryPatch, StoredEntry, NO_STATUS};

const LIST_ALL: &str = "List all";
const SEARCH: &str = "Search";
const SELECT_ENTRY: &str = "Select entry";
const NEXT_PAGE: &str = "Next page";
const FIRST_PAGE: &str = "First page";
const EDIT: &str = "Edit";
const DELETE: &str = "Delete";

impl<T: Terminal + ?Sized> Flow<'_, T> {
    pub(crate) fn library(&mut self) -> SessionResult<()> {
        let prompt = format!("{} library", self.domain.label());
        loop {
            let choice = choose_from(
                &mut *self.terminal,
                &prompt,
                &[LIST_ALL, SEARCH, BACK],
                LIST_ALL,
            )?;
            let outcome = match choice.as_deref() {
                Some(LIST_ALL) => self.browse(),
                Some(SEARCH) => self.search(),
                _ => return Ok(()),
            };

            // back to this menu unless the terminal itself broke
            if let Err(e) = outcome {
                if e.is_fatal() {
                    return Err(e);
                }
                log::warn!("Library action failed: {}", e);
                self.terminal.error(&e.to_string());
            }
        }
    }

    /// Paginated listing sorted by name
    fn browse(&mut self) -> SessionResult<()> {
        let page_size = self.config.notion.page_size;
        let mut cursor: Option<String> = None;
        let mut offset = 0;

        loop {
            let page = self.services.store.list(cursor.as_deref(), page_size)?;
            if page.entries.is_empty() && cursor.is_none() {
                self.terminal.info(&format!(
                    "Your {} library is empty",
                    self.domain.label()
                ));
                return Ok(());
            }
            self.show(&page.entries, offset);

            let mut options = vec![SELECT_ENTRY];
            if page.next_cursor.is_some() {
                options.push(NEXT_PAGE);
            }
            if cursor.is_some() {
                options.push(FIRST_PAGE);
            }
            options.push(BACK);

            match choose_from(&mut *self.terminal, "Library", &options, SELECT_ENTRY)?.as_deref() {
                Some(SELECT_ENTRY) => {
                    if let Some(stored) = self.pick_entry(&page.entries)? {
                        self.manage(&stored)?;
                    }
                }
                Some(NEXT_PAGE) => {
                    offset += page.entries.len();
                    cursor = page.next_cursor;
                }
                Some(FIRST_PAGE) => {
                    offset = 0;
                    cursor = None;
                }
                _ => return Ok(()),
            }
        }
    }

    fn search(&mut self) -> SessionResult<()> {
        let prompt = format!("Search your {} library", self.domain.label());
        let Some(text) = self.terminal.input(&prompt, None)? else {
            return Ok(());
        };
        let text = text.trim();
        if text.is_empty() {
            self.terminal.warn("Search text cannot be empty");
            return Ok(());
        }

        let matches = self.services.store.search(text)?;
        if matches.is_empty() {
            self.terminal
                .info(&format!("No entries match '{}'", text));
            return Ok(());
        }

        self.terminal
            .info(&format!("Found {} matching entries", matches.len()));
        self.show(&matches, 0);
        if let Some(stored) = self.pick_entry(&matches)? {
            self.manage(&stored)?;
        }
        Ok(())
    }

    fn show(&mut self, entries: &[StoredEntry], offset: usize) {
        let rows: Vec<Vec<String>> = entries
            .iter()
            .enumerate()
            .map(|(i, stored)| table_row(offset + i + 1, stored))
            .collect();
        self.terminal.table(&table_headers(self.domain), &rows);
    }

    fn pick_entry(&mut self, entries: &[StoredEntry]) -> SessionResult<Option<StoredEntry>> {
        let mut labels: Vec<String> = entries.iter().map(entry_label).collect();
        labels.push(BACK.to_string());

        Ok(self
            .terminal
            .select("Select an entry", &labels, 0)?
            .and_then(|index| entries.get(index).cloned()))
    }

    /// Edit or delete one entry
    fn manage(&mut self, stored: &StoredEntry) -> SessionResult<()> {
        let prompt = format!("'{}'", stored.entry.title);
        match choose_from(&mut *self.terminal, &prompt, &[EDIT, DELETE, BACK], EDIT)?.as_deref() {
            Some(EDIT) => self.edit(stored),
            Some(DELETE) => self.delete(stored),
            _ => Ok(()),
        }
    }

    /// Re-prompts the editable fields and sends only what changed
    fn edit(&mut self, stored: &StoredEntry) -> SessionResult<()> {
        let before = &stored.entry;
        let mut after = before.clone();

        let Some(title) = self.terminal.input("Title", Some(before.title.as_str()))? else {
            return self.cancelled();
        };
        let title = title.trim();
        if !title.is_empty() {
            after.title = title.to_string();
        }

        let current_year = before.year.map(|y| y.to_string());
        loop {
            let Some(text) = self.terminal.input("Year", current_year.as_deref())? else {
                return self.cancelled();
            };
            match parse_year(&text) {
                Ok(year) => {
                    after.year = year.or(before.year);
                    break;
                }
                Err(reason) => self.terminal.warn(&reason),
            }
        }

        let current_status = before.status.as_deref().unwrap_or(NO_STATUS);
        let Some(status) = choose_status(&mut *self.terminal, self.domain, current_status)? else {
            return self.cancelled();
        };
        after.status = status;

        match self.domain {
            Domain::Games => {
                let current = before.platform().unwrap_or("PC");
                match choose_platform(&mut *self.terminal, current)? {
                    Some(platform) => after = after.with_platform(platform),
                    None => return self.cancelled(),
                }
            }
            Domain::Books => {
                let current = before.format().unwrap_or("Physical");
                match choose_format(&mut *self.terminal, current)? {
                    Some(format) => after = after.with_format(format),
                    None => return self.cancelled(),
                }
            }
            Domain::Anime => {}
        }

        let refresh = format!(
            "Refresh artwork from {}?",
            self.domain.catalog_name()
        );
        match self.terminal.confirm(&refresh, false)? {
            Some(true) => {
                let query = after.title.clone();
                if let Some(item) = self.pick_from_catalog(Some(query.as_str()))? {
                    if item.icon_url.is_some() {
                        after.icon_url = item.icon_url;
                    }
                    if item.cover_url.is_some() {
                        after.cover_url = item.cover_url;
                    }
                    // a year typed by the user wins over the catalog's
                    if after.year == before.year && item.year.is_some() {
                        after.year = item.year;
                    }
                }
            }
            Some(false) => {}
            None => return self.cancelled(),
        }

        let patch = EntryPatch::between(before, &after);
        if patch.is_empty() {
            self.terminal.info("No changes made");
            return Ok(());
        }

        self.services.store.update(&stored.id, &patch)?;
        self.terminal
            .success(&format!("Updated '{}'", after.title));
        Ok(())
    }

    fn delete(&mut self, stored: &StoredEntry) -> SessionResult<()> {
        let prompt = format!(
            "Delete '{}'? This cannot be undone",
            stored.entry.title
        );
        if self.terminal.confirm(&prompt, false)? != Some(true) {
            return self.cancelled();
        }

        self.services.store.delete(&stored.id)?;
        self.terminal
            .success(&format!("Deleted '{}'", stored.entry.title));
        Ok(())
    }
}

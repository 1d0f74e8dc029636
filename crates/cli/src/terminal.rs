// FILE: crates/cli/src/terminal.rs
//! Real terminal: dialoguer prompts, console colours, comfy-table tables

use comfy_table::{presets::UTF8_BORDERS_ONLY, ContentArrangement, Table};
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use shelfkeeper_session::{MessageLevel, SessionError, SessionResult, Terminal};
use std::io;

pub struct DialoguerTerminal {
    theme: ColorfulTheme,
}

impl DialoguerTerminal {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerTerminal {
    fn default() -> Self {
        Self::new()
    }
}

/// Ctrl-C inside a prompt cancels it; anything else means the terminal is gone
fn cancelled_or_failed<T>(err: dialoguer::Error) -> SessionResult<Option<T>> {
    match err {
        dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        dialoguer::Error::IO(e) => Err(SessionError::Terminal(e.to_string())),
    }
}

impl Terminal for DialoguerTerminal {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> SessionResult<Option<String>> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.with_initial_text(default);
        }

        match input.interact_text() {
            Ok(text) => Ok(Some(text)),
            Err(e) => cancelled_or_failed(e),
        }
    }

    fn select(
        &mut self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> SessionResult<Option<usize>> {
        let result = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default.min(items.len().saturating_sub(1)))
            .interact_opt();

        match result {
            Ok(choice) => Ok(choice),
            Err(e) => cancelled_or_failed(e),
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> SessionResult<Option<bool>> {
        let result = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt();

        match result {
            Ok(answer) => Ok(answer),
            Err(e) => cancelled_or_failed(e),
        }
    }

    fn message(&mut self, level: MessageLevel, text: &str) {
        match level {
            MessageLevel::Info => println!("{} {}", style("ℹ").cyan(), text),
            MessageLevel::Success => println!("{} {}", style("✓").green().bold(), text),
            MessageLevel::Warning => println!("{} {}", style("!").yellow().bold(), style(text).yellow()),
            MessageLevel::Error => eprintln!("{} {}", style("✗").red().bold(), style(text).red()),
        }
    }

    fn table(&mut self, headers: &[String], rows: &[Vec<String>]) {
        let mut table = Table::new();
        table
            .load_preset(UTF8_BORDERS_ONLY)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(headers.to_vec());
        for row in rows {
            table.add_row(row.clone());
        }
        println!("{}", table);
    }
}

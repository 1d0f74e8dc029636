// crates/session/src/script.rs
//! A `Terminal` that replays canned answers
//!
//! Drives whole sessions in tests. When the script runs out every prompt is
//! cancelled, which walks the session back out to `Exit`.

use crate::{MessageLevel, SessionError, SessionResult, Terminal};
use std::collections::VecDeque;

/// One scripted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Typed text
    Text(String),
    /// Menu item with this exact label, or else the first one starting with it
    Choose(String),
    /// Menu item by position
    Index(usize),
    Yes,
    No,
    /// Take the prompt's default
    Accept,
    Cancel,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    pub fn choose(label: impl Into<String>) -> Self {
        Reply::Choose(label.into())
    }
}

#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    replies: VecDeque<Reply>,
    prompts: Vec<String>,
    messages: Vec<(MessageLevel, String)>,
    tables: Vec<Vec<Vec<String>>>,
}

impl ScriptedTerminal {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }

    /// Every prompt shown, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn messages(&self) -> &[(MessageLevel, String)] {
        &self.messages
    }

    /// Whether a message of `level` containing `needle` was shown
    pub fn has_message(&self, level: MessageLevel, needle: &str) -> bool {
        self.messages
            .iter()
            .any(|(l, text)| *l == level && text.contains(needle))
    }

    /// Rows of every table shown
    pub fn tables(&self) -> &[Vec<Vec<String>>] {
        &self.tables
    }

    fn next(&mut self, prompt: &str) -> Reply {
        self.prompts.push(prompt.to_string());
        self.replies.pop_front().unwrap_or(Reply::Cancel)
    }
}

fn unexpected(prompt: &str, reply: &Reply) -> SessionError {
    SessionError::Terminal(format!("unexpected reply {:?} to '{}'", reply, prompt))
}

impl Terminal for ScriptedTerminal {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> SessionResult<Option<String>> {
        match self.next(prompt) {
            Reply::Text(text) => Ok(Some(text)),
            Reply::Accept => Ok(Some(default.unwrap_or_default().to_string())),
            Reply::Cancel => Ok(None),
            other => Err(unexpected(prompt, &other)),
        }
    }

    fn select(
        &mut self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> SessionResult<Option<usize>> {
        match self.next(prompt) {
            Reply::Choose(label) => items
                .iter()
                .position(|item| *item == label)
                .or_else(|| items.iter().position(|item| item.starts_with(&label)))
                .map(Some)
                .ok_or_else(|| {
                    SessionError::Terminal(format!(
                        "no item '{}' in '{}' menu: {:?}",
                        label, prompt, items
                    ))
                }),
            Reply::Index(index) if index < items.len() => Ok(Some(index)),
            Reply::Accept => Ok(Some(default)),
            Reply::Cancel => Ok(None),
            other => Err(unexpected(prompt, &other)),
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> SessionResult<Option<bool>> {
        match self.next(prompt) {
            Reply::Yes => Ok(Some(true)),
            Reply::No => Ok(Some(false)),
            Reply::Accept => Ok(Some(default)),
            Reply::Cancel => Ok(None),
            other => Err(unexpected(prompt, &other)),
        }
    }

    fn message(&mut self, level: MessageLevel, text: &str) {
        self.messages.push((level, text.to_string()));
    }

    fn table(&mut self, _headers: &[String], rows: &[Vec<String>]) {
        self.tables.push(rows.to_vec());
    }
}

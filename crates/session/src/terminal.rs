// crates/session/src/terminal.rs
//! Boundary between the session and whatever draws prompts

use crate::SessionResult;

/// Severity of a one-line message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Prompting and output used by the session
///
/// Prompts return `Ok(None)` when the user cancels (Esc, Ctrl-C in a prompt).
/// `Err` is reserved for a terminal that can no longer be used.
pub trait Terminal {
    /// Free-text input, pre-filled with `default` when given
    fn input(&mut self, prompt: &str, default: Option<&str>) -> SessionResult<Option<String>>;

    /// Pick one of `items`; returns its index
    fn select(
        &mut self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> SessionResult<Option<usize>>;

    /// Yes/no question
    fn confirm(&mut self, prompt: &str, default: bool) -> SessionResult<Option<bool>>;

    fn message(&mut self, level: MessageLevel, text: &str);

    fn table(&mut self, headers: &[String], rows: &[Vec<String>]);

    fn info(&mut self, text: &str) {
        self.message(MessageLevel::Info, text);
    }

    fn success(&mut self, text: &str) {
        self.message(MessageLevel::Success, text);
    }

    fn warn(&mut self, text: &str) {
        self.message(MessageLevel::Warning, text);
    }

    fn error(&mut self, text: &str) {
        self.message(MessageLevel::Error, text);
    }
}

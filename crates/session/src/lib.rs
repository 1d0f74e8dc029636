//! Interactive session for one collection
//!
//! A session is a small state machine over `MenuState`. Every prompt goes
//! through the `Terminal` trait and every remote call through the services a
//! `ServiceFactory` builds from the current settings, so whole sessions can
//! be scripted in tests.

mod error;
mod flows;
mod prompts;
pub mod script;
mod services;
mod session;
mod state;
mod terminal;

pub use error::{SessionError, SessionResult};
pub use script::{Reply, ScriptedTerminal};
pub use services::{LiveServices, ServiceFactory, Services};
pub use session::Session;
pub use state::MenuState;
pub use terminal::{MessageLevel, Terminal};

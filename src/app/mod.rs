//! Application orchestration layer
//!
//! High-level functions that wire configuration, logging and the terminal host
//! together without containing detailed implementation logic.

pub mod logging;

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::tui::{self, AppState, ScriptConsole};

pub use logging::{init_tracing, LogTarget};

/// Runs the interactive terminal host against `url`.
///
/// The terminal is restored even when the event loop fails.
pub fn run_terminal(config: Config, url: String) -> Result<()> {
    let console = match &config.page.script_log {
        Some(path) => ScriptConsole::new().with_script_log(path)?,
        None => ScriptConsole::new(),
    };

    info!("Starting terminal host for {url}");
    let mut state = AppState::new(config, url, console);

    let mut terminal = tui::setup_terminal()?;
    let result = tui::run_tui(&mut state, &mut terminal);
    tui::restore_terminal(terminal)?;

    info!("Terminal host stopped");
    result
}

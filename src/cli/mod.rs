//! CLI command handlers for DCSS Shell.
//!
//! Headless, scriptable access to the command palette, the generated page
//! scripts and the configuration, for automation and testing.

pub mod commands;
pub mod common;
pub mod config;
pub mod script;

// Re-export types used by main.rs
pub use commands::CommandsArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use script::ScriptArgs;

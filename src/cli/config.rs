//! `config`: show or initialise the configuration file.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use clap::Args;
use serde::Serialize;
use std::path::Path;

/// Show or initialise configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write the default configuration if no file exists yet
    #[arg(long)]
    init: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    path: String,
    exists: bool,
    server: ServerOutput<'a>,
    page: PageOutput,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct ServerOutput<'a> {
    url: &'a str,
}

#[derive(Serialize, Debug)]
struct PageOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    script_log: Option<String>,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    theme: String,
    show_hints: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        let path = Config::config_file_path()
            .map_err(|e| CliError::io(format!("Failed to locate configuration: {e}")))?;

        if self.init && !path.exists() {
            Config::new()
                .save_to(&path)
                .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;
            if !self.json {
                println!("Wrote default configuration to {}", path.display());
                println!();
            }
        }

        let config = Config::load_from(&path)
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            output_json(&config, &path)
        } else {
            output_human_readable(&config, &path);
            Ok(())
        }
    }
}

fn theme_name(config: &Config) -> String {
    format!("{:?}", config.ui.theme_mode).to_lowercase()
}

/// Output configuration in JSON format
fn output_json(config: &Config, path: &Path) -> CliResult<()> {
    let output = ConfigOutput {
        path: path.to_string_lossy().to_string(),
        exists: path.exists(),
        server: ServerOutput {
            url: &config.server.url,
        },
        page: PageOutput {
            script_log: config
                .page
                .script_log
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        },
        ui: UiOutput {
            theme: theme_name(config),
            show_hints: config.ui.show_hints,
        },
    };
    print_json(&output)
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config, path: &Path) {
    println!("DCSS Shell Configuration");
    println!("========================");
    println!();

    let state = if path.exists() { "" } else { " (not created, using defaults)" };
    println!("File: {}{state}", path.display());
    println!();

    println!("Server:");
    println!("  URL: {}", config.server.url);
    println!();

    println!("Page:");
    match &config.page.script_log {
        Some(log) => println!("  Script Log: {}", log.display()),
        None => println!("  Script Log: (disabled)"),
    }
    println!();

    println!("UI:");
    println!("  Theme Mode: {}", theme_name(config));
    println!("  Show Hints: {}", config.ui.show_hints);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeMode;

    #[test]
    fn test_theme_name() {
        let mut config = Config::new();
        assert_eq!(theme_name(&config), "auto");
        config.ui.theme_mode = ThemeMode::Light;
        assert_eq!(theme_name(&config), "light");
    }
}

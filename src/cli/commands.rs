//! `commands`: list the command bar palette.

use clap::Args;
use serde::Serialize;

use crate::bridge::KeyCommand;
use crate::cli::common::{print_json, CliResult};
use crate::shell::{Affordance, CommandBar};

/// List the command bar buttons
#[derive(Args, Debug)]
pub struct CommandsArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// One palette entry in JSON output
#[derive(Serialize, Debug, PartialEq, Eq)]
struct CommandEntry {
    index: usize,
    id: &'static str,
    label: &'static str,
    function_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key_code: Option<u32>,
    ctrl: bool,
}

fn entries() -> Vec<CommandEntry> {
    CommandBar::new()
        .affordances()
        .iter()
        .enumerate()
        .map(|(index, affordance)| {
            let stroke = match affordance {
                Affordance::Command(command) => Some(command.stroke()),
                Affordance::ToggleTextInput => None,
            };
            CommandEntry {
                index,
                id: match affordance {
                    Affordance::Command(command) => command.id(),
                    Affordance::ToggleTextInput => "keyboard",
                },
                label: affordance.label(),
                function_key: crate::tui::command_bar::function_key_label(index),
                key: stroke.map(|s| s.key),
                key_code: stroke.map(|s| s.key_code),
                ctrl: stroke.is_some_and(|s| s.ctrl_key),
            }
        })
        .collect()
}

impl CommandsArgs {
    /// Execute the commands subcommand
    pub fn execute(&self) -> CliResult<()> {
        let entries = entries();

        if self.json {
            return print_json(&entries);
        }

        println!("{:<4} {:<8} {:<10} {:<7}", "Key", "Label", "Id", "Sends");
        for entry in &entries {
            let sends = match (entry.key, entry.ctrl) {
                (Some(key), true) => format!("Ctrl+{key}"),
                (Some(key), false) => key.to_string(),
                (None, _) => "(toggles keyboard)".to_string(),
            };
            println!(
                "{:<4} {:<8} {:<10} {}",
                entry.function_key, entry.label, entry.id, sends
            );
        }
        println!();
        println!(
            "Script any of them with: {} script <ID>",
            crate::constants::APP_BINARY_NAME
        );
        Ok(())
    }
}

/// Key command identifiers accepted by `script`.
#[must_use]
pub fn command_ids() -> Vec<&'static str> {
    KeyCommand::ALL.iter().map(|c| c.id()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_cover_palette() {
        let entries = entries();
        assert_eq!(entries.len(), KeyCommand::ALL.len() + 1);
        assert_eq!(entries[0].id, "escape");
        assert_eq!(entries[0].key_code, Some(27));
        assert_eq!(entries[7].id, "ctrl-f");
        assert!(entries[7].ctrl);
        assert_eq!(entries[8].id, "keyboard");
        assert_eq!(entries[8].key, None);
        assert_eq!(entries[8].function_key, "F9");
    }

    #[test]
    fn test_command_ids() {
        assert_eq!(command_ids().len(), 8);
        assert!(command_ids().contains(&"left"));
    }
}

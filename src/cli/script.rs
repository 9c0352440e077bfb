//! `script`: print the page script generated for a command or text.

use clap::Args;
use serde::Serialize;

use crate::bridge::{KeyCommand, ScriptBridge};
use crate::cli::commands::command_ids;
use crate::cli::common::{print_json, CliError, CliResult};

/// Print the script sent to the page for a command
#[derive(Args, Debug)]
pub struct ScriptArgs {
    /// Key command id (see `commands`), or one of: keys, find, cancel-find
    #[arg(value_name = "COMMAND")]
    command: String,

    /// Text for `keys` and `find`
    #[arg(long, value_name = "TEXT")]
    text: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// What to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScriptRequest {
    Command(KeyCommand),
    Keys(String),
    Find(String),
    CancelFind,
}

#[derive(Serialize, Debug)]
struct ScriptOutput<'a> {
    command: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    script: String,
}

impl ScriptRequest {
    fn parse(command: &str, text: Option<&str>) -> CliResult<Self> {
        let require_text = || {
            text.map(str::to_string).ok_or_else(|| {
                CliError::validation(format!("'{command}' requires --text"))
            })
        };

        match command.trim().to_ascii_lowercase().as_str() {
            "keys" => Ok(Self::Keys(require_text()?)),
            "find" => Ok(Self::Find(require_text()?)),
            "cancel-find" => Ok(Self::CancelFind),
            other => {
                let parsed = other.parse::<KeyCommand>().map_err(|e| {
                    CliError::validation(format!(
                        "{e}. Expected one of: {}, keys, find, cancel-find",
                        command_ids().join(", ")
                    ))
                })?;
                if text.is_some() {
                    return Err(CliError::validation(format!(
                        "--text is only valid with keys or find, not '{command}'"
                    )));
                }
                Ok(Self::Command(parsed))
            }
        }
    }

    fn script(&self) -> String {
        match self {
            Self::Command(command) => ScriptBridge::command_script(*command),
            Self::Keys(text) => ScriptBridge::key_pressed(text),
            Self::Find(text) => ScriptBridge::find_text_and_confirm(text),
            Self::CancelFind => ScriptBridge::cancel_find(),
        }
    }
}

impl ScriptArgs {
    /// Execute the script subcommand
    pub fn execute(&self) -> CliResult<()> {
        let request = ScriptRequest::parse(&self.command, self.text.as_deref())?;
        let script = request.script();

        if self.json {
            let output = ScriptOutput {
                command: self.command.trim(),
                text: self.text.as_deref(),
                script,
            };
            return print_json(&output);
        }

        println!("{script}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_command() {
        assert_eq!(
            ScriptRequest::parse("Up", None),
            Ok(ScriptRequest::Command(KeyCommand::ArrowUp))
        );
        assert_eq!(
            ScriptRequest::parse("cancel-find", None),
            Ok(ScriptRequest::CancelFind)
        );
    }

    #[test]
    fn test_text_requirements() {
        assert!(ScriptRequest::parse("find", None).is_err());
        assert_eq!(
            ScriptRequest::parse("keys", Some("")),
            Ok(ScriptRequest::Keys(String::new()))
        );
        assert!(ScriptRequest::parse("escape", Some("x")).is_err());
    }

    #[test]
    fn test_unknown_command_lists_choices() {
        let err = ScriptRequest::parse("jump", None).unwrap_err();
        assert!(err.message.contains("ctrl-f"));
        assert!(err.message.contains("cancel-find"));
    }

    #[test]
    fn test_scripts_match_bridge() {
        assert_eq!(
            ScriptRequest::Find("ogre".into()).script(),
            ScriptBridge::find_text_and_confirm("ogre")
        );
        assert_eq!(
            ScriptRequest::CancelFind.script(),
            ScriptBridge::cancel_find()
        );
    }
}

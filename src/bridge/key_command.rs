//! Fixed set of key commands offered by the command bar.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A single synthetic keystroke as seen by the page's key handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStroke {
    /// DOM `key` value (e.g. `"ArrowUp"`, `"f"`)
    pub key: &'static str,
    /// DOM `code` value (e.g. `"ArrowUp"`, `"KeyF"`)
    pub code: &'static str,
    /// Legacy virtual `keyCode`/`which` value on keydown and keyup
    pub key_code: u32,
    /// Character code on keypress; 0 for keys that produce no character
    pub char_code: u32,
    /// Whether Control is held
    pub ctrl_key: bool,
}

impl KeyStroke {
    /// Escape key
    pub const ESCAPE: Self = Self::plain("Escape", "Escape", 27);
    /// Tab key
    pub const TAB: Self = Self::plain("Tab", "Tab", 9);
    /// Enter key
    pub const ENTER: Self = Self {
        char_code: 13,
        ..Self::plain("Enter", "Enter", 13)
    };
    /// Backspace key
    pub const BACKSPACE: Self = Self::plain("Backspace", "Backspace", 8);

    const fn plain(key: &'static str, code: &'static str, key_code: u32) -> Self {
        Self {
            key,
            code,
            key_code,
            char_code: 0,
            ctrl_key: false,
        }
    }

    const fn ctrl(key: &'static str, code: &'static str, key_code: u32) -> Self {
        Self {
            key,
            code,
            key_code,
            char_code: 0,
            ctrl_key: true,
        }
    }
}

/// Legacy virtual `keyCode` a US layout reports on keydown/keyup for `ch`.
///
/// Letters report their uppercase code; digits and space report their own.
/// Anything else reports 0 and is identified by its keypress `charCode`.
#[must_use]
pub const fn virtual_key_code(ch: char) -> u32 {
    match ch {
        'a'..='z' => ch as u32 - 0x20,
        'A'..='Z' | '0'..='9' | ' ' => ch as u32,
        _ => 0,
    }
}

/// Commands available on the command bar.
///
/// The set is closed: every variant appears exactly once in [`KeyCommand::ALL`],
/// and identifiers are unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum KeyCommand {
    /// Escape (close menus, abort prompts)
    Escape,
    /// Tab (auto-fight)
    Tab,
    /// Enter (confirm)
    Enter,
    /// Move west
    ArrowLeft,
    /// Move south
    ArrowDown,
    /// Move north
    ArrowUp,
    /// Move east
    ArrowRight,
    /// Ctrl+F, the game's find/search prompt
    Find,
}

impl KeyCommand {
    /// All commands, in palette order.
    pub const ALL: [Self; 8] = [
        Self::Escape,
        Self::Tab,
        Self::Enter,
        Self::ArrowLeft,
        Self::ArrowDown,
        Self::ArrowUp,
        Self::ArrowRight,
        Self::Find,
    ];

    /// Stable identifier used on the command line and in logs.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Escape => "escape",
            Self::Tab => "tab",
            Self::Enter => "enter",
            Self::ArrowLeft => "left",
            Self::ArrowDown => "down",
            Self::ArrowUp => "up",
            Self::ArrowRight => "right",
            Self::Find => "ctrl-f",
        }
    }

    /// Short label shown on the command bar button.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Escape => "Esc",
            Self::Tab => "Tab",
            Self::Enter => "Enter",
            Self::ArrowLeft => "←",
            Self::ArrowDown => "↓",
            Self::ArrowUp => "↑",
            Self::ArrowRight => "→",
            Self::Find => "^F",
        }
    }

    /// Keystroke this command sends to the page.
    #[must_use]
    pub const fn stroke(self) -> KeyStroke {
        match self {
            Self::Escape => KeyStroke::ESCAPE,
            Self::Tab => KeyStroke::TAB,
            Self::Enter => KeyStroke::ENTER,
            Self::ArrowLeft => KeyStroke::plain("ArrowLeft", "ArrowLeft", 37),
            Self::ArrowDown => KeyStroke::plain("ArrowDown", "ArrowDown", 40),
            Self::ArrowUp => KeyStroke::plain("ArrowUp", "ArrowUp", 38),
            Self::ArrowRight => KeyStroke::plain("ArrowRight", "ArrowRight", 39),
            Self::Find => KeyStroke::ctrl("f", "KeyF", 70),
        }
    }
}

impl From<KeyCommand> for &'static str {
    fn from(command: KeyCommand) -> Self {
        command.id()
    }
}

impl fmt::Display for KeyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when parsing an unknown command identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key command '{0}'")]
pub struct UnknownCommand(pub String);

impl FromStr for KeyCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|command| command.id() == wanted)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<&str> = KeyCommand::ALL.iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), KeyCommand::ALL.len());
    }

    #[test]
    fn test_parse_id() {
        for command in KeyCommand::ALL {
            assert_eq!(command.id().parse::<KeyCommand>(), Ok(command));
        }
        assert_eq!("  Ctrl-F ".parse::<KeyCommand>(), Ok(KeyCommand::Find));
        assert!("ctrl-z".parse::<KeyCommand>().is_err());
    }

    #[test]
    fn test_find_is_control_modified() {
        let stroke = KeyCommand::Find.stroke();
        assert!(stroke.ctrl_key);
        assert_eq!(stroke.key, "f");
        assert!(KeyCommand::ALL
            .iter()
            .filter(|c| **c != KeyCommand::Find)
            .all(|c| !c.stroke().ctrl_key));
    }

    #[test]
    fn test_letters_use_virtual_key_codes() {
        // 'a' is 65 on keydown; 97 would be VK_NUMPAD1
        assert_eq!(virtual_key_code('a'), 65);
        assert_eq!(virtual_key_code('A'), 65);
        assert_eq!(virtual_key_code('z'), 90);
        assert_eq!(virtual_key_code('5'), 53);
        assert_eq!(virtual_key_code(' '), 32);
        assert_eq!(virtual_key_code('?'), 0);
        assert_eq!(virtual_key_code('é'), 0);
    }

    #[test]
    fn test_only_enter_types_a_character() {
        assert_eq!(KeyStroke::ENTER.char_code, 13);
        assert!(KeyCommand::ALL
            .iter()
            .filter(|c| **c != KeyCommand::Enter)
            .all(|c| c.stroke().char_code == 0));
    }

    #[test]
    fn test_serializes_as_id() {
        let json = serde_json::to_string(&KeyCommand::ArrowUp).unwrap();
        assert_eq!(json, "\"up\"");
    }
}

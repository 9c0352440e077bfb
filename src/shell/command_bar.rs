//! Command bar: a fixed palette of key commands plus a text-input toggle.
//!
//! The bar holds no state between activations. Activations are reported to
//! registered handlers synchronously, exactly once per handler.

use std::fmt;

use crate::bridge::KeyCommand;

/// One button on the command bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    /// Sends a key command
    Command(KeyCommand),
    /// Shows or hides the system keyboard
    ToggleTextInput,
}

impl Affordance {
    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Command(command) => command.label(),
            Self::ToggleTextInput => "⌨",
        }
    }
}

/// Handle returned by handler registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type CommandHandler = Box<dyn FnMut(KeyCommand)>;
type ToggleHandler = Box<dyn FnMut()>;

/// The command bar.
pub struct CommandBar {
    affordances: Vec<Affordance>,
    command_handlers: Vec<(HandlerId, CommandHandler)>,
    toggle_handlers: Vec<(HandlerId, ToggleHandler)>,
    next_id: u64,
}

impl CommandBar {
    /// Creates the bar with the standard palette: every [`KeyCommand`] in
    /// order, followed by the text-input toggle.
    #[must_use]
    pub fn new() -> Self {
        let affordances = KeyCommand::ALL
            .into_iter()
            .map(Affordance::Command)
            .chain(std::iter::once(Affordance::ToggleTextInput))
            .collect();

        Self {
            affordances,
            command_handlers: Vec::new(),
            toggle_handlers: Vec::new(),
            next_id: 0,
        }
    }

    /// Buttons in display order.
    #[must_use]
    pub fn affordances(&self) -> &[Affordance] {
        &self.affordances
    }

    /// Index of the button for `command`.
    #[must_use]
    pub fn index_of(&self, command: KeyCommand) -> Option<usize> {
        self.affordances
            .iter()
            .position(|a| *a == Affordance::Command(command))
    }

    /// Index of the text-input toggle.
    #[must_use]
    pub fn toggle_index(&self) -> Option<usize> {
        self.affordances
            .iter()
            .position(|a| *a == Affordance::ToggleTextInput)
    }

    /// Registers a handler for command activations.
    pub fn register_command_handler(
        &mut self,
        handler: impl FnMut(KeyCommand) + 'static,
    ) -> HandlerId {
        let id = self.allocate_id();
        self.command_handlers.push((id, Box::new(handler)));
        id
    }

    /// Removes a command handler. Returns `false` if it was not registered.
    pub fn unregister_command_handler(&mut self, id: HandlerId) -> bool {
        let before = self.command_handlers.len();
        self.command_handlers.retain(|(h, _)| *h != id);
        self.command_handlers.len() != before
    }

    /// Registers a handler for the text-input toggle.
    pub fn register_toggle_handler(&mut self, handler: impl FnMut() + 'static) -> HandlerId {
        let id = self.allocate_id();
        self.toggle_handlers.push((id, Box::new(handler)));
        id
    }

    /// Removes a toggle handler. Returns `false` if it was not registered.
    pub fn unregister_toggle_handler(&mut self, id: HandlerId) -> bool {
        let before = self.toggle_handlers.len();
        self.toggle_handlers.retain(|(h, _)| *h != id);
        self.toggle_handlers.len() != before
    }

    /// Activates the button at `index`.
    ///
    /// Returns the activated affordance, or `None` for an out-of-range index
    /// (no handler fires).
    pub fn activate(&mut self, index: usize) -> Option<Affordance> {
        let affordance = *self.affordances.get(index)?;
        match affordance {
            Affordance::Command(command) => {
                for (_, handler) in &mut self.command_handlers {
                    handler(command);
                }
            }
            Affordance::ToggleTextInput => {
                for (_, handler) in &mut self.toggle_handlers {
                    handler();
                }
            }
        }
        Some(affordance)
    }

    fn allocate_id(&mut self) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for CommandBar {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CommandBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandBar")
            .field("affordances", &self.affordances)
            .field("command_handlers", &self.command_handlers.len())
            .field("toggle_handlers", &self.toggle_handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_palette_order() {
        let bar = CommandBar::new();
        let labels: Vec<&str> = bar.affordances().iter().map(|a| a.label()).collect();
        assert_eq!(
            labels,
            ["Esc", "Tab", "Enter", "←", "↓", "↑", "→", "^F", "⌨"]
        );
        assert_eq!(bar.toggle_index(), Some(8));
        assert_eq!(bar.index_of(KeyCommand::Find), Some(7));
    }

    #[test]
    fn test_activation_fires_command_handler_once() {
        let mut bar = CommandBar::new();
        let commands = Rc::new(RefCell::new(Vec::new()));
        let toggles = Rc::new(RefCell::new(0));

        let sink = Rc::clone(&commands);
        bar.register_command_handler(move |c| sink.borrow_mut().push(c));
        let sink = Rc::clone(&toggles);
        bar.register_toggle_handler(move || *sink.borrow_mut() += 1);

        let up = bar.index_of(KeyCommand::ArrowUp).unwrap();
        assert_eq!(
            bar.activate(up),
            Some(Affordance::Command(KeyCommand::ArrowUp))
        );

        assert_eq!(*commands.borrow(), vec![KeyCommand::ArrowUp]);
        assert_eq!(*toggles.borrow(), 0);
    }

    #[test]
    fn test_toggle_fires_only_toggle_handler() {
        let mut bar = CommandBar::new();
        let commands = Rc::new(RefCell::new(Vec::new()));
        let toggles = Rc::new(RefCell::new(0));

        let sink = Rc::clone(&commands);
        bar.register_command_handler(move |c| sink.borrow_mut().push(c));
        let sink = Rc::clone(&toggles);
        bar.register_toggle_handler(move || *sink.borrow_mut() += 1);

        let toggle = bar.toggle_index().unwrap();
        bar.activate(toggle);

        assert!(commands.borrow().is_empty());
        assert_eq!(*toggles.borrow(), 1);
    }

    #[test]
    fn test_unregistered_handler_is_silent() {
        let mut bar = CommandBar::new();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = bar.register_command_handler(move |_| *sink.borrow_mut() += 1);

        assert!(bar.unregister_command_handler(id));
        assert!(!bar.unregister_command_handler(id));
        bar.activate(0);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut bar = CommandBar::new();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        bar.register_command_handler(move |_| *sink.borrow_mut() += 1);

        assert_eq!(bar.activate(99), None);
        assert_eq!(*count.borrow(), 0);
    }
}

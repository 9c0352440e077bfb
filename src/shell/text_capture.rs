//! Invisible text capture surface.
//!
//! Focusing the surface brings up the system keyboard. The surface keeps no
//! text: every insertion is handed on and rejected, so its content stays empty.

/// Hidden text field used only to receive keyboard input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextCaptureSurface {
    focused: bool,
}

impl TextCaptureSurface {
    /// Creates an unfocused surface.
    #[must_use]
    pub const fn new() -> Self {
        Self { focused: false }
    }

    /// Whether the surface has input focus.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Flips focus and returns the new state.
    pub fn toggle_focus(&mut self) -> bool {
        self.focused = !self.focused;
        self.focused
    }

    /// Hands `replacement` to `forward` and rejects the change.
    ///
    /// An empty replacement is a deletion. Always returns `false`.
    pub fn attempt_insertion(&self, replacement: &str, forward: impl FnOnce(&str)) -> bool {
        forward(replacement);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_is_forwarded_and_rejected() {
        let surface = TextCaptureSurface::new();
        let mut seen = Vec::new();
        for text in ["x", "", "\n"] {
            assert!(!surface.attempt_insertion(text, |s| seen.push(s.to_string())));
        }
        assert_eq!(seen, ["x", "", "\n"]);
        assert_eq!(surface, TextCaptureSurface::new());
    }

    #[test]
    fn test_toggle_focus() {
        let mut surface = TextCaptureSurface::new();
        assert!(!surface.is_focused());
        assert!(surface.toggle_focus());
        assert!(surface.is_focused());
        assert!(!surface.toggle_focus());
    }
}

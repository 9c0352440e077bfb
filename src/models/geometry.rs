//! Geometry primitives for the shell's two views.
//!
//! Units are host-defined: points on a touch host, cells on the terminal host.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width (never negative)
    pub width: f64,
    /// Height (never negative)
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle, clamping negative sizes to zero.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Linear interpolation between `self` (t = 0) and `to` (t = 1).
    #[must_use]
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self::new(
            mix(self.x, to.x),
            mix(self.y, to.y),
            mix(self.width, to.width),
            mix(self.height, to.height),
        )
    }
}

/// Insets of the container that content should avoid (notches, home indicator).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SafeAreaInsets {
    /// Inset from the top edge
    pub top: f64,
    /// Inset from the bottom edge
    pub bottom: f64,
}

/// Fixed geometry values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConstants {
    /// Height of the command bar
    pub command_bar_height: f64,
}

impl LayoutConstants {
    /// Touch host, in points.
    pub const TOUCH: Self = Self {
        command_bar_height: 44.0,
    };

    /// Terminal host, in rows.
    pub const TERMINAL: Self = Self {
        command_bar_height: 3.0,
    };
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self::TOUCH
    }
}

/// Keyboard visibility as far as layout is concerned.
///
/// Exactly one of the two constraint sets is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum KeyboardState {
    /// No system keyboard; command bar docked at the bottom edge
    #[default]
    Hidden,
    /// System keyboard occupies `height` at the bottom of the container
    Visible {
        /// Keyboard height reported by the platform
        height: f64,
    },
}

impl KeyboardState {
    /// Whether the keyboard is on screen.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self, Self::Visible { .. })
    }
}

/// Frames of the page view and the command bar.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LayoutFrames {
    /// Embedded page view
    pub page: Rect,
    /// Command bar
    pub command_bar: Rect,
}

impl LayoutFrames {
    /// Interpolates both frames.
    #[must_use]
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            page: self.page.lerp(&to.page, t),
            command_bar: self.command_bar.lerp(&to.command_bar, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_clamps_negative_size() {
        let rect = Rect::new(0.0, 10.0, -5.0, -1.0);
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 0.0);
        assert_eq!(rect.bottom(), 10.0);
    }

    #[test]
    fn test_rect_lerp_endpoints() {
        let a = Rect::new(0.0, 0.0, 100.0, 200.0);
        let b = Rect::new(10.0, 20.0, 100.0, 100.0);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 0.5), Rect::new(5.0, 10.0, 100.0, 150.0));
    }

    #[test]
    fn test_keyboard_state_default_hidden() {
        assert_eq!(KeyboardState::default(), KeyboardState::Hidden);
        assert!(KeyboardState::Visible { height: 1.0 }.is_visible());
    }
}

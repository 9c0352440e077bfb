//! Layout computation for the page view and the command bar.
//!
//! Replaces constraint-based layout with a single deterministic function so the
//! geometry can be tested without any view hierarchy.

use crate::models::{KeyboardState, LayoutConstants, LayoutFrames, Rect, SafeAreaInsets};

/// Computes the page and command bar frames for a keyboard state.
///
/// Hidden: the page spans from the safe-area top down to the space reserved
/// for the command bar; the bar is docked to the container's bottom edge and
/// absorbs the bottom safe-area inset.
///
/// Visible: the content above the keyboard (page plus bar) is the container
/// height minus the keyboard height. The bar keeps its fixed height and sits
/// directly on top of the keyboard, so the page ends where the bar starts.
#[must_use]
pub fn compute_layout(
    container: Rect,
    safe_area: SafeAreaInsets,
    keyboard: KeyboardState,
    constants: &LayoutConstants,
) -> LayoutFrames {
    let bar_height = constants.command_bar_height;
    let top = container.y + safe_area.top;

    match keyboard {
        KeyboardState::Hidden => {
            let page_height = container.height - safe_area.top - safe_area.bottom - bar_height;
            let page = Rect::new(container.x, top, container.width, page_height);
            let command_bar = Rect::new(
                container.x,
                page.bottom(),
                container.width,
                container.bottom() - page.bottom(),
            );
            LayoutFrames { page, command_bar }
        }
        KeyboardState::Visible { height } => {
            let page = Rect::new(
                container.x,
                top,
                container.width,
                container.height - safe_area.top - height - bar_height,
            );
            let command_bar = Rect::new(container.x, page.bottom(), container.width, bar_height);
            LayoutFrames { page, command_bar }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 390.0,
        height: 844.0,
    };

    #[test]
    fn test_hidden_reserves_bar_at_bottom() {
        let frames = compute_layout(
            PHONE,
            SafeAreaInsets::default(),
            KeyboardState::Hidden,
            &LayoutConstants::TOUCH,
        );
        assert_eq!(frames.page, Rect::new(0.0, 0.0, 390.0, 800.0));
        assert_eq!(frames.command_bar, Rect::new(0.0, 800.0, 390.0, 44.0));
        assert_eq!(frames.command_bar.bottom(), PHONE.bottom());
    }

    #[test]
    fn test_hidden_respects_safe_area() {
        let safe = SafeAreaInsets {
            top: 47.0,
            bottom: 34.0,
        };
        let frames = compute_layout(PHONE, safe, KeyboardState::Hidden, &LayoutConstants::TOUCH);
        assert_eq!(frames.page.y, 47.0);
        assert_eq!(frames.page.bottom(), 844.0 - 34.0 - 44.0);
        assert_eq!(frames.command_bar.y, frames.page.bottom());
        assert_eq!(frames.command_bar.bottom(), 844.0);
    }

    #[test]
    fn test_visible_places_bar_under_page() {
        let frames = compute_layout(
            PHONE,
            SafeAreaInsets::default(),
            KeyboardState::Visible { height: 300.0 },
            &LayoutConstants::TOUCH,
        );
        assert_eq!(frames.page.height, PHONE.height - 300.0 - 44.0);
        assert_eq!(frames.command_bar.y, frames.page.bottom());
        assert_eq!(frames.command_bar.height, 44.0);
    }

    #[test]
    fn test_visible_bar_ends_at_keyboard_top() {
        let keyboard_height = 300.0;
        let safe = SafeAreaInsets {
            top: 47.0,
            bottom: 34.0,
        };
        let frames = compute_layout(
            PHONE,
            safe,
            KeyboardState::Visible {
                height: keyboard_height,
            },
            &LayoutConstants::TOUCH,
        );
        let keyboard_top = PHONE.bottom() - keyboard_height;
        assert_eq!(frames.command_bar.bottom(), keyboard_top);
        assert_eq!(frames.page.y, 47.0);
        assert_eq!(frames.page.bottom(), keyboard_top - 44.0);
    }

    #[test]
    fn test_oversized_keyboard_collapses_page() {
        let frames = compute_layout(
            PHONE,
            SafeAreaInsets::default(),
            KeyboardState::Visible { height: 2000.0 },
            &LayoutConstants::TOUCH,
        );
        assert_eq!(frames.page.height, 0.0);
        assert_eq!(frames.command_bar.y, 0.0);
    }

    #[test]
    fn test_offset_container() {
        let container = Rect::new(0.0, 1.0, 80.0, 23.0);
        let frames = compute_layout(
            container,
            SafeAreaInsets::default(),
            KeyboardState::Hidden,
            &LayoutConstants::TERMINAL,
        );
        assert_eq!(frames.page, Rect::new(0.0, 1.0, 80.0, 20.0));
        assert_eq!(frames.command_bar, Rect::new(0.0, 21.0, 80.0, 3.0));
    }
}

//! Simulated on-screen keyboard for the terminal host.
//!
//! The panel follows the focus of the text capture surface. Each time it shows
//! or hides it produces the keyboard notification a touch platform would post,
//! which the host feeds to the controller.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::{AnimationCurve, KeyboardNotification};
use crate::tui::Theme;

/// Panel slide duration in seconds.
pub const SLIDE_DURATION_SECS: f64 = 0.25;

const KEY_ROWS: [&str; 3] = ["q w e r t y u i o p", "a s d f g h j k l", "z x c v b n m"];

/// Simulated keyboard panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualKeyboard {
    rows: u16,
    visible: bool,
}

impl VirtualKeyboard {
    /// Panel of `rows` terminal rows, initially hidden.
    #[must_use]
    pub const fn new(rows: u16) -> Self {
        Self {
            rows,
            visible: false,
        }
    }

    /// Whether the panel is showing.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Brings the panel in line with the capture surface focus.
    ///
    /// Returns the notification to post when visibility changes, carrying the
    /// panel height.
    pub fn sync(&mut self, focused: bool) -> Option<KeyboardNotification> {
        if focused == self.visible {
            return None;
        }
        self.visible = focused;

        Some(if focused {
            KeyboardNotification::will_show(
                f64::from(self.rows),
                SLIDE_DURATION_SECS,
                AnimationCurve::EaseInOut,
            )
        } else {
            KeyboardNotification::will_hide(SLIDE_DURATION_SECS, AnimationCurve::EaseInOut)
        })
    }

    /// Renders whatever part of the panel fits in `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if area.height == 0 {
            return;
        }

        let mut lines: Vec<Line> = KEY_ROWS.iter().map(|row| Line::from(*row)).collect();
        lines.push(Line::styled(
            "type to send keys, Esc to close",
            Style::default().fg(theme.text_muted),
        ));

        let panel = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text).bg(theme.highlight_bg))
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(theme.primary)),
            );
        frame.render_widget(panel, area);
    }
}

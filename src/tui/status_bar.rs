//! Status bar widget for keyboard state, the last script and key hints

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{AppState, Theme};
use crate::models::KeyboardState;

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let controller = &state.controller;

        let keyboard = match controller.keyboard_state() {
            KeyboardState::Hidden => "hidden".to_string(),
            KeyboardState::Visible { height } => format!("{height} rows"),
        };

        let mut status = vec![
            Span::styled("Keyboard: ", Style::default().fg(theme.primary)),
            Span::styled(keyboard, Style::default().fg(theme.text)),
            Span::styled("  Capture: ", Style::default().fg(theme.primary)),
            if controller.capture().is_focused() {
                Span::styled("on", Style::default().fg(theme.success))
            } else {
                Span::styled("off", Style::default().fg(theme.text_muted))
            },
        ];

        if !state.status_message.is_empty() {
            status.push(Span::raw("  "));
            status.push(Span::styled(
                state.status_message.as_str(),
                Style::default().fg(theme.accent),
            ));
        } else if let Some(entry) = controller.page().last_script() {
            status.push(Span::styled("  Last: ", Style::default().fg(theme.primary)));
            status.push(Span::styled(
                format!("{} bytes at {}", entry.script.len(), entry.at.format("%H:%M:%S")),
                Style::default().fg(theme.text_muted),
            ));
        }

        let mut lines = vec![Line::from(status)];
        if state.config.ui.show_hints {
            lines.push(Self::hints_line(state, theme));
        }

        let paragraph = Paragraph::new(lines).style(Style::default().bg(theme.background));
        f.render_widget(paragraph, area);
    }

    /// Key hints for the current input mode
    fn hints_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let hints: &[(&str, &str)] = if state.controller.modal().prompt().is_some() {
            &[("Enter", "Search"), ("Esc", "Cancel")]
        } else if state.controller.capture().is_focused() {
            &[("Type", "send text"), ("Esc", "close keyboard"), ("Ctrl+Q", "quit")]
        } else {
            &[
                ("F1-F9", "command bar"),
                ("Arrows/Esc/Tab/Enter", "send key"),
                ("Ctrl+F", "find"),
                ("Ctrl+Q", "quit"),
            ]
        };

        let mut spans = Vec::new();
        for (key, action) in hints {
            spans.push(Span::styled(
                (*key).to_string(),
                Style::default().fg(theme.accent),
            ));
            spans.push(Span::styled(
                format!(" {action}  "),
                Style::default().fg(theme.text_muted),
            ));
        }
        Line::from(spans)
    }
}

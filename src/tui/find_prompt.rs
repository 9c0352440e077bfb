//! Find Prompt Dialog
//!
//! Modal text input shown when the find command is activated. Also provides
//! the terminal host's [`ModalPresenter`].

use crate::shell::{ModalPresenter, PromptResolution, TextPrompt};
use crate::tui::theme::Theme;
use crate::tui::Component;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Find prompt component state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindPrompt {
    prompt: TextPrompt,
    input: String,
}

impl FindPrompt {
    /// Creates a prompt dialog with an empty input
    pub fn new(prompt: TextPrompt) -> Self {
        Self {
            prompt,
            input: String::new(),
        }
    }

    /// Current input
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Component for FindPrompt {
    type Event = PromptResolution;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => {
                return Some(PromptResolution::Confirmed(self.input.clone()));
            }
            KeyCode::Esc => {
                return Some(PromptResolution::Cancelled);
            }
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = centered_rect(50, 9, area);

        frame.render_widget(Clear, dialog_area);
        let background = Block::default().style(Style::default().bg(theme.background));
        frame.render_widget(background, dialog_area);

        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Input field
                Constraint::Min(1),    // Actions
            ])
            .split(dialog_area);

        let title = Paragraph::new(self.prompt.title.as_str())
            .style(
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .style(Style::default().bg(theme.background)),
            );
        frame.render_widget(title, chunks[0]);

        // Input field with cursor
        let input = Paragraph::new(format!("{}█", self.input))
            .style(Style::default().fg(theme.text))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Text ")
                    .style(Style::default().bg(theme.background)),
            );
        frame.render_widget(input, chunks[1]);

        let key_style = Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD);
        let actions = Paragraph::new(Line::from(vec![
            Span::styled("Enter", key_style),
            Span::raw(format!(" {}  ", self.prompt.confirm_label)),
            Span::styled("Esc", key_style),
            Span::raw(format!(" {}", self.prompt.cancel_label)),
        ]))
        .style(Style::default().fg(theme.text).bg(theme.background));
        frame.render_widget(actions, chunks[2]);
    }
}

/// Modal presenter for the terminal host: holds at most one open prompt.
#[derive(Debug, Default)]
pub struct TerminalModal {
    open: Option<FindPrompt>,
}

impl TerminalModal {
    /// Creates a presenter with nothing open
    pub fn new() -> Self {
        Self::default()
    }

    /// The open prompt, if any
    pub fn prompt(&self) -> Option<&FindPrompt> {
        self.open.as_ref()
    }

    /// Routes a key to the open prompt.
    ///
    /// Returns the resolution once the user confirms or cancels; the prompt is
    /// closed at that point.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<PromptResolution> {
        let resolution = self.open.as_mut()?.handle_input(key)?;
        self.open = None;
        Some(resolution)
    }
}

impl ModalPresenter for TerminalModal {
    fn present_text_prompt(&mut self, prompt: TextPrompt) {
        self.open = Some(FindPrompt::new(prompt));
    }
}

/// Helper to create a rectangle centered horizontally by percentage and
/// vertically by fixed height
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(r);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

//! Command bar widget: one button per affordance with its function-key hint.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout as RatatuiLayout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::shell::{Affordance, CommandBar};
use crate::tui::Theme;

/// Function-key label for the button at `index` (`F1` for the first).
#[must_use]
pub fn function_key_label(index: usize) -> String {
    format!("F{}", index + 1)
}

/// Splits the bar into equally sized button cells.
fn button_areas(area: Rect, count: usize) -> Vec<Rect> {
    let Ok(count) = u32::try_from(count) else {
        return Vec::new();
    };
    if count == 0 {
        return Vec::new();
    }
    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area)
        .to_vec()
}

/// Index of the button under the cell at (`column`, `row`), if any.
#[must_use]
pub fn button_at(bar: &CommandBar, area: Rect, column: u16, row: u16) -> Option<usize> {
    button_areas(area, bar.affordances().len())
        .iter()
        .position(|cell| cell.contains(Position::new(column, row)))
}

/// Renders the bar into `area`. The text-input toggle is highlighted while
/// `capture_focused` is set.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    bar: &CommandBar,
    capture_focused: bool,
    theme: &Theme,
) {
    let background = Block::default().style(Style::default().bg(theme.surface));
    frame.render_widget(background, area);

    let cells = button_areas(area, bar.affordances().len());
    for (index, (affordance, cell)) in bar.affordances().iter().zip(cells).enumerate() {
        let active = capture_focused && *affordance == Affordance::ToggleTextInput;
        let label_style = if active {
            Style::default()
                .fg(theme.background)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
        };

        let mut spans = vec![Span::styled(affordance.label(), label_style)];
        // Hints need room next to the label
        if cell.width >= 8 {
            spans.push(Span::styled(
                format!(" {}", function_key_label(index)),
                Style::default().fg(theme.text_muted),
            ));
        }

        let borders = if cell.height >= 3 {
            Borders::ALL
        } else {
            Borders::NONE
        };
        let button = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(borders)
                    .border_style(Style::default().fg(theme.primary))
                    .style(Style::default().bg(theme.surface)),
            );
        frame.render_widget(button, cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_key_labels() {
        assert_eq!(function_key_label(0), "F1");
        assert_eq!(function_key_label(8), "F9");
    }

    #[test]
    fn test_button_hit_testing() {
        let bar = CommandBar::new();
        let area = Rect::new(0, 20, 90, 3);

        assert_eq!(button_at(&bar, area, 0, 21), Some(0));
        assert_eq!(button_at(&bar, area, 15, 20), Some(1));
        assert_eq!(button_at(&bar, area, 89, 22), Some(8));
        assert_eq!(button_at(&bar, area, 10, 19), None);
        assert_eq!(button_at(&bar, area, 10, 23), None);
    }

    #[test]
    fn test_zero_width_bar_has_no_buttons() {
        let bar = CommandBar::new();
        assert_eq!(button_at(&bar, Rect::new(0, 0, 0, 0), 0, 0), None);
    }
}

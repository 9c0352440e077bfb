//! Terminal host for the container controller.
//!
//! The page area is a [`ScriptConsole`], the find prompt is a modal dialog and
//! a simulated keyboard panel slides in while text capture is focused. Layout
//! comes from the controller in layout units, one unit per terminal cell.

pub mod command_bar;
pub mod component;
pub mod find_prompt;
pub mod script_console;
pub mod status_bar;
pub mod theme;
pub mod virtual_keyboard;

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tracing::debug;

use crate::bridge::KeyCommand;
use crate::config::Config;
use crate::models::{self, LayoutConstants, SafeAreaInsets};
use crate::shell::{ContainerController, PromptResolution};

pub use component::Component;
pub use find_prompt::{FindPrompt, TerminalModal};
pub use script_console::ScriptConsole;
pub use status_bar::StatusBar;
pub use theme::Theme;
pub use virtual_keyboard::VirtualKeyboard;

/// Rows reserved for the status bar below the container.
const STATUS_BAR_HEIGHT: u16 = 2;

/// Rows of the simulated keyboard panel.
const KEYBOARD_PANEL_ROWS: u16 = 5;

/// Poll interval while a transition is running.
const ANIMATION_FRAME: Duration = Duration::from_millis(16);

/// Poll interval when idle.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Controller type driven by the terminal host.
pub type TerminalController = ContainerController<ScriptConsole, TerminalModal>;

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenAreas {
    /// Page (script console)
    pub page: Rect,
    /// Command bar
    pub command_bar: Rect,
    /// Simulated keyboard panel, empty while hidden
    pub keyboard: Rect,
    /// Status bar
    pub status: Rect,
}

/// Application state for the terminal host.
pub struct AppState {
    /// Container controller
    pub controller: TerminalController,
    /// Simulated keyboard panel
    pub keyboard: VirtualKeyboard,
    /// Active theme
    pub theme: Theme,
    /// Loaded configuration
    pub config: Config,
    /// Transient message shown in the status bar
    pub status_message: String,
    /// Set when the user asked to quit
    pub should_quit: bool,
    /// Command bar area as last drawn, for mouse hit testing
    bar_area: Rect,
}

impl AppState {
    /// Creates the host state for `url`, backed by `console`.
    pub fn new(config: Config, url: String, console: ScriptConsole) -> Self {
        let theme = Theme::from_mode(config.ui.theme_mode);
        let controller = ContainerController::new(
            url,
            console,
            TerminalModal::new(),
            LayoutConstants::TERMINAL,
        );

        Self {
            controller,
            keyboard: VirtualKeyboard::new(KEYBOARD_PANEL_ROWS),
            theme,
            config,
            status_message: String::new(),
            should_quit: false,
            bar_area: Rect::default(),
        }
    }

    /// Reports the terminal size to the controller.
    pub fn resize(&mut self, width: u16, height: u16) {
        let container = models::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height.saturating_sub(STATUS_BAR_HEIGHT)),
        );
        self.controller
            .set_container(container, SafeAreaInsets::default());
    }

    /// Screen regions as presented at `now`.
    pub fn screen_areas(&self, area: Rect, now: Instant) -> ScreenAreas {
        let status_height = STATUS_BAR_HEIGHT.min(area.height);
        let container = Rect::new(
            area.x,
            area.y,
            area.width,
            area.height - status_height,
        );
        let status = Rect::new(area.x, container.bottom(), area.width, status_height);

        let Some(frames) = self.controller.presented_frames(now) else {
            return ScreenAreas {
                page: container,
                status,
                ..ScreenAreas::default()
            };
        };

        let page = to_cells(&frames.page).intersection(container);
        let command_bar = to_cells(&frames.command_bar).intersection(container);
        let keyboard = Rect::new(
            container.x,
            command_bar.bottom(),
            container.width,
            container.bottom().saturating_sub(command_bar.bottom()),
        );

        ScreenAreas {
            page,
            command_bar,
            keyboard,
            status,
        }
    }

    /// Shows or hides the keyboard panel to match the capture surface, posting
    /// the matching notification to the controller.
    fn sync_keyboard(&mut self, now: Instant) {
        let focused = self.controller.capture().is_focused();
        if let Some(notification) = self.keyboard.sync(focused) {
            self.controller
                .handle_keyboard_notification(&notification, now);
        }
    }

    fn activate(&mut self, index: usize, now: Instant) {
        if let Some(affordance) = self.controller.activate(index) {
            self.status_message = format!("Pressed {}", affordance.label());
        }
        self.sync_keyboard(now);
    }

    fn send_command(&mut self, command: KeyCommand, now: Instant) {
        if let Some(index) = self.controller.command_bar().index_of(command) {
            self.activate(index, now);
        }
    }
}

/// Converts a controller frame to terminal cells.
fn to_cells(rect: &models::Rect) -> Rect {
    let cell = |v: f64| v.round().clamp(0.0, f64::from(u16::MAX)) as u16;
    Rect::new(cell(rect.x), cell(rect.y), cell(rect.width), cell(rect.height))
}

/// Key command sent directly by a terminal key outside of text capture.
fn key_command_for(key: &KeyEvent) -> Option<KeyCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('f') => Some(KeyCommand::Find),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(KeyCommand::Escape),
        KeyCode::Tab => Some(KeyCommand::Tab),
        KeyCode::Enter => Some(KeyCommand::Enter),
        KeyCode::Left => Some(KeyCommand::ArrowLeft),
        KeyCode::Down => Some(KeyCommand::ArrowDown),
        KeyCode::Up => Some(KeyCommand::ArrowUp),
        KeyCode::Right => Some(KeyCommand::ArrowRight),
        _ => None,
    }
}

/// Text a key inserts into the capture surface. Backspace is an empty
/// replacement.
fn capture_text_for(key: &KeyEvent) -> Option<String> {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Some(c.to_string()),
        KeyCode::Enter => Some("\n".to_string()),
        KeyCode::Tab => Some("\t".to_string()),
        KeyCode::Backspace => Some(String::new()),
        _ => None,
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let size = terminal.size().context("Failed to read terminal size")?;
    state.resize(size.width, size.height);
    state.controller.load();

    loop {
        let now = Instant::now();
        state.controller.page_mut().tick(now);

        let mut bar_area = Rect::default();
        let view: &AppState = state;
        terminal.draw(|f| {
            let areas = view.screen_areas(f.area(), now);
            bar_area = areas.command_bar;
            render(f, view, &areas);
        })?;
        state.bar_area = bar_area;

        let timeout = if state.controller.is_animating(now) {
            ANIMATION_FRAME
        } else {
            IDLE_POLL
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key_event(state, key, Instant::now());
                }
                Event::Mouse(mouse) => handle_mouse_event(state, mouse, Instant::now()),
                Event::Resize(width, height) => state.resize(width, height),
                _ => {}
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Routes a key press. The find prompt gets keys first, then text capture,
/// then the command shortcuts.
pub fn handle_key_event(state: &mut AppState, key: KeyEvent, now: Instant) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
        state.should_quit = true;
        return;
    }

    if state.controller.modal().prompt().is_some() {
        if let Some(resolution) = state.controller.modal_mut().handle_input(key) {
            state.status_message = match &resolution {
                PromptResolution::Cancelled => "Find cancelled".to_string(),
                PromptResolution::Confirmed(text) => format!("Searching for {text:?}"),
            };
            state.controller.resolve_prompt(resolution);
        }
        return;
    }

    if let KeyCode::F(n @ 1..=9) = key.code {
        state.activate(usize::from(n - 1), now);
        return;
    }

    if state.controller.capture().is_focused() {
        if key.code == KeyCode::Esc {
            state.controller.toggle_text_input();
            state.sync_keyboard(now);
        } else if let Some(text) = capture_text_for(&key) {
            state.controller.capture_insertion(&text);
        }
        return;
    }

    if let Some(command) = key_command_for(&key) {
        state.send_command(command, now);
    } else {
        debug!("Unhandled key: {key:?}");
    }
}

/// Handles clicks on the command bar.
pub fn handle_mouse_event(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left)
        || state.controller.modal().prompt().is_some()
    {
        return;
    }
    if let Some(index) = command_bar::button_at(
        state.controller.command_bar(),
        state.bar_area,
        mouse.column,
        mouse.row,
    ) {
        state.activate(index, now);
    }
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState, areas: &ScreenAreas) {
    let theme = &state.theme;

    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(full_bg, f.area());

    state.controller.page().render(f, areas.page, theme);
    command_bar::render(
        f,
        areas.command_bar,
        state.controller.command_bar(),
        state.controller.capture().is_focused(),
        theme,
    );
    if areas.keyboard.height > 0 {
        state.keyboard.render(f, areas.keyboard, theme);
    }
    StatusBar::render(f, areas.status, state, theme);

    if let Some(prompt) = state.controller.modal().prompt() {
        let area = f.area();
        prompt.render(f, area, theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::ScriptBridge;
    use crate::models::KeyboardState;
    use crate::tui::script_console::NAVIGATION_DELAY;

    fn state() -> AppState {
        let mut config = Config::new();
        config.ui.theme_mode = crate::config::ThemeMode::Dark;
        let mut state = AppState::new(config, "http://localhost:8080/".into(), ScriptConsole::new());
        state.resize(90, 40);
        state.controller.load();
        state
            .controller
            .page_mut()
            .tick(Instant::now() + NAVIGATION_DELAY);
        state
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_initial_areas() {
        let state = state();
        let areas = state.screen_areas(Rect::new(0, 0, 90, 40), Instant::now());
        assert_eq!(areas.page, Rect::new(0, 0, 90, 35));
        assert_eq!(areas.command_bar, Rect::new(0, 35, 90, 3));
        assert_eq!(areas.keyboard.height, 0);
        assert_eq!(areas.status, Rect::new(0, 38, 90, 2));
    }

    #[test]
    fn test_arrow_key_sends_script() {
        let mut state = state();
        handle_key_event(&mut state, press(KeyCode::Up), Instant::now());
        assert_eq!(state.controller.page().transcript().count(), 1);
    }

    #[test]
    fn test_toggle_shows_keyboard_panel() {
        let mut state = state();
        let now = Instant::now();
        handle_key_event(&mut state, press(KeyCode::F(9)), now);

        assert!(state.controller.capture().is_focused());
        assert_eq!(
            state.controller.keyboard_state(),
            KeyboardState::Visible { height: 5.0 }
        );

        let settled = now + Duration::from_secs(1);
        let areas = state.screen_areas(Rect::new(0, 0, 90, 40), settled);
        assert_eq!(areas.page, Rect::new(0, 0, 90, 30));
        assert_eq!(areas.command_bar, Rect::new(0, 30, 90, 3));
        assert_eq!(areas.keyboard, Rect::new(0, 33, 90, 5));

        handle_key_event(&mut state, press(KeyCode::Esc), settled);
        assert!(!state.controller.capture().is_focused());
        assert_eq!(state.controller.keyboard_state(), KeyboardState::Hidden);
    }

    #[test]
    fn test_typing_goes_through_capture() {
        let mut state = state();
        let now = Instant::now();
        handle_key_event(&mut state, press(KeyCode::F(9)), now);
        handle_key_event(&mut state, press(KeyCode::Char('a')), now);
        handle_key_event(&mut state, press(KeyCode::Backspace), now);

        assert_eq!(state.controller.page().transcript().count(), 2);
        assert_eq!(
            state.controller.page().last_script().unwrap().script,
            ScriptBridge::key_pressed("")
        );
        assert!(state.controller.capture().is_focused());
    }

    #[test]
    fn test_find_prompt_flow() {
        let mut state = state();
        let now = Instant::now();
        handle_key_event(&mut state, ctrl('f'), now);
        assert!(state.controller.modal().prompt().is_some());
        assert_eq!(state.controller.page().transcript().count(), 0);

        for c in "ogre".chars() {
            handle_key_event(&mut state, press(KeyCode::Char(c)), now);
        }
        handle_key_event(&mut state, press(KeyCode::Enter), now);

        assert!(state.controller.modal().prompt().is_none());
        assert!(!state.controller.is_find_prompt_open());
        let scripts: Vec<_> = state.controller.page().transcript().collect();
        assert_eq!(scripts.len(), 1);
        assert!(scripts[0].script.contains("\"ogre\""));
    }

    #[test]
    fn test_mouse_click_activates_button() {
        let mut state = state();
        state.bar_area = Rect::new(0, 35, 90, 3);
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 5,
            row: 36,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut state, click, Instant::now());
        assert_eq!(state.status_message, "Pressed Esc");
        assert_eq!(state.controller.page().transcript().count(), 1);
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut state = state();
        handle_key_event(&mut state, ctrl('q'), Instant::now());
        assert!(state.should_quit);
    }

    #[test]
    fn test_key_command_mapping() {
        assert_eq!(key_command_for(&press(KeyCode::Esc)), Some(KeyCommand::Escape));
        assert_eq!(key_command_for(&press(KeyCode::Left)), Some(KeyCommand::ArrowLeft));
        assert_eq!(key_command_for(&ctrl('f')), Some(KeyCommand::Find));
        assert_eq!(key_command_for(&press(KeyCode::Char('f'))), None);
    }
}

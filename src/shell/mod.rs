//! Container controller and the components it owns.
//!
//! The controller owns the command bar, the text capture surface and the page
//! boundary outright. Command bar handlers talk back through a channel that the
//! controller drains right after each activation, so there is no back-reference
//! from the bar to the controller.
//!
//! Policy for this layer is uniform: when something cannot be done (a malformed
//! keyboard payload, a page that cannot take scripts, no container yet) the
//! controller logs and leaves its state unchanged.

pub mod command_bar;
pub mod modal;
pub mod page;
pub mod text_capture;

use std::sync::mpsc::{self, Receiver};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::bridge::{KeyCommand, ScriptBridge};
use crate::models::{
    KeyboardEvent, KeyboardNotification, KeyboardState, LayoutConstants, LayoutFrames, Rect,
    SafeAreaInsets,
};
use crate::services::{compute_layout, GeometryTransition};

pub use command_bar::{Affordance, CommandBar, HandlerId};
pub use modal::{ModalPresenter, PromptResolution, TextPrompt};
pub use page::{PageContext, PageError};
pub use text_capture::TextCaptureSurface;

/// Messages sent by command bar handlers to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BarMessage {
    Command(KeyCommand),
    ToggleTextInput,
}

/// Container bounds, as last reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Container {
    bounds: Rect,
    safe_area: SafeAreaInsets,
}

/// Coordinates the page, the command bar and keyboard-driven layout.
pub struct ContainerController<P, M> {
    server_url: String,
    page: P,
    modal: M,
    command_bar: CommandBar,
    bar_messages: Receiver<BarMessage>,
    capture: TextCaptureSurface,
    constants: LayoutConstants,
    container: Option<Container>,
    keyboard: KeyboardState,
    transition: Option<GeometryTransition>,
    find_prompt_open: bool,
}

impl<P: PageContext, M: ModalPresenter> ContainerController<P, M> {
    /// Creates a controller for `server_url`.
    ///
    /// Nothing is loaded until [`load`](Self::load) is called.
    pub fn new(
        server_url: impl Into<String>,
        page: P,
        modal: M,
        constants: LayoutConstants,
    ) -> Self {
        let (tx, bar_messages) = mpsc::channel();
        let mut command_bar = CommandBar::new();

        let commands = tx.clone();
        command_bar.register_command_handler(move |command| {
            // Receiver lives as long as the controller, which owns the bar.
            let _ = commands.send(BarMessage::Command(command));
        });
        command_bar.register_toggle_handler(move || {
            let _ = tx.send(BarMessage::ToggleTextInput);
        });

        Self {
            server_url: server_url.into(),
            page,
            modal,
            command_bar,
            bar_messages,
            capture: TextCaptureSurface::new(),
            constants,
            container: None,
            keyboard: KeyboardState::Hidden,
            transition: None,
            find_prompt_open: false,
        }
    }

    /// Loads the target page.
    pub fn load(&mut self) {
        info!("Loading {}", self.server_url);
        self.page.load(&self.server_url);
    }

    /// Target page address.
    #[must_use]
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// The page boundary.
    #[must_use]
    pub const fn page(&self) -> &P {
        &self.page
    }

    /// The page boundary (mutable).
    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// The modal presenter.
    #[must_use]
    pub const fn modal(&self) -> &M {
        &self.modal
    }

    /// The modal presenter (mutable).
    pub fn modal_mut(&mut self) -> &mut M {
        &mut self.modal
    }

    /// The command bar.
    #[must_use]
    pub const fn command_bar(&self) -> &CommandBar {
        &self.command_bar
    }

    /// The text capture surface.
    #[must_use]
    pub const fn capture(&self) -> &TextCaptureSurface {
        &self.capture
    }

    /// Current keyboard state.
    #[must_use]
    pub const fn keyboard_state(&self) -> KeyboardState {
        self.keyboard
    }

    /// Whether a find prompt is waiting for resolution.
    #[must_use]
    pub const fn is_find_prompt_open(&self) -> bool {
        self.find_prompt_open
    }

    // === Layout ===

    /// Sets the container bounds and snaps to the layout for the current
    /// keyboard state, dropping any running transition.
    pub fn set_container(&mut self, bounds: Rect, safe_area: SafeAreaInsets) {
        self.container = Some(Container { bounds, safe_area });
        self.transition = None;
    }

    /// Target frames for the current keyboard state, or `None` before the
    /// container is known.
    #[must_use]
    pub fn frames(&self) -> Option<LayoutFrames> {
        let container = self.container?;
        Some(compute_layout(
            container.bounds,
            container.safe_area,
            self.keyboard,
            &self.constants,
        ))
    }

    /// Frames as presented at `now`, mid-transition included.
    #[must_use]
    pub fn presented_frames(&self, now: Instant) -> Option<LayoutFrames> {
        match &self.transition {
            Some(transition) => Some(transition.frames_at(now)),
            None => self.frames(),
        }
    }

    /// Whether a geometry transition is still running at `now`.
    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.transition.is_some_and(|t| !t.is_finished(now))
    }

    /// Handles a raw keyboard notification. Malformed payloads are ignored.
    ///
    /// Returns whether the notification was applied.
    pub fn handle_keyboard_notification(
        &mut self,
        notification: &KeyboardNotification,
        now: Instant,
    ) -> bool {
        match KeyboardEvent::from_notification(notification) {
            Some(event) => {
                self.handle_keyboard_event(event, now);
                true
            }
            None => {
                debug!("Ignoring incomplete keyboard notification: {notification:?}");
                false
            }
        }
    }

    /// Applies a keyboard event and starts the matching transition.
    ///
    /// The transition starts from the currently presented geometry and is not
    /// awaited.
    pub fn handle_keyboard_event(&mut self, event: KeyboardEvent, now: Instant) {
        let presented = self.presented_frames(now);

        self.keyboard = match event {
            KeyboardEvent::VisibilityChanged { height, .. } => KeyboardState::Visible { height },
            KeyboardEvent::Hidden { .. } => KeyboardState::Hidden,
        };
        info!("Keyboard state: {:?}", self.keyboard);

        self.transition = match (presented, self.frames()) {
            (Some(from), Some(to)) => Some(GeometryTransition::start(
                from,
                to,
                event.animation(),
                now,
            )),
            _ => None,
        };
    }

    // === Commands ===

    /// Activates the command bar button at `index`.
    pub fn activate(&mut self, index: usize) -> Option<Affordance> {
        let affordance = self.command_bar.activate(index);
        self.drain_bar_messages();
        affordance
    }

    /// Activates the command bar button for `command`.
    pub fn activate_command(&mut self, command: KeyCommand) {
        if let Some(index) = self.command_bar.index_of(command) {
            self.activate(index);
        }
    }

    fn drain_bar_messages(&mut self) {
        while let Ok(message) = self.bar_messages.try_recv() {
            match message {
                BarMessage::Command(command) => self.handle_command(command),
                BarMessage::ToggleTextInput => {
                    self.toggle_text_input();
                }
            }
        }
    }

    fn handle_command(&mut self, command: KeyCommand) {
        if command == KeyCommand::Find {
            debug!("Presenting find prompt");
            self.find_prompt_open = true;
            self.modal.present_text_prompt(TextPrompt::find());
            return;
        }
        dispatch(&mut self.page, &ScriptBridge::command_script(command));
    }

    /// Resolves the open find prompt.
    ///
    /// Returns `false` (and does nothing) when no prompt is open.
    pub fn resolve_prompt(&mut self, resolution: PromptResolution) -> bool {
        if !std::mem::take(&mut self.find_prompt_open) {
            return false;
        }
        let script = match resolution {
            PromptResolution::Cancelled => ScriptBridge::cancel_find(),
            PromptResolution::Confirmed(text) => ScriptBridge::find_text_and_confirm(&text),
        };
        dispatch(&mut self.page, &script);
        true
    }

    // === Text capture ===

    /// Toggles focus of the capture surface and returns the new state.
    ///
    /// The host is expected to show or hide its keyboard accordingly and post
    /// the matching keyboard notification.
    pub fn toggle_text_input(&mut self) -> bool {
        let focused = self.capture.toggle_focus();
        debug!("Text capture focused: {focused}");
        focused
    }

    /// Offers an insertion to the capture surface.
    ///
    /// The text is forwarded to the page as keystrokes and the insertion is
    /// always rejected, so the surface stays empty. Returns whether the
    /// surface accepted the change (never).
    pub fn capture_insertion(&mut self, replacement: &str) -> bool {
        let page = &mut self.page;
        self.capture.attempt_insertion(replacement, |text| {
            dispatch(page, &ScriptBridge::key_pressed(text));
        })
    }
}

impl<P, M> std::fmt::Debug for ContainerController<P, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerController")
            .field("server_url", &self.server_url)
            .field("keyboard", &self.keyboard)
            .field("container", &self.container)
            .field("find_prompt_open", &self.find_prompt_open)
            .finish_non_exhaustive()
    }
}

/// Submits `script` and drops it if the page cannot take it.
fn dispatch<P: PageContext>(page: &mut P, script: &str) {
    match page.evaluate_script(script) {
        Ok(()) => debug!("Dispatched script ({} bytes)", script.len()),
        Err(e) => warn!("Dropping script: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnimationCurve;
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct FakePage {
        loaded: Option<String>,
        scripts: Vec<String>,
        fail: bool,
    }

    impl PageContext for FakePage {
        fn load(&mut self, url: &str) {
            self.loaded = Some(url.to_string());
        }

        fn evaluate_script(&mut self, script: &str) -> Result<(), PageError> {
            if self.fail {
                return Err(PageError::NotLoaded);
            }
            self.scripts.push(script.to_string());
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct FakeModal {
        presented: Vec<TextPrompt>,
    }

    impl ModalPresenter for FakeModal {
        fn present_text_prompt(&mut self, prompt: TextPrompt) {
            self.presented.push(prompt);
        }
    }

    fn controller() -> ContainerController<FakePage, FakeModal> {
        let mut c = ContainerController::new(
            "http://localhost:8080/",
            FakePage::default(),
            FakeModal::default(),
            LayoutConstants::TOUCH,
        );
        c.set_container(Rect::new(0.0, 0.0, 390.0, 844.0), SafeAreaInsets::default());
        c
    }

    #[test]
    fn test_load_uses_server_url() {
        let mut c = controller();
        c.load();
        assert_eq!(c.page().loaded.as_deref(), Some("http://localhost:8080/"));
    }

    #[test]
    fn test_command_executes_script() {
        let mut c = controller();
        c.activate_command(KeyCommand::ArrowUp);
        assert_eq!(
            c.page().scripts,
            vec![ScriptBridge::command_script(KeyCommand::ArrowUp)]
        );
        assert!(c.modal().presented.is_empty());
    }

    #[test]
    fn test_find_presents_prompt_instead_of_script() {
        let mut c = controller();
        c.activate_command(KeyCommand::Find);
        assert!(c.page().scripts.is_empty());
        assert_eq!(c.modal().presented, vec![TextPrompt::find()]);
        assert!(c.is_find_prompt_open());
    }

    #[test]
    fn test_cancel_find() {
        let mut c = controller();
        c.activate_command(KeyCommand::Find);
        assert!(c.resolve_prompt(PromptResolution::Cancelled));
        assert_eq!(c.page().scripts, vec![ScriptBridge::cancel_find()]);
        assert!(!c.is_find_prompt_open());
    }

    #[test]
    fn test_resolve_without_prompt_is_noop() {
        let mut c = controller();
        assert!(!c.resolve_prompt(PromptResolution::Confirmed("ogre".into())));
        assert!(c.page().scripts.is_empty());
    }

    #[test]
    fn test_toggle_affordance_focuses_capture() {
        let mut c = controller();
        let toggle = c.command_bar().toggle_index().unwrap();
        assert_eq!(c.activate(toggle), Some(Affordance::ToggleTextInput));
        assert!(c.capture().is_focused());
        c.activate(toggle);
        assert!(!c.capture().is_focused());
        assert!(c.page().scripts.is_empty());
    }

    #[test]
    fn test_failed_script_is_dropped() {
        let mut c = controller();
        c.page_mut().fail = true;
        c.activate_command(KeyCommand::Enter);
        assert!(c.page().scripts.is_empty());
        c.page_mut().fail = false;
        c.activate_command(KeyCommand::Enter);
        assert_eq!(c.page().scripts.len(), 1);
    }

    #[test]
    fn test_retarget_from_mid_animation() {
        let mut c = controller();
        let t0 = Instant::now();
        let hidden = c.frames().unwrap();

        c.handle_keyboard_notification(
            &KeyboardNotification::will_show(300.0, 0.2, AnimationCurve::Linear),
            t0,
        );
        let mid = t0 + Duration::from_millis(100);
        let halfway = c.presented_frames(mid).unwrap();
        assert!(halfway.page.height < hidden.page.height);
        assert!(halfway.page.height > 500.0);

        c.handle_keyboard_notification(
            &KeyboardNotification::will_hide(0.2, AnimationCurve::Linear),
            mid,
        );
        assert_eq!(c.presented_frames(mid), Some(halfway));
        let done = mid + Duration::from_millis(200);
        assert_eq!(c.presented_frames(done), Some(hidden));
        assert!(!c.is_animating(done));
    }

    #[test]
    fn test_keyboard_event_without_container_keeps_state() {
        let mut c = ContainerController::new(
            "http://localhost:8080/",
            FakePage::default(),
            FakeModal::default(),
            LayoutConstants::TOUCH,
        );
        let now = Instant::now();
        c.handle_keyboard_notification(
            &KeyboardNotification::will_show(300.0, 0.25, AnimationCurve::EaseInOut),
            now,
        );
        assert_eq!(c.presented_frames(now), None);
        assert!(c.keyboard_state().is_visible());

        c.set_container(Rect::new(0.0, 0.0, 390.0, 844.0), SafeAreaInsets::default());
        assert_eq!(c.frames().unwrap().page.height, 500.0);
    }
}

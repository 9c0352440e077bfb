//! Boundary with the host's modal presentation facility.

/// A single-field text prompt with a cancel and a confirm action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPrompt {
    /// Prompt title
    pub title: String,
    /// Label of the cancel action
    pub cancel_label: String,
    /// Label of the confirm action
    pub confirm_label: String,
}

impl TextPrompt {
    /// Prompt shown for the find command.
    #[must_use]
    pub fn find() -> Self {
        Self {
            title: "Search for what?".to_string(),
            cancel_label: "Cancel".to_string(),
            confirm_label: "Search".to_string(),
        }
    }
}

/// How the user resolved a text prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResolution {
    /// User dismissed the prompt
    Cancelled,
    /// User confirmed with the entered text
    Confirmed(String),
}

/// Presents blocking text prompts.
///
/// The host reports the outcome back through
/// [`ContainerController::resolve_prompt`](super::ContainerController::resolve_prompt).
pub trait ModalPresenter {
    /// Presents `prompt` on top of everything else.
    fn present_text_prompt(&mut self, prompt: TextPrompt);
}

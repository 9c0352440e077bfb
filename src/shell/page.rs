//! Boundary with the embedded page.

use thiserror::Error;

/// Reasons a script could not be submitted to the page.
#[derive(Debug, Error)]
pub enum PageError {
    /// No page has been loaded yet
    #[error("no page loaded")]
    NotLoaded,
    /// Page is navigating; its script context is unavailable
    #[error("page is navigating to {0}")]
    Navigating(String),
}

/// One-way script channel into the embedded page.
///
/// Submission is fire-and-forget: `Ok` means the script was handed to the page,
/// not that it ran. There is no return channel.
pub trait PageContext {
    /// Starts loading `url`.
    fn load(&mut self, url: &str);

    /// Submits `script` for evaluation in the page's context.
    fn evaluate_script(&mut self, script: &str) -> Result<(), PageError>;
}

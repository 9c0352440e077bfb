//! Script console: the terminal host's stand-in for the embedded page.
//!
//! It follows the page lifecycle (not loaded, navigating, loaded), refuses
//! scripts until loading has finished, and keeps a transcript of everything it
//! was handed. Scripts can also be appended to a JSON-lines log.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::shell::{PageContext, PageError};
use crate::tui::Theme;

/// Simulated time between starting a load and the page accepting scripts.
pub const NAVIGATION_DELAY: Duration = Duration::from_millis(400);

/// Transcript entries kept for display.
const TRANSCRIPT_CAPACITY: usize = 200;

/// Page lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet
    NotLoaded,
    /// Load requested at `since`
    Navigating {
        /// Address being loaded
        url: String,
        /// When loading started
        since: Instant,
    },
    /// Page is ready for scripts
    Loaded {
        /// Loaded address
        url: String,
    },
}

impl LoadState {
    /// Short label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NotLoaded => "not loaded",
            Self::Navigating { .. } => "loading",
            Self::Loaded { .. } => "loaded",
        }
    }
}

/// One script handed to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// When the script was submitted
    pub at: DateTime<Local>,
    /// Script source
    pub script: String,
}

/// Line written to the script log.
#[derive(Debug, Serialize)]
struct ScriptLogLine<'a> {
    timestamp: DateTime<Local>,
    url: &'a str,
    script: &'a str,
}

/// [`PageContext`] implementation backing the terminal host.
#[derive(Debug)]
pub struct ScriptConsole {
    state: LoadState,
    transcript: VecDeque<TranscriptEntry>,
    log: Option<File>,
}

impl ScriptConsole {
    /// Creates a console with no page loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: LoadState::NotLoaded,
            transcript: VecDeque::new(),
            log: None,
        }
    }

    /// Appends every accepted script to `path` as JSON lines.
    ///
    /// The log is closed after the first failed write; scripts keep flowing.
    pub fn with_script_log(mut self, path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .context(format!("Failed to create script log directory: {}", dir.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .context(format!("Failed to open script log: {}", path.display()))?;
        self.log = Some(file);
        Ok(self)
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    /// Accepted scripts, oldest first.
    pub fn transcript(&self) -> impl Iterator<Item = &TranscriptEntry> {
        self.transcript.iter()
    }

    /// Most recently accepted script.
    #[must_use]
    pub fn last_script(&self) -> Option<&TranscriptEntry> {
        self.transcript.back()
    }

    /// Advances the load lifecycle. Returns `true` when loading finished.
    pub fn tick(&mut self, now: Instant) -> bool {
        let finished = match &self.state {
            LoadState::Navigating { url, since }
                if now.saturating_duration_since(*since) >= NAVIGATION_DELAY =>
            {
                Some(url.clone())
            }
            _ => None,
        };

        match finished {
            Some(url) => {
                info!("Page loaded: {url}");
                self.state = LoadState::Loaded { url };
                true
            }
            None => false,
        }
    }

    fn append_to_log(&mut self, url: &str, script: &str, at: DateTime<Local>) -> io::Result<()> {
        let Some(file) = &mut self.log else {
            return Ok(());
        };
        let line = ScriptLogLine {
            timestamp: at,
            url,
            script,
        };
        let mut json = serde_json::to_string(&line)?;
        json.push('\n');
        file.write_all(json.as_bytes())
    }

    /// Renders the page area.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let (url, state_color) = match &self.state {
            LoadState::NotLoaded => ("", theme.text_muted),
            LoadState::Navigating { url, .. } => (url.as_str(), theme.warning),
            LoadState::Loaded { url } => (url.as_str(), theme.success),
        };

        let title = Line::from(vec![
            Span::styled(
                format!(" {url} "),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("[{}] ", self.state.label()),
                Style::default().fg(state_color),
            ),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);

        // Newest entries at the bottom, as many as fit
        let rows = usize::from(inner.height);
        let width = usize::from(inner.width).saturating_sub(11);
        let skip = self.transcript.len().saturating_sub(rows);
        let lines: Vec<Line> = self
            .transcript
            .iter()
            .skip(skip)
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        entry.at.format("%H:%M:%S ").to_string(),
                        Style::default().fg(theme.text_muted),
                    ),
                    Span::styled(
                        script_tail(&entry.script, width),
                        Style::default().fg(theme.text),
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Default for ScriptConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl PageContext for ScriptConsole {
    fn load(&mut self, url: &str) {
        self.state = LoadState::Navigating {
            url: url.to_string(),
            since: Instant::now(),
        };
    }

    fn evaluate_script(&mut self, script: &str) -> Result<(), PageError> {
        let url = match &self.state {
            LoadState::NotLoaded => return Err(PageError::NotLoaded),
            LoadState::Navigating { url, .. } => return Err(PageError::Navigating(url.clone())),
            LoadState::Loaded { url } => url.clone(),
        };

        let at = Local::now();
        if self.transcript.len() == TRANSCRIPT_CAPACITY {
            self.transcript.pop_front();
        }
        self.transcript.push_back(TranscriptEntry {
            at,
            script: script.to_string(),
        });

        // The page already has the script; a broken log must not drop later ones
        if let Err(e) = self.append_to_log(&url, script, at) {
            warn!("Script log write failed, disabling log: {e}");
            self.log = None;
        }
        Ok(())
    }
}

/// Last `width` characters of `script`; the argument and stroke sit at the end.
fn script_tail(script: &str, width: usize) -> String {
    let count = script.chars().count();
    if count <= width {
        return script.to_string();
    }
    let keep = width.saturating_sub(1);
    let tail: String = script.chars().skip(count - keep).collect();
    format!("…{tail}")
}

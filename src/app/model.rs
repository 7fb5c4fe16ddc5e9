use std::path::PathBuf;
use std::time::Instant;

use crate::config::EditorOptions;
use crate::editor::{Cursor, Document};
use crate::search::SearchSession;
use crate::ui::viewport::Viewport;

/// Longest status message kept, in bytes.
pub const MESSAGE_CAPACITY: usize = 79;

/// Rows below the text area: status bar and message line.
pub const CHROME_ROWS: usize = 2;

/// What a prompt's input is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    /// File name for an unnamed buffer.
    SaveAs,
    /// Incremental search query.
    Search(SearchSession),
}

/// A line of input collected on the message line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: Vec<u8>,
}

impl Prompt {
    pub const fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: Vec::new(),
        }
    }

    /// Text shown on the message line while the prompt is open.
    pub fn text(&self) -> String {
        let input = String::from_utf8_lossy(&self.input);
        match self.kind {
            PromptKind::SaveAs => format!("Save as: {input} (ESC to cancel)"),
            PromptKind::Search(_) => format!("Search: {input} (Use ESC/Arrows/Enter)"),
        }
    }
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    set_at: Instant,
}

/// The complete editor state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Clone)]
pub struct Model {
    /// The document being edited
    pub document: Document,
    /// Cursor in raw coordinates
    pub cursor: Cursor,
    /// Visible region of the document
    pub viewport: Viewport,
    /// File the document is saved to, if it has one
    pub file_path: Option<PathBuf>,
    pub options: EditorOptions,
    /// Open prompt, if any; keys go to it instead of the document
    pub prompt: Option<Prompt>,
    /// Ctrl-Q presses still needed to quit with unsaved changes
    pub quit_times_remaining: usize,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Terminal size as `(rows, cols)`
    pub terminal_size: (usize, usize),
    save_requested: bool,
    message: Option<StatusMessage>,
}

impl Model {
    /// Create a model for `document` on a terminal of `(rows, cols)`.
    pub fn new(
        document: Document,
        file_path: Option<PathBuf>,
        terminal_size: (usize, usize),
        options: EditorOptions,
    ) -> Self {
        let (rows, cols) = terminal_size;
        Self {
            document,
            cursor: Cursor::default(),
            viewport: Viewport::new(rows.saturating_sub(CHROME_ROWS), cols),
            file_path,
            options,
            prompt: None,
            quit_times_remaining: options.quit_times,
            should_quit: false,
            terminal_size,
            save_requested: false,
            message: None,
        }
    }

    /// Set the status message, truncated to [`MESSAGE_CAPACITY`] bytes.
    pub fn set_message(&mut self, text: impl Into<String>) {
        self.set_message_at(text, Instant::now());
    }

    pub(super) fn set_message_at(&mut self, text: impl Into<String>, now: Instant) {
        let mut text = text.into();
        if text.len() > MESSAGE_CAPACITY {
            let mut end = MESSAGE_CAPACITY;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            text.truncate(end);
        }
        self.message = Some(StatusMessage { text, set_at: now });
    }

    /// The status message, if it is younger than the configured timeout.
    pub fn active_message(&self, now: Instant) -> Option<&str> {
        self.message
            .as_ref()
            .filter(|msg| now.duration_since(msg.set_at) < self.options.message_timeout)
            .map(|msg| msg.text.as_str())
    }

    /// Drop the status message once it is too old. Returns true when a
    /// message was dropped, so the screen needs a repaint.
    pub fn expire_message(&mut self, now: Instant) -> bool {
        let expired = self
            .message
            .as_ref()
            .is_some_and(|msg| now.duration_since(msg.set_at) >= self.options.message_timeout);
        if expired {
            self.message = None;
        }
        expired
    }

    /// Screen column of the cursor within its line.
    pub fn cursor_display_col(&self) -> usize {
        self.document
            .line(self.cursor.row)
            .map_or(0, |line| line.raw_to_display(self.cursor.col))
    }

    /// Bring the viewport to the cursor.
    pub fn scroll(&mut self) {
        let col = self.cursor_display_col();
        self.viewport.scroll(self.cursor.row, col);
    }

    /// Name shown in the status bar.
    pub fn display_name(&self) -> String {
        self.file_path
            .as_ref()
            .map_or_else(|| "[No Name]".to_string(), |p| p.display().to_string())
    }

    pub(super) const fn request_save(&mut self) {
        self.save_requested = true;
    }

    /// Consume a pending save request.
    pub(super) const fn take_save_request(&mut self) -> bool {
        let requested = self.save_requested;
        self.save_requested = false;
        requested
    }

    pub(super) fn resize(&mut self, rows: usize, cols: usize) {
        self.terminal_size = (rows, cols);
        self.viewport.resize(rows.saturating_sub(CHROME_ROWS), cols);
        self.scroll();
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Document::empty(), None, (0, 0), EditorOptions::default())
    }
}

//! Editor state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete editor state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{CHROME_ROWS, MESSAGE_CAPACITY, Model, Prompt, PromptKind};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::EditorOptions;

/// Message shown when the editor starts.
pub const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

/// Main application struct: what to open and how.
pub struct App {
    file_path: Option<PathBuf>,
    options: EditorOptions,
}

impl App {
    /// Create a new application, optionally for a file.
    pub fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            options: EditorOptions::default(),
        }
    }

    /// Use the given editor settings.
    pub const fn with_options(mut self, options: EditorOptions) -> Self {
        self.options = options;
        self
    }
}

#[cfg(test)]
mod tests;

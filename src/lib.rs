#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. search::SearchSession)
    clippy::module_name_repetitions
)]

//! # ctek
//!
//! A small terminal text editor.
//!
//! ctek edits one file at a time in a raw-mode terminal with:
//! - Tab expansion and per-line syntax highlighting for a few languages
//! - Incremental search with wraparound
//! - A status bar, a timed message line and a save-as prompt
//! - Protection against quitting with unsaved changes
//!
//! ## Architecture
//!
//! ctek uses The Elm Architecture (TEA) pattern:
//! - **Model**: Editor state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: One escape-sequence frame per redraw
//!
//! ## Modules
//!
//! - [`app`]: Main event loop and state
//! - [`editor`]: Lines, documents and cursor movement
//! - [`highlight`]: Syntax highlighting
//! - [`input`]: Decoding terminal bytes into keys
//! - [`search`]: Incremental search
//! - [`storage`]: Reading and writing files
//! - [`terminal`]: Raw mode and the terminal device
//! - [`ui`]: Frame composition

pub mod app;
pub mod config;
pub mod editor;
pub mod highlight;
pub mod input;
pub mod perf;
pub mod search;
pub mod storage;
pub mod terminal;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{Cursor, Document};
    pub use crate::ui::viewport::Viewport;
}

//! Terminal UI.
//!
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Colors for highlight categories
//! - [`render`]: One frame of escape sequences from the [`Model`](crate::app::Model)

pub mod style;
pub mod viewport;

mod render;
mod status;

pub use render::render;
pub use status::{compose_status, message_text, status_text};

/// Drawn at the start of rows past the end of the document.
pub const EMPTY_LINE_MARKER: &str = ">";

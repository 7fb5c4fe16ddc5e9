//! The editable document and the cursor that moves over it.
//!
//! A [`Document`] is a list of [`Line`]s. Each line keeps its raw bytes plus
//! a display form with tabs expanded and a highlight category per display
//! byte. The [`Cursor`] always addresses raw bytes; conversion to screen
//! columns goes through [`Line::raw_to_display`].

mod cursor;
mod document;
mod line;

pub use cursor::{Cursor, Direction};
pub use document::Document;
pub use line::{DEFAULT_TAB_STOP, Line};

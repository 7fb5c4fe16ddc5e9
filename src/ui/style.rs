//! Colors for highlight categories.
//!
//! Uses the basic ANSI colors so the terminal's own palette applies.

use crossterm::style::Color;

use crate::highlight::Highlight;

/// Foreground color for a category. `None` means the terminal default.
pub const fn color_for(highlight: Highlight) -> Option<Color> {
    match highlight {
        Highlight::Normal => None,
        Highlight::Number => Some(Color::DarkRed),
        Highlight::String => Some(Color::DarkMagenta),
        Highlight::Comment => Some(Color::DarkCyan),
        Highlight::Keyword1 => Some(Color::DarkYellow),
        Highlight::Keyword2 => Some(Color::DarkGreen),
        Highlight::Match => Some(Color::DarkBlue),
    }
}

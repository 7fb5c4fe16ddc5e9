//! Viewport management for scrolling.
//!
//! The [`Viewport`] tracks which part of the document is on screen and
//! scrolls just far enough to keep the cursor visible.

use std::ops::Range;

/// The visible region of the document, in rows and display columns.
///
/// # Example
///
/// ```
/// use ctek::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(24, 80);
/// vp.scroll(30, 0);
/// assert_eq!(vp.top_row(), 7);
/// assert_eq!(vp.row_range(), 7..31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    top_row: usize,
    left_col: usize,
    rows: usize,
    cols: usize,
}

impl Viewport {
    /// Create a viewport of `rows` text rows by `cols` columns, at the origin.
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            top_row: 0,
            left_col: 0,
            rows,
            cols,
        }
    }

    /// First document row on screen.
    pub const fn top_row(&self) -> usize {
        self.top_row
    }

    /// First display column on screen.
    pub const fn left_col(&self) -> usize {
        self.left_col
    }

    /// Number of text rows (status and message lines excluded).
    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Document rows covered by the screen. May extend past the document.
    pub const fn row_range(&self) -> Range<usize> {
        self.top_row..self.top_row + self.rows
    }

    pub const fn resize(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
    }

    /// Force the first visible row. The next [`Self::scroll`] pulls it back
    /// so the cursor is visible; setting it past the cursor puts the cursor
    /// row at the top of the screen.
    pub const fn set_top_row(&mut self, row: usize) {
        self.top_row = row;
    }

    /// Minimal scroll: move only as far as needed to show the cursor at
    /// (`row`, `display_col`). Never re-centers.
    pub const fn scroll(&mut self, row: usize, display_col: usize) {
        let rows = if self.rows == 0 { 1 } else { self.rows };
        let cols = if self.cols == 0 { 1 } else { self.cols };

        if row < self.top_row {
            self.top_row = row;
        }
        if row >= self.top_row + rows {
            self.top_row = row + 1 - rows;
        }
        if display_col < self.left_col {
            self.left_col = display_col;
        }
        if display_col >= self.left_col + cols {
            self.left_col = display_col + 1 - cols;
        }
    }
}

use super::document::Document;

/// Cursor position in raw coordinates.
///
/// `row` may equal the document's line count: that is the "new line"
/// position just past the last line, where `col` is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Raw byte index within the line.
    pub col: usize,
    /// Zero-based line index.
    pub row: usize,
}

/// Direction for single-step cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Cursor {
    /// Create a cursor at a specific position.
    pub const fn at(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Move one step, then snap the column to the new line's length.
    pub fn apply(&mut self, direction: Direction, doc: &Document) {
        let count = doc.line_count();
        match direction {
            Direction::Up => {
                self.row = self.row.saturating_sub(1);
            }
            Direction::Down => {
                if self.row < count {
                    self.row += 1;
                }
            }
            Direction::Left => {
                if self.col > 0 {
                    self.col -= 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.col = doc.line_len(self.row);
                }
            }
            Direction::Right => {
                if self.row < count {
                    if self.col < doc.line_len(self.row) {
                        self.col += 1;
                    } else {
                        self.row += 1;
                        self.col = 0;
                    }
                }
            }
        }
        self.clamp_col(doc);
    }

    pub const fn home(&mut self) {
        self.col = 0;
    }

    pub fn end(&mut self, doc: &Document) {
        self.col = doc.line_len(self.row);
    }

    /// Jump to the top of the visible region, then move up a page.
    pub fn page_up(&mut self, doc: &Document, top_row: usize, visible_rows: usize) {
        self.row = top_row.min(doc.line_count());
        self.repeat(Direction::Up, visible_rows, doc);
    }

    /// Jump to the bottom of the visible region, then move down a page.
    pub fn page_down(&mut self, doc: &Document, top_row: usize, visible_rows: usize) {
        let bottom = (top_row + visible_rows).saturating_sub(1);
        self.row = bottom.min(doc.line_count());
        self.repeat(Direction::Down, visible_rows, doc);
    }

    /// Keep the cursor inside the document after an external change.
    pub fn clamp(&mut self, doc: &Document) {
        self.row = self.row.min(doc.line_count());
        self.clamp_col(doc);
    }

    fn repeat(&mut self, direction: Direction, times: usize, doc: &Document) {
        for _ in 0..times {
            self.apply(direction, doc);
        }
        self.clamp_col(doc);
    }

    fn clamp_col(&mut self, doc: &Document) {
        self.col = self.col.min(doc.line_len(self.row));
    }
}

use std::ops::Range;

use crate::highlight::{Highlight, LanguageProfile};

use super::line::{DEFAULT_TAB_STOP, Line};

/// The in-memory document: an ordered list of [`Line`]s.
///
/// Every mutation re-derives the display and highlight of each line it
/// touches before returning. Out-of-range indices are clamped or ignored,
/// never reported.
#[derive(Clone)]
pub struct Document {
    lines: Vec<Line>,
    syntax: Option<&'static LanguageProfile>,
    tab_stop: usize,
    dirty: bool,
}

impl Document {
    /// Build a document from raw line contents.
    pub fn new(
        lines: Vec<Vec<u8>>,
        syntax: Option<&'static LanguageProfile>,
        tab_stop: usize,
    ) -> Self {
        let lines = lines
            .into_iter()
            .map(|raw| Line::new(raw, syntax, tab_stop))
            .collect();
        Self {
            lines,
            syntax,
            tab_stop,
            dirty: false,
        }
    }

    /// A new, unnamed buffer: one empty line.
    pub fn empty() -> Self {
        Self::new(vec![Vec::new()], None, DEFAULT_TAB_STOP)
    }

    /// Split `text` on `\n` into lines. Convenient for tests and scratch
    /// buffers; file loading goes through [`crate::storage::load_lines`].
    pub fn from_text(text: &str) -> Self {
        let lines = text.split('\n').map(|l| l.as_bytes().to_vec()).collect();
        Self::new(lines, None, DEFAULT_TAB_STOP)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Raw length of line `row`, 0 past the end.
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, Line::len)
    }

    pub const fn syntax(&self) -> Option<&'static LanguageProfile> {
        self.syntax
    }

    pub const fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    /// Whether the document changed since load or the last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the document as saved.
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Whether this is a fresh buffer holding a single empty line.
    pub fn is_blank(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Insert a new line at `index` (clamped to `0..=line_count`).
    pub fn insert_line(&mut self, index: usize, content: Vec<u8>) {
        let index = index.min(self.lines.len());
        self.lines
            .insert(index, Line::new(content, self.syntax, self.tab_stop));
        self.dirty = true;
    }

    /// Remove the line at `index`; ignored when out of range.
    pub fn remove_line(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
            self.dirty = true;
        }
    }

    /// Insert one byte into line `row` at raw index `col` (clamped).
    pub fn insert_char(&mut self, row: usize, col: usize, byte: u8) {
        let syntax = self.syntax;
        if let Some(line) = self.lines.get_mut(row) {
            line.insert(col, byte, syntax);
            self.dirty = true;
        }
    }

    /// Remove the byte at raw index `col` (clamped) from line `row`.
    pub fn remove_char(&mut self, row: usize, col: usize) {
        let syntax = self.syntax;
        if let Some(line) = self.lines.get_mut(row)
            && line.remove(col, syntax)
        {
            self.dirty = true;
        }
    }

    /// Break line `row` at `col`.
    ///
    /// At column 0 an empty line is inserted above `row` (this also works
    /// for `row == line_count`). Otherwise the tail from `col` moves to a new
    /// line below.
    pub fn split_line(&mut self, row: usize, col: usize) {
        if col == 0 {
            if row <= self.lines.len() {
                self.insert_line(row, Vec::new());
            }
            return;
        }
        let syntax = self.syntax;
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let tail = line.split_off(col, syntax);
        self.insert_line(row + 1, tail);
    }

    /// Append line `row` to the line above it and remove it.
    pub fn join_line(&mut self, row: usize) {
        if row == 0 || row >= self.lines.len() {
            return;
        }
        let removed = self.lines.remove(row);
        let syntax = self.syntax;
        self.lines[row - 1].append(removed.raw(), syntax);
        self.dirty = true;
    }

    /// Temporarily paint `range` (display columns) of line `row` with
    /// `category`, returning the categories that were overwritten.
    pub fn overlay_highlight(
        &mut self,
        row: usize,
        range: Range<usize>,
        category: Highlight,
    ) -> Option<Vec<Highlight>> {
        let line = self.lines.get_mut(row)?;
        Some(line.overlay(range.start, range.len(), category))
    }

    /// Put back a span previously returned by [`Self::overlay_highlight`].
    pub fn restore_highlight(&mut self, row: usize, start: usize, span: &[Highlight]) {
        if let Some(line) = self.lines.get_mut(row) {
            line.restore(start, span);
        }
    }

    /// The whole document as file bytes, every line terminated by `\n`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let size = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut bytes = Vec::with_capacity(size);
        for line in &self.lines {
            bytes.extend_from_slice(line.raw());
            bytes.push(b'\n');
        }
        bytes
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("lines", &format_args!("{} lines", self.lines.len()))
            .field("syntax", &self.syntax.map(|s| s.name))
            .field("tab_stop", &self.tab_stop)
            .field("dirty", &self.dirty)
            .finish()
    }
}

//! Incremental search.
//!
//! A [`SearchSession`] lives for the duration of one search prompt. Each
//! keystroke re-runs [`SearchSession::step`], which moves the cursor to the
//! next matching line and paints the match with [`Highlight::Match`]. The
//! painted span is saved first and put back before the next step and when
//! the session ends, so the document's highlight is never left altered.

use crate::editor::{Cursor, Document};
use crate::highlight::Highlight;
use crate::ui::viewport::Viewport;

/// Which way the scan walks through the lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

/// How a keystroke affects the search position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchNav {
    /// Continue forward from the last match.
    Next,
    /// Continue backward from the last match.
    Previous,
    /// The query changed: start over from the top.
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Overlay {
    row: usize,
    start: usize,
    span: Vec<Highlight>,
}

/// State of one interactive search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    saved_cursor: Cursor,
    saved_viewport: Viewport,
    last_match: Option<usize>,
    direction: SearchDirection,
    overlay: Option<Overlay>,
}

impl SearchSession {
    /// Start a search, remembering where to go back to on cancel.
    pub const fn begin(cursor: Cursor, viewport: Viewport) -> Self {
        Self {
            saved_cursor: cursor,
            saved_viewport: viewport,
            last_match: None,
            direction: SearchDirection::Forward,
            overlay: None,
        }
    }

    /// Row of the most recent match.
    pub const fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    pub const fn direction(&self) -> SearchDirection {
        self.direction
    }

    /// Cursor position when the search started.
    pub const fn saved_cursor(&self) -> Cursor {
        self.saved_cursor
    }

    /// Whether a match is currently painted into the document.
    pub const fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Put back the highlight span painted by the last match, if any.
    pub fn restore_overlay(&mut self, doc: &mut Document) {
        if let Some(overlay) = self.overlay.take() {
            doc.restore_highlight(overlay.row, overlay.start, &overlay.span);
        }
    }

    /// Run one search step for `query`.
    ///
    /// Scans at most one full cycle of lines from the last match, wrapping
    /// around at either end. On a hit the cursor moves to the match and the
    /// viewport is pushed past the end so the next scroll puts the match row
    /// at the top. Returns whether a match was found; with no match the
    /// cursor is left alone.
    pub fn step(
        &mut self,
        doc: &mut Document,
        query: &[u8],
        nav: SearchNav,
        cursor: &mut Cursor,
        viewport: &mut Viewport,
    ) -> bool {
        self.restore_overlay(doc);

        match nav {
            SearchNav::Next => self.direction = SearchDirection::Forward,
            SearchNav::Previous => self.direction = SearchDirection::Backward,
            SearchNav::Restart => {
                self.last_match = None;
                self.direction = SearchDirection::Forward;
            }
        }
        if self.last_match.is_none() {
            self.direction = SearchDirection::Forward;
        }

        let count = doc.line_count();
        if query.is_empty() || count == 0 {
            return false;
        }

        let mut current = self.last_match;
        for _ in 0..count {
            let row = match (current, self.direction) {
                (None, _) => 0,
                (Some(row), SearchDirection::Forward) => (row + 1) % count,
                (Some(row), SearchDirection::Backward) => {
                    row.min(count).checked_sub(1).unwrap_or(count - 1)
                }
            };
            current = Some(row);

            let Some(line) = doc.line(row) else {
                continue;
            };
            let Some(offset) = find_in_line(line.display(), query) else {
                continue;
            };

            self.last_match = Some(row);
            *cursor = Cursor::at(line.display_to_raw(offset), row);
            viewport.set_top_row(count);
            if let Some(span) =
                doc.overlay_highlight(row, offset..offset + query.len(), Highlight::Match)
            {
                self.overlay = Some(Overlay {
                    row,
                    start: offset,
                    span,
                });
            }
            tracing::debug!(row, offset, direction = ?self.direction, "search hit");
            return true;
        }

        tracing::debug!(query_len = query.len(), "search miss");
        false
    }

    /// End the search keeping the cursor on the current match.
    pub fn accept(mut self, doc: &mut Document) {
        self.restore_overlay(doc);
    }

    /// End the search and go back to where it started.
    pub fn cancel(mut self, doc: &mut Document, cursor: &mut Cursor, viewport: &mut Viewport) {
        self.restore_overlay(doc);
        *cursor = self.saved_cursor;
        *viewport = self.saved_viewport;
    }
}

/// Byte offset of the first occurrence of `needle` in `haystack`.
pub fn find_in_line(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

use crate::highlight::{Highlight, LanguageProfile, classify};

/// Default number of columns a tab advances to.
pub const DEFAULT_TAB_STOP: usize = 8;

/// One line of the document.
///
/// The raw bytes are what gets saved. The display form (tabs expanded) and
/// the per-display-byte highlight are derived from them and rebuilt together
/// on every change, so `highlight().len() == display().len()` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    raw: Vec<u8>,
    display: Vec<u8>,
    highlight: Vec<Highlight>,
    tab_stop: usize,
}

impl Line {
    pub(crate) fn new(raw: Vec<u8>, syntax: Option<&LanguageProfile>, tab_stop: usize) -> Self {
        let mut line = Self {
            raw,
            display: Vec::new(),
            highlight: Vec::new(),
            tab_stop: tab_stop.max(1),
        };
        line.refresh(syntax);
        line
    }

    /// Raw bytes as stored on disk.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Bytes as drawn on screen.
    pub fn display(&self) -> &[u8] {
        &self.display
    }

    /// Highlight category for each display byte.
    pub fn highlight(&self) -> &[Highlight] {
        &self.highlight
    }

    /// Length in raw bytes.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Length in display columns.
    pub fn display_len(&self) -> usize {
        self.display.len()
    }

    /// Convert a raw index to the display column it is drawn at.
    ///
    /// Indices past the end are clamped to the line length.
    pub fn raw_to_display(&self, raw_idx: usize) -> usize {
        let end = raw_idx.min(self.raw.len());
        self.raw[..end].iter().fold(0, |col, &byte| {
            if byte == b'\t' {
                col + self.tab_stop - (col % self.tab_stop)
            } else {
                col + 1
            }
        })
    }

    /// Convert a display column back to the raw index whose expansion covers
    /// it. Columns past the end map to the line length.
    pub fn display_to_raw(&self, display_idx: usize) -> usize {
        let mut col = 0;
        for (raw_idx, &byte) in self.raw.iter().enumerate() {
            if byte == b'\t' {
                col += self.tab_stop - (col % self.tab_stop);
            } else {
                col += 1;
            }
            if col > display_idx {
                return raw_idx;
            }
        }
        self.raw.len()
    }

    pub(crate) fn insert(&mut self, at: usize, byte: u8, syntax: Option<&LanguageProfile>) {
        let at = at.min(self.raw.len());
        self.raw.insert(at, byte);
        self.refresh(syntax);
    }

    /// Remove the byte at `at`, clamped to the last byte. Returns false when
    /// the line is empty.
    pub(crate) fn remove(&mut self, at: usize, syntax: Option<&LanguageProfile>) -> bool {
        if self.raw.is_empty() {
            return false;
        }
        let at = at.min(self.raw.len() - 1);
        self.raw.remove(at);
        self.refresh(syntax);
        true
    }

    pub(crate) fn append(&mut self, bytes: &[u8], syntax: Option<&LanguageProfile>) {
        self.raw.extend_from_slice(bytes);
        self.refresh(syntax);
    }

    /// Cut the line at `at` (clamped) and return the tail.
    pub(crate) fn split_off(&mut self, at: usize, syntax: Option<&LanguageProfile>) -> Vec<u8> {
        let at = at.min(self.raw.len());
        let tail = self.raw.split_off(at);
        self.refresh(syntax);
        tail
    }

    /// Overwrite part of the highlight, returning what was there before.
    pub(crate) fn overlay(&mut self, start: usize, len: usize, category: Highlight) -> Vec<Highlight> {
        let start = start.min(self.highlight.len());
        let end = start.saturating_add(len).min(self.highlight.len());
        let saved = self.highlight[start..end].to_vec();
        self.highlight[start..end].fill(category);
        saved
    }

    pub(crate) fn restore(&mut self, start: usize, span: &[Highlight]) {
        let start = start.min(self.highlight.len());
        let end = (start + span.len()).min(self.highlight.len());
        self.highlight[start..end].copy_from_slice(&span[..end - start]);
    }

    fn refresh(&mut self, syntax: Option<&LanguageProfile>) {
        let display = expand_tabs(&self.raw, self.tab_stop);
        let highlight = classify(syntax, &display);
        self.display = display;
        self.highlight = highlight;
    }
}

fn expand_tabs(raw: &[u8], tab_stop: usize) -> Vec<u8> {
    let tabs = raw.iter().filter(|&&b| b == b'\t').count();
    let mut display = Vec::with_capacity(raw.len() + tabs * (tab_stop - 1));
    for &byte in raw {
        if byte == b'\t' {
            display.push(b' ');
            while display.len() % tab_stop != 0 {
                display.push(b' ');
            }
        } else {
            display.push(byte);
        }
    }
    display
}

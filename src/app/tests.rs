use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use tempfile::tempdir;

use crate::config::EditorOptions;
use crate::editor::{Cursor, Document, Line};
use crate::highlight::Highlight;
use crate::input::{ByteSource, Key, read_key};
use crate::terminal::Terminal;

use super::{App, HELP_MESSAGE, Message, Model, update};

fn create_test_model(text: &str) -> Model {
    Model::new(
        Document::from_text(text),
        Some(PathBuf::from("test.txt")),
        (24, 80),
        EditorOptions::default(),
    )
}

fn create_unnamed_model() -> Model {
    Model::new(Document::empty(), None, (24, 80), EditorOptions::default())
}

/// Decode `bytes` and feed every key through the key map and `update`,
/// running side effects like the event loop does.
fn type_bytes(mut model: Model, bytes: &[u8]) -> Model {
    let mut source: VecDeque<u8> = bytes.iter().copied().collect();
    while let Some(key) = read_key(&mut source).unwrap() {
        if let Some(msg) = App::handle_key(key, &model) {
            let side_msg = msg.clone();
            model = update(model, msg);
            App::handle_message_side_effects(&mut model, &side_msg);
        }
    }
    model
}

fn line(model: &Model, row: usize) -> &[u8] {
    model.document.line(row).unwrap().raw()
}

/// In-memory terminal. `None` entries in the script are read timeouts; once
/// the script runs out every read fails so a stuck loop ends the test.
struct ScriptedTerminal {
    input: VecDeque<Option<u8>>,
    output: Vec<u8>,
    size: (usize, usize),
    /// Size the window switches to at the first timeout.
    resize_to: Option<(usize, usize)>,
}

impl ScriptedTerminal {
    fn new(bytes: &[u8], size: (usize, usize)) -> Self {
        Self {
            input: bytes.iter().copied().map(Some).collect(),
            output: Vec::new(),
            size,
            resize_to: None,
        }
    }
}

impl ByteSource for ScriptedTerminal {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let next = self
            .input
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))?;
        if next.is_none()
            && let Some(size) = self.resize_to.take()
        {
            self.size = size;
        }
        Ok(next)
    }
}

impl Terminal for ScriptedTerminal {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn size(&self) -> io::Result<(usize, usize)> {
        Ok(self.size)
    }
}

// --- End-to-end scenarios ---

#[test]
fn test_scenario_type_then_home_and_right() {
    let model = type_bytes(create_unnamed_model(), b"Hello\x1b[H\x1b[C\x1b[C");
    assert_eq!(line(&model, 0), b"Hello");
    assert_eq!(model.cursor, Cursor::at(2, 0));
}

#[test]
fn test_scenario_enter_at_end_of_line() {
    let mut model = create_test_model("abc");
    model.cursor = Cursor::at(3, 0);
    let model = type_bytes(model, b"\r");
    assert_eq!(model.document.line_count(), 2);
    assert_eq!(line(&model, 0), b"abc");
    assert_eq!(line(&model, 1), b"");
    assert_eq!(model.cursor, Cursor::at(0, 1));
}

#[test]
fn test_scenario_tab_expands_to_column_eight() {
    let model = create_test_model("\tx");
    let first: &Line = model.document.line(0).unwrap();
    assert_eq!(first.raw_to_display(1), 8);
}

#[test]
fn test_scenario_search_then_escape_restores() {
    let mut model = create_test_model("bar\nfoo\nbaz");
    model.cursor = Cursor::at(2, 2);
    let before = model.document.line(1).unwrap().highlight().to_vec();

    // Ctrl-F, then "foo".
    let model = type_bytes(model, b"\x06foo");
    assert_eq!(model.cursor.row, 1);
    let hl = model.document.line(1).unwrap().highlight();
    assert!(hl.iter().all(|h| *h == Highlight::Match));

    // A lone ESC times out into Escape and cancels the search.
    let model = type_bytes(model, b"\x1b");
    assert!(model.prompt.is_none());
    assert_eq!(model.cursor, Cursor::at(2, 2));
    assert_eq!(model.document.line(1).unwrap().highlight(), &before[..]);
}

#[test]
fn test_scenario_save_as_escape_keeps_dirty() {
    let model = type_bytes(create_unnamed_model(), b"x\x13");
    assert!(model.prompt.is_some());
    let text = model.prompt.as_ref().unwrap().text();
    assert_eq!(text, "Save as:  (ESC to cancel)");

    let model = type_bytes(model, b"\x1b");
    assert!(model.prompt.is_none());
    assert!(model.document.is_dirty());
    assert!(model.file_path.is_none());
    assert_eq!(model.active_message(Instant::now()), Some("Save aborted"));
}

// --- Key map ---

#[test]
fn test_ctrl_l_and_escape_change_nothing() {
    let model = type_bytes(create_test_model("abc"), b"\x0c\x1b");
    assert_eq!(line(&model, 0), b"abc");
    assert_eq!(model.cursor, Cursor::default());
    assert!(!model.document.is_dirty());
}

#[test]
fn test_ctrl_h_deletes_back() {
    let model = type_bytes(create_unnamed_model(), b"ab\x08");
    assert_eq!(line(&model, 0), b"a");
}

#[test]
fn test_delete_key_deletes_forward() {
    let model = type_bytes(create_test_model("abc"), b"\x1b[3~");
    assert_eq!(line(&model, 0), b"bc");
}

#[test]
fn test_page_down_moves_by_screen() {
    let model = type_bytes(create_test_model(&"x\n".repeat(100)), b"\x1b[6~");
    // 22 text rows: jump to row 21, then 22 more steps.
    assert_eq!(model.cursor.row, 43);
    assert!(model.viewport.row_range().contains(&43));
}

#[test]
fn test_prompt_receives_control_keys() {
    let model = type_bytes(create_test_model("abc"), b"\x06\x11");
    assert!(model.prompt.is_some());
    assert!(!model.should_quit);
}

#[test]
fn test_handle_key_outside_prompt() {
    let model = create_test_model("");
    assert_eq!(App::handle_key(Key::ctrl(b'q'), &model), Some(Message::Quit));
    assert_eq!(App::handle_key(Key::ctrl(b's'), &model), Some(Message::Save));
    assert_eq!(App::handle_key(Key::Char(b'z'), &model), Some(Message::InsertChar(b'z')));
    assert_eq!(App::handle_key(Key::End, &model), Some(Message::MoveEnd));
}

// --- Saving ---

#[test]
fn test_save_writes_file_and_clears_dirty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let mut model = create_test_model("one");
    model.file_path = Some(path.clone());

    let model = type_bytes(model, b"\x1b[F!\x13");
    assert!(!model.document.is_dirty());
    assert_eq!(std::fs::read(&path).unwrap(), b"one!\n");
    assert_eq!(model.active_message(Instant::now()), Some("5 bytes written to disk"));
}

#[test]
fn test_save_as_then_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("new.txt");
    let mut bytes = b"hi\x13".to_vec();
    bytes.extend_from_slice(path.to_str().unwrap().as_bytes());
    bytes.push(b'\r');

    let model = type_bytes(create_unnamed_model(), &bytes);
    assert_eq!(model.file_path.as_deref(), Some(path.as_path()));
    assert_eq!(std::fs::read(&path).unwrap(), b"hi\n");
    assert!(!model.document.is_dirty());
}

#[test]
fn test_failed_save_reports_and_stays_dirty() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model("x");
    model.file_path = Some(dir.path().join("missing").join("out.txt"));

    let model = type_bytes(model, b"y\x13");
    assert!(model.document.is_dirty());
    let msg = model.active_message(Instant::now()).unwrap();
    assert!(msg.starts_with("Can't save! I/O error: "), "{msg}");
}

// --- Loading and the event loop ---

#[test]
fn test_load_existing_file_selects_profile() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("main.c");
    std::fs::write(&path, "int main;\n").unwrap();

    let model = App::new(Some(path)).load_model((24, 80)).unwrap();
    assert_eq!(model.document.line_count(), 1);
    assert_eq!(model.document.syntax().map(|s| s.name), Some("c"));
    assert_eq!(model.active_message(Instant::now()), Some(HELP_MESSAGE));
}

#[test]
fn test_load_missing_file_opens_new_buffer() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fresh.py");

    let model = App::new(Some(path.clone())).load_model((24, 80)).unwrap();
    assert!(model.document.is_blank());
    assert_eq!(model.file_path, Some(path));
    assert_eq!(model.active_message(Instant::now()), Some("New file"));
}

#[test]
fn test_load_directory_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(App::new(Some(dir.path().to_path_buf())).load_model((24, 80)).is_err());
}

#[test]
fn test_load_uses_configured_tab_stop() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.txt");
    std::fs::write(&path, "\tx\n").unwrap();
    let options = EditorOptions {
        tab_stop: 4,
        ..EditorOptions::default()
    };

    let model = App::new(Some(path)).with_options(options).load_model((24, 80)).unwrap();
    assert_eq!(model.document.line(0).unwrap().display(), b"    x");
}

#[test]
fn test_run_with_edits_saves_and_quits() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.txt");
    std::fs::write(&path, "abc\n").unwrap();

    let mut terminal = ScriptedTerminal::new(b"\x1b[FX\x13\x11", (10, 40));
    App::new(Some(path.clone())).run_with(&mut terminal).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"abcX\n");
    let screen = String::from_utf8_lossy(&terminal.output);
    assert!(screen.contains("5 bytes written to disk"));
}

#[test]
fn test_run_with_unsaved_changes_needs_extra_quits() {
    let mut terminal = ScriptedTerminal::new(b"x\x11\x11\x11", (10, 80));
    let err = App::new(None).run_with(&mut terminal).unwrap_err();
    assert!(format!("{err:#}").contains("script exhausted"));
    let screen = String::from_utf8_lossy(&terminal.output);
    assert!(screen.contains("Press Ctrl-Q 1 more times to quit."));
}

#[test]
fn test_run_with_redraws_after_resize() {
    let mut terminal = ScriptedTerminal::new(b"", (10, 40));
    terminal.input.push_back(None);
    terminal.input.push_back(Some(0x11));
    terminal.resize_to = Some((6, 20));
    App::new(None).run_with(&mut terminal).unwrap();

    let screen = String::from_utf8_lossy(&terminal.output);
    assert!(screen.contains("\x1b[7m1 lines from [No Nam\x1b[0m"), "{screen:?}");
}

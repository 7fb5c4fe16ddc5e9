use std::path::PathBuf;

use crate::app::Model;
use crate::app::model::{Prompt, PromptKind};
use crate::editor::Direction;
use crate::input::Key;
use crate::search::{SearchNav, SearchSession};

/// All possible events and actions in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a byte at the cursor
    InsertChar(u8),
    /// Split the line at the cursor (Enter)
    InsertNewline,
    /// Delete the byte before the cursor (Backspace)
    DeleteBack,
    /// Delete the byte under the cursor (Delete)
    DeleteForward,

    // Navigation
    /// Move the cursor one step
    MoveCursor(Direction),
    PageUp,
    PageDown,
    /// Go to the start of the line
    MoveHome,
    /// Go to the end of the line
    MoveEnd,

    // Commands
    /// Save, prompting for a name if there is none
    Save,
    /// Open the search prompt
    StartSearch,
    /// A key typed while a prompt is open
    PromptKey(Key),
    /// Quit, or count down toward quitting when there are unsaved changes
    Quit,
    /// Repaint without changing anything
    Redraw,

    // System
    /// Terminal resized to (rows, cols)
    Resize(usize, usize),
}

/// Apply `msg` to the model and return the new state.
///
/// Saving itself is a side effect: [`Message::Save`] only records a request
/// that the event loop carries out after the update.
pub fn update(mut model: Model, msg: Message) -> Model {
    if !matches!(msg, Message::Quit | Message::Resize(..)) {
        model.quit_times_remaining = model.options.quit_times;
    }

    match msg {
        Message::InsertChar(byte) => insert_char(&mut model, byte),
        Message::InsertNewline => insert_newline(&mut model),
        Message::DeleteBack => delete_back(&mut model),
        Message::DeleteForward => {
            if model.cursor.row < model.document.line_count() {
                model.cursor.apply(Direction::Right, &model.document);
                delete_back(&mut model);
            }
        }
        Message::MoveCursor(direction) => model.cursor.apply(direction, &model.document),
        Message::PageUp => {
            let (top, rows) = (model.viewport.top_row(), model.viewport.rows());
            model.cursor.page_up(&model.document, top, rows);
        }
        Message::PageDown => {
            let (top, rows) = (model.viewport.top_row(), model.viewport.rows());
            model.cursor.page_down(&model.document, top, rows);
        }
        Message::MoveHome => model.cursor.home(),
        Message::MoveEnd => model.cursor.end(&model.document),
        Message::Save => {
            if model.file_path.is_some() {
                model.request_save();
            } else {
                model.prompt = Some(Prompt::new(PromptKind::SaveAs));
            }
        }
        Message::StartSearch => {
            let session = SearchSession::begin(model.cursor, model.viewport);
            model.prompt = Some(Prompt::new(PromptKind::Search(session)));
        }
        Message::PromptKey(key) => prompt_key(&mut model, key),
        Message::Quit => quit(&mut model),
        Message::Redraw => {}
        Message::Resize(rows, cols) => {
            tracing::debug!(rows, cols, "resize");
            model.resize(rows, cols);
        }
    }

    model.scroll();
    model
}

fn insert_char(model: &mut Model, byte: u8) {
    let doc = &mut model.document;
    if model.cursor.row == doc.line_count() {
        doc.insert_line(model.cursor.row, Vec::new());
    }
    doc.insert_char(model.cursor.row, model.cursor.col, byte);
    model.cursor.col += 1;
}

fn insert_newline(model: &mut Model) {
    model.document.split_line(model.cursor.row, model.cursor.col);
    model.cursor.row += 1;
    model.cursor.col = 0;
}

fn delete_back(model: &mut Model) {
    let cursor = model.cursor;
    if cursor.row == model.document.line_count() {
        // Past the last line there is nothing to delete; step back onto it.
        model.cursor.apply(Direction::Left, &model.document);
        return;
    }
    if cursor.col > 0 {
        model.document.remove_char(cursor.row, cursor.col - 1);
        model.cursor.col -= 1;
    } else if cursor.row > 0 {
        let joined_at = model.document.line_len(cursor.row - 1);
        model.document.join_line(cursor.row);
        model.cursor.row -= 1;
        model.cursor.col = joined_at;
    }
}

fn quit(model: &mut Model) {
    if model.document.is_dirty() && model.quit_times_remaining > 0 {
        let n = model.quit_times_remaining;
        model.set_message(format!(
            "WARNING!!! File has unsaved changes. Press Ctrl-Q {n} more times to quit."
        ));
        model.quit_times_remaining -= 1;
        tracing::info!(remaining = n, "quit blocked by unsaved changes");
        return;
    }
    tracing::info!("quit");
    model.should_quit = true;
}

const CTRL_H: Key = Key::ctrl(b'h');

fn prompt_key(model: &mut Model, key: Key) {
    let Some(prompt) = model.prompt.as_mut() else {
        return;
    };

    match key {
        Key::Escape => {
            finish_prompt(model, false);
            return;
        }
        Key::Enter => {
            if !prompt.input.is_empty() {
                finish_prompt(model, true);
            }
            return;
        }
        Key::Backspace | Key::Delete | CTRL_H => {
            prompt.input.pop();
        }
        other => {
            if let Some(byte) = other.printable() {
                prompt.input.push(byte);
            }
        }
    }

    if let PromptKind::Search(session) = &mut prompt.kind {
        let nav = match key {
            Key::ArrowRight | Key::ArrowDown => SearchNav::Next,
            Key::ArrowLeft | Key::ArrowUp => SearchNav::Previous,
            _ => SearchNav::Restart,
        };
        session.step(
            &mut model.document,
            &prompt.input,
            nav,
            &mut model.cursor,
            &mut model.viewport,
        );
    }
}

/// Close the open prompt, either accepting its input or cancelling.
fn finish_prompt(model: &mut Model, accept: bool) {
    let Some(prompt) = model.prompt.take() else {
        return;
    };
    match prompt.kind {
        PromptKind::SaveAs if accept => {
            let name = String::from_utf8_lossy(&prompt.input).into_owned();
            model.file_path = Some(PathBuf::from(name));
            model.request_save();
        }
        PromptKind::SaveAs => {
            tracing::debug!("save-as cancelled");
            model.set_message("Save aborted");
        }
        PromptKind::Search(session) if accept => session.accept(&mut model.document),
        PromptKind::Search(session) => {
            session.cancel(&mut model.document, &mut model.cursor, &mut model.viewport);
        }
    }
}

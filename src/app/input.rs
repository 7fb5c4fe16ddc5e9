use crate::app::{App, Message, Model};
use crate::editor::Direction;
use crate::input::Key;

const CTRL_F: Key = Key::ctrl(b'f');
const CTRL_H: Key = Key::ctrl(b'h');
const CTRL_L: Key = Key::ctrl(b'l');
const CTRL_Q: Key = Key::ctrl(b'q');
const CTRL_S: Key = Key::ctrl(b's');

impl App {
    /// Map a decoded key to a message. While a prompt is open every key
    /// goes to it.
    pub(super) const fn handle_key(key: Key, model: &Model) -> Option<Message> {
        if model.prompt.is_some() {
            return Some(Message::PromptKey(key));
        }

        let msg = match key {
            CTRL_Q => Message::Quit,
            CTRL_S => Message::Save,
            CTRL_F => Message::StartSearch,
            CTRL_H | Key::Backspace => Message::DeleteBack,
            CTRL_L | Key::Escape => Message::Redraw,
            Key::Delete => Message::DeleteForward,
            Key::Enter => Message::InsertNewline,
            Key::ArrowUp => Message::MoveCursor(Direction::Up),
            Key::ArrowDown => Message::MoveCursor(Direction::Down),
            Key::ArrowLeft => Message::MoveCursor(Direction::Left),
            Key::ArrowRight => Message::MoveCursor(Direction::Right),
            Key::PageUp => Message::PageUp,
            Key::PageDown => Message::PageDown,
            Key::Home => Message::MoveHome,
            Key::End => Message::MoveEnd,
            Key::Char(byte) => Message::InsertChar(byte),
        };
        Some(msg)
    }
}

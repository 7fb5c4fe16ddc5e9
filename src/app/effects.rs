use crate::app::{App, Message, Model};
use crate::storage;

impl App {
    /// Carry out the I/O a message asked for after `update` ran.
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        match msg {
            Message::Save | Message::PromptKey(_) => {
                if model.take_save_request() {
                    Self::save_document(model);
                }
            }
            Message::Quit if model.should_quit => {
                crate::perf::log_event("app.quit", format!("dirty={}", model.document.is_dirty()));
            }
            _ => {}
        }
    }

    /// Write the document to its file and report the outcome on the message
    /// line. The dirty flag is only cleared when the write succeeded.
    pub(super) fn save_document(model: &mut Model) {
        let Some(path) = model.file_path.clone() else {
            return;
        };
        let bytes = model.document.to_bytes();
        match storage::save(&path, &bytes) {
            Ok(written) => {
                model.document.mark_clean();
                model.set_message(format!("{written} bytes written to disk"));
            }
            Err(err) => {
                tracing::warn!(error = %err, "save failed");
                model.set_message(format!("Can't save! I/O error: {}", err.reason()));
            }
        }
    }
}

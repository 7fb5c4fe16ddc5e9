use std::time::Instant;

use anyhow::{Context, Result};

use crate::app::{App, HELP_MESSAGE, Message, Model, update};
use crate::editor::Document;
use crate::highlight::profile_for_path;
use crate::input::read_key;
use crate::storage::{self, StorageError};
use crate::terminal::{RawTerminal, Terminal};

impl App {
    /// Run the editor on the real terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be put in raw mode, the file
    /// cannot be read, or terminal I/O fails.
    pub fn run(&self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");
        let mut terminal = RawTerminal::open()
            .context("Failed to enable raw mode; ctek requires an interactive terminal")?;
        self.run_with(&mut terminal)
    }

    /// Run the editor on any [`Terminal`] until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or terminal I/O fails.
    pub fn run_with<T: Terminal>(&self, terminal: &mut T) -> Result<()> {
        let size = terminal.size().context("Failed to get window size")?;
        let mut model = self.load_model(size)?;
        Self::event_loop(terminal, &mut model)
    }

    /// Build the initial model: load the file (if any) and set the startup
    /// message.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load_model(&self, terminal_size: (usize, usize)) -> Result<Model> {
        let tab_stop = self.options.tab_stop;
        let mut message = HELP_MESSAGE;

        let document = match &self.file_path {
            None => Document::empty(),
            Some(path) => {
                let syntax = profile_for_path(path);
                match storage::load_lines(path) {
                    Ok(lines) => Document::new(lines, syntax, tab_stop),
                    Err(StorageError::NotFound { .. }) => {
                        tracing::info!(path = %path.display(), "new file");
                        message = "New file";
                        Document::new(vec![Vec::new()], syntax, tab_stop)
                    }
                    Err(err) => {
                        return Err(err)
                            .with_context(|| format!("Failed to open {}", path.display()));
                    }
                }
            }
        };

        let mut model = Model::new(
            document,
            self.file_path.clone(),
            terminal_size,
            self.options,
        );
        model.set_message(message);
        Ok(model)
    }

    fn event_loop<T: Terminal>(terminal: &mut T, model: &mut Model) -> Result<()> {
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            if model.expire_message(Instant::now()) {
                needs_render = true;
            }

            if needs_render {
                frame_idx += 1;
                let frame = {
                    let _scope = crate::perf::scope("frame.render");
                    crate::ui::render(model, Instant::now())
                        .context("Failed to compose frame")?
                };
                terminal
                    .write_all(&frame)
                    .context("Failed to write to terminal")?;
                crate::perf::log_event(
                    "frame.draw",
                    format!("frame={frame_idx} bytes={}", frame.len()),
                );
                needs_render = false;
            }

            let key = read_key(terminal).context("Failed to read from terminal")?;
            let Some(key) = key else {
                let size = terminal.size().context("Failed to get window size")?;
                if size != model.terminal_size {
                    *model = update(std::mem::take(model), Message::Resize(size.0, size.1));
                    needs_render = true;
                }
                continue;
            };

            if let Some(msg) = Self::handle_key(key, model) {
                tracing::trace!(?msg, "message");
                let side_msg = msg.clone();
                *model = update(std::mem::take(model), msg);
                Self::handle_message_side_effects(model, &side_msg);
                needs_render = true;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}

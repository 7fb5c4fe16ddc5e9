//! The real terminal: raw mode, window size, and bounded-wait input.
//!
//! The editor core only sees the [`Terminal`] trait, so tests drive it with
//! scripted input and an in-memory screen.

use std::collections::VecDeque;
use std::io::{self, Read, Stdout, Write, stdout};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode};

use crate::input::ByteSource;

/// How long a single byte read waits before reporting a timeout.
pub const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Everything the editor needs from a terminal.
pub trait Terminal: ByteSource {
    /// Write a whole frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the output is gone.
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Current window size as `(rows, cols)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be queried.
    fn size(&self) -> io::Result<(usize, usize)>;
}

/// Leaves raw mode when dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// The process's controlling terminal in raw mode.
///
/// Stdin is read on a background thread and handed over through a channel,
/// so [`ByteSource::read_byte`] never waits longer than [`READ_TIMEOUT`].
pub struct RawTerminal {
    input: Receiver<io::Result<Vec<u8>>>,
    pending: VecDeque<u8>,
    out: Stdout,
    timeout: Duration,
    _raw: RawModeGuard,
}

impl RawTerminal {
    /// Switch the terminal to raw mode and start the input reader.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be enabled.
    pub fn open() -> io::Result<Self> {
        let raw = RawModeGuard::enable()?;
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let mut stdin = io::stdin().lock();
            let mut buf = [0u8; 64];
            loop {
                match stdin.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        if tx.send(Ok(buf[..n].to_vec())).is_err() {
                            break;
                        }
                    }
                    Err(err) if is_transient(&err) => {}
                    Err(err) => {
                        let _ = tx.send(Err(err));
                        break;
                    }
                }
            }
        });

        tracing::debug!("terminal in raw mode");
        Ok(Self {
            input: rx,
            pending: VecDeque::new(),
            out: stdout(),
            timeout: READ_TIMEOUT,
            _raw: raw,
        })
    }
}

impl ByteSource for RawTerminal {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pending.pop_front() {
            return Ok(Some(byte));
        }
        match self.input.recv_timeout(self.timeout) {
            Ok(Ok(chunk)) => {
                self.pending.extend(chunk);
                Ok(self.pending.pop_front())
            }
            Ok(Err(err)) => Err(err),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "terminal input closed",
            )),
        }
    }
}

impl Terminal for RawTerminal {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut rest = bytes;
        while !rest.is_empty() {
            match self.out.write(rest) {
                Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
                Ok(n) => rest = &rest[n..],
                Err(err) if is_transient(&err) => {}
                Err(err) => return Err(err),
            }
        }
        loop {
            match self.out.flush() {
                Err(err) if is_transient(&err) => {}
                result => return result,
            }
        }
    }

    fn size(&self) -> io::Result<(usize, usize)> {
        let (cols, rows) = crossterm::terminal::size()?;
        Ok((usize::from(rows), usize::from(cols)))
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, Clear(ClearType::All), MoveTo(0, 0));
    }
}

fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
    )
}

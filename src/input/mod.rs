//! Keyboard decoding.
//!
//! Turns the raw byte stream coming from a terminal in raw mode into logical
//! [`Key`]s. Escape sequences are decoded best-effort: anything unknown
//! becomes [`Key::Escape`] so a stray sequence can never wedge the editor.

use std::collections::VecDeque;
use std::io;

const ESC: u8 = 0x1b;

/// One logical key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Any byte that is not part of a recognised sequence, control bytes
    /// included.
    Char(u8),
    Escape,
    Enter,
    Backspace,
    Delete,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Home,
    End,
}

impl Key {
    /// The key produced by holding Ctrl with `byte`.
    ///
    /// ```
    /// use ctek::input::Key;
    ///
    /// assert_eq!(Key::ctrl(b'q'), Key::Char(0x11));
    /// ```
    pub const fn ctrl(byte: u8) -> Self {
        Self::Char(byte & 0x1f)
    }

    /// The byte of a printable ASCII key, for prompt input.
    pub const fn printable(self) -> Option<u8> {
        match self {
            Self::Char(byte) if byte >= 0x20 && byte < 0x7f => Some(byte),
            _ => None,
        }
    }
}

/// Something that yields input bytes with a bounded wait.
pub trait ByteSource {
    /// Read one byte. `Ok(None)` means the wait expired with nothing to read.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying input fails for good.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Scripted input: bytes are handed out in order, then every read times out.
impl ByteSource for VecDeque<u8> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.pop_front())
    }
}

/// Decode one key from `source`.
///
/// Returns `Ok(None)` when the first read times out, meaning no key is
/// available yet.
///
/// # Errors
///
/// Propagates read errors from `source`.
pub fn read_key<S: ByteSource + ?Sized>(source: &mut S) -> io::Result<Option<Key>> {
    let Some(byte) = source.read_byte()? else {
        return Ok(None);
    };
    let key = match byte {
        ESC => decode_escape(source)?,
        b'\r' => Key::Enter,
        0x7f => Key::Backspace,
        other => Key::Char(other),
    };
    Ok(Some(key))
}

fn decode_escape<S: ByteSource + ?Sized>(source: &mut S) -> io::Result<Key> {
    let Some(first) = source.read_byte()? else {
        return Ok(Key::Escape);
    };
    let Some(second) = source.read_byte()? else {
        return Ok(Key::Escape);
    };

    let key = match (first, second) {
        (b'[', digit @ b'0'..=b'9') => match source.read_byte()? {
            Some(b'~') => tilde_key(digit),
            _ => Key::Escape,
        },
        (b'[', b'A') => Key::ArrowUp,
        (b'[', b'B') => Key::ArrowDown,
        (b'[', b'C') => Key::ArrowRight,
        (b'[', b'D') => Key::ArrowLeft,
        (b'[' | b'O', b'H') => Key::Home,
        (b'[' | b'O', b'F') => Key::End,
        _ => Key::Escape,
    };
    if key == Key::Escape {
        tracing::debug!(first, second, "unrecognised escape sequence");
    }
    Ok(key)
}

const fn tilde_key(digit: u8) -> Key {
    match digit {
        b'1' | b'7' => Key::Home,
        b'3' => Key::Delete,
        b'4' | b'8' => Key::End,
        b'5' => Key::PageUp,
        b'6' => Key::PageDown,
        _ => Key::Escape,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Option<Key> {
        let mut source: VecDeque<u8> = bytes.iter().copied().collect();
        read_key(&mut source).unwrap()
    }

    fn decode_all(bytes: &[u8]) -> Vec<Key> {
        let mut source: VecDeque<u8> = bytes.iter().copied().collect();
        std::iter::from_fn(|| read_key(&mut source).unwrap()).collect()
    }

    #[test]
    fn test_timeout_yields_no_key() {
        assert_eq!(decode(b""), None);
    }

    #[test]
    fn test_plain_bytes_pass_through() {
        assert_eq!(decode(b"a"), Some(Key::Char(b'a')));
        assert_eq!(decode(&[0x11]), Some(Key::ctrl(b'q')));
        assert_eq!(decode(b"\t"), Some(Key::Char(b'\t')));
    }

    #[test]
    fn test_carriage_return_is_enter() {
        assert_eq!(decode(b"\r"), Some(Key::Enter));
    }

    #[test]
    fn test_del_byte_is_backspace() {
        assert_eq!(decode(&[0x7f]), Some(Key::Backspace));
    }

    #[test]
    fn test_lone_escape_times_out_to_escape() {
        assert_eq!(decode(b"\x1b"), Some(Key::Escape));
        assert_eq!(decode(b"\x1b["), Some(Key::Escape));
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(decode(b"\x1b[A"), Some(Key::ArrowUp));
        assert_eq!(decode(b"\x1b[B"), Some(Key::ArrowDown));
        assert_eq!(decode(b"\x1b[C"), Some(Key::ArrowRight));
        assert_eq!(decode(b"\x1b[D"), Some(Key::ArrowLeft));
    }

    #[test]
    fn test_home_end_variants() {
        let home: [&[u8]; 4] = [b"\x1b[H", b"\x1bOH", b"\x1b[1~", b"\x1b[7~"];
        for seq in home {
            assert_eq!(decode(seq), Some(Key::Home), "{seq:?}");
        }
        let end: [&[u8]; 4] = [b"\x1b[F", b"\x1bOF", b"\x1b[4~", b"\x1b[8~"];
        for seq in end {
            assert_eq!(decode(seq), Some(Key::End), "{seq:?}");
        }
    }

    #[test]
    fn test_tilde_sequences() {
        assert_eq!(decode(b"\x1b[3~"), Some(Key::Delete));
        assert_eq!(decode(b"\x1b[5~"), Some(Key::PageUp));
        assert_eq!(decode(b"\x1b[6~"), Some(Key::PageDown));
    }

    #[test]
    fn test_unknown_digit_is_escape() {
        assert_eq!(decode(b"\x1b[2~"), Some(Key::Escape));
    }

    #[test]
    fn test_missing_tilde_is_escape() {
        assert_eq!(decode(b"\x1b[3"), Some(Key::Escape));
        assert_eq!(decode(b"\x1b[3x"), Some(Key::Escape));
    }

    #[test]
    fn test_unknown_tail_is_escape() {
        assert_eq!(decode(b"\x1bxy"), Some(Key::Escape));
        assert_eq!(decode(b"\x1bOA"), Some(Key::Escape));
    }

    #[test]
    fn test_stream_decodes_key_by_key() {
        let keys = decode_all(b"ab\x1b[Cc\r");
        assert_eq!(
            keys,
            vec![
                Key::Char(b'a'),
                Key::Char(b'b'),
                Key::ArrowRight,
                Key::Char(b'c'),
                Key::Enter,
            ]
        );
    }

    #[test]
    fn test_printable() {
        assert_eq!(Key::Char(b'x').printable(), Some(b'x'));
        assert_eq!(Key::Char(b'\t').printable(), None);
        assert_eq!(Key::ctrl(b'a').printable(), None);
        assert_eq!(Key::Enter.printable(), None);
        assert_eq!(Key::Char(0x80).printable(), None);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn arbitrary_bytes_never_fail(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
                let mut source: VecDeque<u8> = bytes.iter().copied().collect();
                let mut decoded = 0;
                while read_key(&mut source).unwrap().is_some() {
                    decoded += 1;
                    prop_assert!(decoded <= bytes.len());
                }
                prop_assert!(source.is_empty());
            }
        }
    }
}

//! Keyboard reader.
//!
//! Raw bytes read from the terminal are decoded into [`Key`]s. Most bytes map
//! directly to a key, but `ESC` may introduce a multi-byte sequence, such as those
//! sent for arrow keys. Since a lone `ESC` press is indistinguishable from the start
//! of such a sequence, the decoder relies on the underlying reader to return nothing
//! after a short timeout, and treats an incomplete or unrecognized sequence as `ESC`
//! itself.

use crate::error::Result;
use std::fmt::{self, Display, Formatter};
use std::io::{self, Bytes, Read, Stdin};

/// The set of keys recognized by [`Keyboard`]s.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    /// No key was available before the read timed out.
    None,
    Control(u8),
    Char(u8),
    Backspace,
    Delete,
    Up,
    Down,
    Right,
    Left,
    Home,
    End,
    PageUp,
    PageDown,
}

pub const ESC: Key = Key::Control(27);
pub const ENTER: Key = Key::Control(13);
pub const CTRL_Q: Key = Key::Control(17);

impl Key {
    /// Returns the name of the key as it appears in messages, such as `Ctrl-Q`.
    pub fn label(&self) -> String {
        self.to_string()
            .split('-')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join("-")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Decoding states while reading a single key.
#[derive(Copy, Clone, Debug)]
enum State {
    Idle,
    SawEscape,
    /// `ESC [`
    SawBracket,
    /// `ESC [ <digit>`
    SawBracketDigit(u8),
    /// `ESC O`
    SawAlternate,
    /// `ESC` followed by a byte that does not introduce a known sequence.
    SawUnknown,
}

/// Keys selected by the byte that terminates `ESC [ <letter>`.
const CSI_KEYS: [(u8, Key); 6] = [
    (b'A', Key::Up),
    (b'B', Key::Down),
    (b'C', Key::Right),
    (b'D', Key::Left),
    (b'H', Key::Home),
    (b'F', Key::End),
];

/// Keys selected by the digit in `ESC [ <digit> ~`.
const VT_KEYS: [(u8, Key); 7] = [
    (b'1', Key::Home),
    (b'3', Key::Delete),
    (b'4', Key::End),
    (b'5', Key::PageUp),
    (b'6', Key::PageDown),
    (b'7', Key::Home),
    (b'8', Key::End),
];

/// Keys selected by the byte that terminates `ESC O <letter>`.
const ALT_KEYS: [(u8, Key); 2] = [(b'H', Key::Home), (b'F', Key::End)];

/// A keyboard that reads bytes from a source and produces corresponding [`Key`]s.
pub struct Keyboard<R: Read = Stdin> {
    term: Bytes<R>,
}

impl Keyboard<Stdin> {
    /// Creates a new keyboard reader attached to standard input.
    pub fn new() -> Keyboard<Stdin> {
        Keyboard::with_reader(io::stdin())
    }
}

impl<R: Read> Keyboard<R> {
    /// Creates a new keyboard reader attached to `reader`, where a read returning no
    /// bytes is interpreted as a timeout.
    pub fn with_reader(reader: R) -> Keyboard<R> {
        Keyboard {
            term: reader.bytes(),
        }
    }

    fn next(&mut self) -> Result<Option<u8>> {
        Ok(self.term.next().transpose()?)
    }

    /// Reads the next key.
    ///
    /// A value of [`Key::None`] is returned if no bytes are available to read after
    /// waiting for the underlying timeout. Any incomplete or unrecognized escape
    /// sequence yields [`ESC`].
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if an I/O error occurred while reading bytes from the underlying
    /// source.
    pub fn read(&mut self) -> Result<Key> {
        let mut state = State::Idle;
        loop {
            let b = self.next()?;
            state = match (state, b) {
                (State::Idle, None) => return Ok(Key::None),
                (State::Idle, Some(27)) => State::SawEscape,
                (State::Idle, Some(b)) => return Ok(literal(b)),
                (_, None) => return Ok(ESC),
                (State::SawEscape, Some(b'[')) => State::SawBracket,
                (State::SawEscape, Some(b'O')) => State::SawAlternate,
                (State::SawEscape, Some(_)) => State::SawUnknown,
                (State::SawBracket, Some(b @ b'0'..=b'9')) => State::SawBracketDigit(b),
                (State::SawBracket, Some(b)) => return Ok(lookup(&CSI_KEYS, b)),
                (State::SawBracketDigit(d), Some(b'~')) => return Ok(lookup(&VT_KEYS, d)),
                (State::SawAlternate, Some(b)) => return Ok(lookup(&ALT_KEYS, b)),
                (State::SawBracketDigit(_) | State::SawUnknown, Some(_)) => return Ok(ESC),
            };
        }
    }
}

/// Returns the key corresponding to a single byte that does not start a sequence.
fn literal(b: u8) -> Key {
    match b {
        127 => Key::Backspace,
        0..=31 => Key::Control(b),
        _ => Key::Char(b),
    }
}

/// Returns the key associated with `b` in `table`, or [`ESC`] if not found.
fn lookup(table: &[(u8, Key)], b: u8) -> Key {
    table
        .iter()
        .find(|(k, _)| *k == b)
        .map(|(_, key)| *key)
        .unwrap_or(ESC)
}

/// Mapping of key names to keys, which are used when binding keys to editing
/// operations.
pub const KEY_MAPPINGS: [(&str, Key); 42] = [
    ("ctrl-@", Key::Control(0)),
    ("ctrl-a", Key::Control(1)),
    ("ctrl-b", Key::Control(2)),
    ("ctrl-c", Key::Control(3)),
    ("ctrl-d", Key::Control(4)),
    ("ctrl-e", Key::Control(5)),
    ("ctrl-f", Key::Control(6)),
    ("ctrl-g", Key::Control(7)),
    ("ctrl-h", Key::Control(8)),
    ("tab", Key::Control(9)),
    ("ctrl-j", Key::Control(10)),
    ("ctrl-k", Key::Control(11)),
    ("ctrl-l", Key::Control(12)),
    ("enter", Key::Control(13)),
    ("ctrl-n", Key::Control(14)),
    ("ctrl-o", Key::Control(15)),
    ("ctrl-p", Key::Control(16)),
    ("ctrl-q", Key::Control(17)),
    ("ctrl-r", Key::Control(18)),
    ("ctrl-s", Key::Control(19)),
    ("ctrl-t", Key::Control(20)),
    ("ctrl-u", Key::Control(21)),
    ("ctrl-v", Key::Control(22)),
    ("ctrl-w", Key::Control(23)),
    ("ctrl-x", Key::Control(24)),
    ("ctrl-y", Key::Control(25)),
    ("ctrl-z", Key::Control(26)),
    ("esc", Key::Control(27)),
    ("ctrl-\\", Key::Control(28)),
    ("ctrl-]", Key::Control(29)),
    ("ctrl-^", Key::Control(30)),
    ("ctrl-_", Key::Control(31)),
    ("backspace", Key::Backspace),
    ("delete", Key::Delete),
    ("up", Key::Up),
    ("down", Key::Down),
    ("right", Key::Right),
    ("left", Key::Left),
    ("home", Key::Home),
    ("end", Key::End),
    ("page-up", Key::PageUp),
    ("page-down", Key::PageDown),
];

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Key::None => write!(f, "none"),
            Key::Char(b) if b.is_ascii_graphic() => write!(f, "{}", *b as char),
            Key::Char(b) => write!(f, "<{b:#04x}>"),
            key => {
                let name = KEY_MAPPINGS
                    .iter()
                    .find(|(_, k)| k == key)
                    .map(|(name, _)| *name)
                    .unwrap_or("?");
                write!(f, "{name}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(bytes: &[u8]) -> Vec<Key> {
        let mut keyboard = Keyboard::with_reader(bytes);
        let mut keys = Vec::new();
        loop {
            match keyboard.read().unwrap() {
                Key::None => break,
                key => keys.push(key),
            }
        }
        keys
    }

    #[test]
    fn read_literal_bytes() {
        assert_eq!(
            read_all(b"a\x11\r\x7f\xc3"),
            vec![
                Key::Char(b'a'),
                Key::Control(17),
                ENTER,
                Key::Backspace,
                Key::Char(0xc3)
            ]
        );
    }

    #[test]
    fn read_nothing() {
        let mut keyboard = Keyboard::with_reader(&b""[..]);
        assert_eq!(keyboard.read().unwrap(), Key::None);
    }

    #[test]
    fn read_lone_escape() {
        assert_eq!(read_all(b"\x1b"), vec![ESC]);
    }

    #[test]
    fn read_incomplete_sequences() {
        assert_eq!(read_all(b"\x1b["), vec![ESC]);
        assert_eq!(read_all(b"\x1bO"), vec![ESC]);
        assert_eq!(read_all(b"\x1b[5"), vec![ESC]);
    }

    #[test]
    fn read_arrow_keys() {
        assert_eq!(
            read_all(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![Key::Up, Key::Down, Key::Right, Key::Left]
        );
    }

    #[test]
    fn read_home_and_end_variants() {
        assert_eq!(
            read_all(b"\x1b[H\x1b[F\x1bOH\x1bOF\x1b[1~\x1b[4~\x1b[7~\x1b[8~"),
            vec![
                Key::Home,
                Key::End,
                Key::Home,
                Key::End,
                Key::Home,
                Key::End,
                Key::Home,
                Key::End
            ]
        );
    }

    #[test]
    fn read_vt_keys() {
        assert_eq!(
            read_all(b"\x1b[3~\x1b[5~\x1b[6~"),
            vec![Key::Delete, Key::PageUp, Key::PageDown]
        );
    }

    #[test]
    fn read_unrecognized_sequences() {
        // Unknown terminating bytes degrade to ESC without consuming what follows.
        assert_eq!(read_all(b"\x1b[Zx"), vec![ESC, Key::Char(b'x')]);
        assert_eq!(read_all(b"\x1b[2~x"), vec![ESC, Key::Char(b'x')]);
        assert_eq!(read_all(b"\x1b[5xy"), vec![ESC, Key::Char(b'y')]);
        assert_eq!(read_all(b"\x1bOPx"), vec![ESC, Key::Char(b'x')]);
        assert_eq!(read_all(b"\x1bxyz"), vec![ESC, Key::Char(b'z')]);
    }

    #[test]
    fn format_keys() {
        assert_eq!(Key::Control(19).to_string(), "ctrl-s");
        assert_eq!(ENTER.to_string(), "enter");
        assert_eq!(Key::PageDown.to_string(), "page-down");
        assert_eq!(Key::Char(b'q').to_string(), "q");
        assert_eq!(Key::Char(b' ').to_string(), "<0x20>");
    }

    #[test]
    fn key_labels() {
        assert_eq!(CTRL_Q.label(), "Ctrl-Q");
        assert_eq!(Key::PageDown.label(), "Page-Down");
        assert_eq!(ESC.label(), "Esc");
        assert_eq!(Key::Control(31).label(), "Ctrl-_");
    }
}

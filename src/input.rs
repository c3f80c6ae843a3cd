//! Input decoding: raw terminal bytes to logical key events
//!
//! One `read` fills a small fixed buffer; one call returns exactly one
//! logical key, never a partial sequence. Escape sequences are
//! disambiguated by lookahead within the same buffer - a lone ESC leaves
//! the rest of the buffer zeroed, which is how it is told apart from the
//! start of a CSI sequence. Unknown sequences degrade to the raw final
//! byte rather than failing.

use std::io::Read;

/// Size of the raw read buffer; long enough for the longest supported
/// escape sequence (`ESC [ <digit> ; <modifier> <letter>`).
pub const READ_BUFFER_LEN: usize = 6;

const CTRL_FIND: u8 = 0x06; // Ctrl-F
const CTRL_QUIT: u8 = 0x11; // Ctrl-Q
const CTRL_SAVE: u8 = 0x13; // Ctrl-S

/// A decoded logical key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Delete,
    Backspace,
    Enter,
    Esc,
    Find,
    Save,
    Quit,
    /// Decoded text to insert at the cursor (printable ASCII or UTF-8)
    Insert(String),
    /// Pass-through for bytes with no mapping; handled as a no-op
    Raw(u8),
}

/// Read one keypress from `input`.
///
/// Blocks until bytes are available. Returns `None` on EOF or read error;
/// the caller decides whether to retry or shut down. Never panics and
/// never returns a partial escape sequence.
pub fn read_key(input: &mut impl Read) -> Option<Key> {
    let mut buf = [0u8; READ_BUFFER_LEN];
    match input.read(&mut buf) {
        Ok(0) => None,
        Ok(_) => Some(decode(&buf)),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read input");
            None
        }
    }
}

/// Decode one read buffer into a logical key.
///
/// Trailing zero bytes are padding from the fixed-size read and are
/// dropped from insert payloads.
pub fn decode(buf: &[u8; READ_BUFFER_LEN]) -> Key {
    match buf[0] {
        0x1b => decode_escape(buf),
        b'\r' => Key::Enter,
        0x7f | 0x08 => Key::Backspace,
        CTRL_FIND => Key::Find,
        CTRL_SAVE => Key::Save,
        CTRL_QUIT => Key::Quit,
        b if b < 0x20 => Key::Raw(b),
        _ => Key::Insert(insert_payload(buf)),
    }
}

/// Decode the tail of an ESC-initiated buffer.
fn decode_escape(buf: &[u8; READ_BUFFER_LEN]) -> Key {
    match buf[1] {
        // Nothing followed the ESC byte within the same read: the key
        // itself was pressed.
        0 => Key::Esc,
        b'[' => decode_csi(buf),
        // ESC O F/H is the SS3 form some terminals send for End/Home.
        _ => match buf[2] {
            b'F' => Key::End,
            b'H' => Key::Home,
            other => Key::Raw(other),
        },
    }
}

fn decode_csi(buf: &[u8; READ_BUFFER_LEN]) -> Key {
    match buf[2] {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        b'F' => Key::End,
        b'H' => Key::Home,
        digit @ (b'1' | b'3' | b'4' | b'5' | b'6' | b'7' | b'8') => match buf[3] {
            b'~' => match digit {
                b'1' | b'7' => Key::Home,
                b'3' => Key::Delete,
                b'4' | b'8' => Key::End,
                b'5' => Key::PageUp,
                _ => Key::PageDown,
            },
            // Modified sequence `ESC [ d ; m X`: the modifier byte is
            // discarded, only the final letter selects the key.
            b';' => match buf[5] {
                b'A' => Key::PageUp,
                b'B' => Key::PageDown,
                b'C' | b'F' => Key::End,
                b'D' | b'H' => Key::Home,
                other => Key::Raw(other),
            },
            other => Key::Raw(other),
        },
        other => Key::Raw(other),
    }
}

/// Text payload of a non-escape read: every non-padding byte, decoded
/// leniently so a torn UTF-8 sequence cannot poison the buffer.
fn insert_payload(buf: &[u8; READ_BUFFER_LEN]) -> String {
    let bytes: Vec<u8> = buf.iter().copied().filter(|&b| b != 0).collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

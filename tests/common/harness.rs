//! Test harness: drive an editor session with scripted key bytes
//!
//! Keys are fed as raw byte sequences, each padded to the input read
//! buffer length so one read decodes exactly one key, and frames are
//! captured into a byte sink for assertions on the rendered output.

use std::path::PathBuf;

use slate::editor::Editor;
use slate::input::READ_BUFFER_LEN;

// Control bytes as the terminal sends them
pub const CTRL_F: &[u8] = &[0x06];
pub const CTRL_Q: &[u8] = &[0x11];
pub const CTRL_S: &[u8] = &[0x13];
pub const ENTER: &[u8] = b"\r";
pub const BACKSPACE: &[u8] = &[0x7f];
pub const UP: &[u8] = b"\x1b[A";
pub const DOWN: &[u8] = b"\x1b[B";
pub const RIGHT: &[u8] = b"\x1b[C";
pub const LEFT: &[u8] = b"\x1b[D";
pub const HOME: &[u8] = b"\x1b[H";
pub const END: &[u8] = b"\x1b[F";
pub const DELETE: &[u8] = b"\x1b[3~";
pub const PAGE_UP: &[u8] = b"\x1b[5~";
pub const PAGE_DOWN: &[u8] = b"\x1b[6~";

/// Concatenate key events, each padded to one full read buffer.
pub fn script(events: &[&[u8]]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for event in events {
        assert!(event.len() <= READ_BUFFER_LEN, "event longer than one read");
        let mut chunk = [0u8; READ_BUFFER_LEN];
        chunk[..event.len()].copy_from_slice(event);
        bytes.extend_from_slice(&chunk);
    }
    bytes
}

/// Repeat one key event `n` times.
pub fn repeat(event: &[u8], n: usize) -> Vec<Vec<u8>> {
    std::iter::repeat(event.to_vec()).take(n).collect()
}

pub struct EditorHarness {
    // Holds the backing file alive for the session
    _dir: tempfile::TempDir,
    pub path: PathBuf,
    pub editor: Editor,
    pub output: Vec<u8>,
}

impl EditorHarness {
    /// Start a session over a real temp file containing `lines`.
    pub fn with_lines(lines: &[&str], rows: usize, columns: usize) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        let mut text = lines.join("\n");
        text.push('\n');
        std::fs::write(&path, text).unwrap();
        let editor = Editor::open(Some(path.to_str().unwrap()), rows, columns).unwrap();
        Self {
            _dir: dir,
            path,
            editor,
            output: Vec::new(),
        }
    }

    /// Feed key events through the run loop until the script is consumed
    /// (or the editor quits).
    pub fn send(&mut self, events: &[&[u8]]) {
        let bytes = script(events);
        let mut input = bytes.as_slice();
        self.editor.run(&mut input, &mut self.output).unwrap();
    }

    pub fn send_owned(&mut self, events: &[Vec<u8>]) {
        let borrowed: Vec<&[u8]> = events.iter().map(Vec::as_slice).collect();
        self.send(&borrowed);
    }

    pub fn lines(&self) -> Vec<String> {
        self.editor.content().lines().to_vec()
    }

    pub fn cursor_pos(&self) -> (usize, usize) {
        (self.editor.cursor().row(), self.editor.cursor().col())
    }

    /// Everything rendered so far, lossily decoded for substring asserts
    pub fn frames(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    pub fn saved_text(&self) -> String {
        std::fs::read_to_string(&self.path).unwrap()
    }
}

//! Edit operations: codepoint-safe insert, delete, split and join
//!
//! Edits run before the cursor move pass, mirroring the
//! edit -> move -> scroll pipeline: each operation mutates the content at
//! the cursor's current position and leaves the cursor update to
//! `Cursor::move_for`. Every operation either fully applies or is a no-op
//! at a buffer boundary.

use crate::content::Content;
use crate::cursor::Cursor;
use crate::input::Key;

/// Apply the content mutation for one key event, if it has one.
pub fn apply(key: &Key, content: &mut Content, cursor: &mut Cursor) {
    match key {
        Key::Delete => delete_forward(content, cursor),
        Key::Backspace => delete_backward(content, cursor),
        Key::Enter => split_line(content, cursor),
        Key::Insert(text) => insert_text(content, cursor, text),
        _ => {}
    }
}

/// Splice decoded text into the current line at the cursor column.
fn insert_text(content: &mut Content, cursor: &Cursor, text: &str) {
    if text.is_empty() {
        return;
    }
    let row = cursor.row();
    let at = content.byte_of(row, cursor.col());
    let mut line = content.line(row).to_string();
    line.insert_str(at, text);
    content.replace_line(row, line);
}

/// Delete the codepoint under the cursor, or join the next line up when
/// the cursor sits at the end of its line.
fn delete_forward(content: &mut Content, cursor: &Cursor) {
    let row = cursor.row();
    let col = cursor.col();
    if col < content.line_len(row) {
        let start = content.byte_of(row, col);
        let end = content.byte_of(row, col + 1);
        let mut line = content.line(row).to_string();
        line.replace_range(start..end, "");
        content.replace_line(row, line);
    } else if row + 1 < content.line_count() {
        let next = content.remove_line(row + 1);
        let mut line = content.line(row).to_string();
        line.push_str(&next);
        content.replace_line(row, line);
    }
}

/// Delete the codepoint before the cursor, or join the current line onto
/// the previous one when the cursor sits at column 0.
///
/// The join stashes the previous line's length in the cursor's sticky
/// column so the move pass lands exactly at the join point.
fn delete_backward(content: &mut Content, cursor: &mut Cursor) {
    let row = cursor.row();
    let col = cursor.col();
    if col > 0 {
        let start = content.byte_of(row, col - 1);
        let end = content.byte_of(row, col);
        let mut line = content.line(row).to_string();
        line.replace_range(start..end, "");
        content.replace_line(row, line);
    } else if row > 0 {
        cursor.stash_column(content.line_len(row - 1));
        let current = content.remove_line(row);
        let mut line = content.line(row - 1).to_string();
        line.push_str(&current);
        content.replace_line(row - 1, line);
    }
}

/// Split the current line at the cursor column; the remainder becomes a
/// new line directly below.
fn split_line(content: &mut Content, cursor: &Cursor) {
    let row = cursor.row();
    let at = content.byte_of(row, cursor.col());
    let line = content.line(row).to_string();
    let (head, tail) = line.split_at(at);
    content.replace_line(row, head.to_string());
    content.insert_line(row + 1, tail.to_string());
}

//! Screen compositor: content + viewport state to one ANSI frame
//!
//! Each frame redraws every visible line from `scroll_top`, recomputing
//! `page_wrap` and the number of physical rows the content actually
//! occupies. Rows past the end of the document render a `~` filler; a
//! line whose wrap would overflow the remaining window renders `@` rows
//! instead and truncates the frame. The status line is drawn in reverse
//! video, and the frame ends with the physical cursor placement.

use crate::content::Content;
use crate::cursor::{wrap_of, Cursor};
use crate::display_width::{prefix_width, str_width};

const CURSOR_HOME: &str = "\x1b[H";
const ERASE_LINE_END: &str = "\x1b[K";
const REVERSE_VIDEO: &str = "\x1b[7m";
const RESET_ATTRS: &str = "\x1b[0m";

/// Glyph for rows beyond the end of the document
const FILLER: char = '~';
/// Glyph for rows of a line too wrapped to fit the remaining window
const OVERFLOW: char = '@';

/// Compose one full frame.
///
/// Returns the frame bytes and the number of physical rows the drawn
/// content occupied (`used_rows`, consumed by the page-down landing row).
/// `rows` is the usable content height; one extra physical row below it
/// holds the status line.
pub fn compose(
    content: &Content,
    cursor: &mut Cursor,
    rows: usize,
    columns: usize,
    status: &str,
) -> (String, usize) {
    let mut frame = String::new();
    let used_rows = draw_content(&mut frame, content, cursor, rows, columns);
    draw_status(&mut frame, columns, status);
    draw_cursor(&mut frame, content, cursor, columns);
    (frame, used_rows)
}

fn draw_content(
    frame: &mut String,
    content: &Content,
    cursor: &mut Cursor,
    rows: usize,
    columns: usize,
) -> usize {
    let mut used_rows = 0;
    cursor.reset_page_wrap();
    frame.push_str(CURSOR_HOME);

    let mut i: usize = 0;
    // page_wrap grows as wrapped lines are drawn, shrinking the window
    while (i as i64) <= rows as i64 - cursor.page_wrap() as i64 {
        let row = i + cursor.scroll_top();
        if row >= content.line_count() {
            frame.push(FILLER);
        } else {
            let line = content.line(row);
            let wrap = wrap_of(line, columns);
            let remaining = rows as i64 - cursor.page_wrap() as i64 - i as i64 + 1;
            if (wrap as i64) < remaining {
                frame.push_str(line);
                used_rows += wrap + 1;
            } else {
                // The line cannot fit: truncate the frame with overflow
                // rows rather than overrun the window.
                for _ in 0..remaining.max(0) {
                    frame.push(OVERFLOW);
                    frame.push_str(ERASE_LINE_END);
                    frame.push_str("\r\n");
                }
                return used_rows;
            }
            cursor.add_page_wrap(wrap);
        }
        frame.push_str(ERASE_LINE_END);
        frame.push_str("\r\n");
        i += 1;
    }
    used_rows
}

fn draw_status(frame: &mut String, columns: usize, status: &str) {
    frame.push_str(REVERSE_VIDEO);
    frame.push_str(status);
    let padding = columns.saturating_sub(str_width(status));
    for _ in 0..padding {
        frame.push(' ');
    }
    frame.push_str(RESET_ATTRS);
}

/// Place the terminal cursor (1-based) from the logical position.
///
/// The column uses the rendered width of the line's prefix, not the
/// codepoint offset, so wide codepoints place the cursor correctly; the
/// prefix rows it wrapped through are added to the row.
fn draw_cursor(frame: &mut String, content: &Content, cursor: &Cursor, columns: usize) {
    let display_col = prefix_width(content.line(cursor.row()), cursor.col());
    let columns = columns.max(1);
    let term_row = (cursor.row() as i64 - cursor.scroll_top() as i64
        + cursor.cursor_wrap() as i64
        - cursor.hidden_wrap() as i64
        + (display_col / columns) as i64
        + 1)
        .max(1);
    let term_col = display_col % columns + 1;
    frame.push_str(&format!("\x1b[{};{}H", term_row, term_col));
}

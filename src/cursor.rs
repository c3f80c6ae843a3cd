//! Cursor and viewport engine
//!
//! Tracks the logical cursor `(col, row)` and the scroll window over
//! wrapped content. The position accounting runs on three counters:
//!
//! - `cursor_wrap`: extra screen rows consumed by wrapping of visible
//!   lines strictly above the cursor's row;
//! - `page_wrap`: extra rows consumed by wrapping of the lines drawn in
//!   the current frame (reset and re-accumulated by the compositor);
//! - `hidden_wrap`: extra rows contributed by lines scrolled off above
//!   the viewport.
//!
//! The engine's core correctness property: the projected physical row
//! `row - scroll_top + cursor_wrap - hidden_wrap + column_wrap` stays
//! within the visible window after every update.
//!
//! Each key is processed in two passes: the cursor move (updating
//! `col`/`row`/`cursor_wrap`) and then the scroll (updating `scroll_top`/
//! `hidden_wrap`), so the scroll reacts to the new cursor position using
//! the old window.

use crate::content::Content;
use crate::display_width::{prefix_width, str_width};
use crate::input::Key;

/// Rows of context kept when jumping by a page
const PAGE_SCROLL_OVERLAP: usize = 2;

/// Wrap count of a line: additional physical rows beyond its first one
pub fn wrap_of(line: &str, columns: usize) -> usize {
    str_width(line).saturating_sub(1) / columns.max(1)
}

#[derive(Debug, Clone, Default)]
pub struct Cursor {
    col: usize,
    /// Sticky column: the last explicitly set column, restored (clamped)
    /// after vertical moves through shorter lines.
    col_cache: usize,
    row: usize,
    /// First visible line
    scroll_top: usize,
    cursor_wrap: usize,
    page_wrap: usize,
    hidden_wrap: usize,
    /// Suppresses a second scroll jump right after a multi-row wrap has
    /// been absorbed, so one wrapped line cannot double-scroll.
    hidden_wrap_cooldown: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn cursor_wrap(&self) -> usize {
        self.cursor_wrap
    }

    pub fn page_wrap(&self) -> usize {
        self.page_wrap
    }

    pub fn hidden_wrap(&self) -> usize {
        self.hidden_wrap
    }

    pub fn hidden_wrap_cooldown(&self) -> usize {
        self.hidden_wrap_cooldown
    }

    /// Set the column and refresh the sticky column
    pub fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_cache = col;
    }

    /// Stash a future column into the sticky cache without moving.
    ///
    /// Used by the backspace line-join: the edit pass records the previous
    /// line's length before joining, and the move pass lands the cursor
    /// there.
    pub fn stash_column(&mut self, col: usize) {
        self.col_cache = col;
    }

    /// Projected physical screen row of the cursor (0-based), including
    /// the extra rows contributed by the cursor's own column wrapping.
    pub fn physical_row(&self, content: &Content, columns: usize) -> i64 {
        let column_wrap = prefix_width(content.line(self.row), self.col) / columns.max(1);
        self.row as i64 - self.scroll_top as i64 + self.cursor_wrap as i64
            - self.hidden_wrap as i64
            + column_wrap as i64
    }

    // ---- cursor move pass ----

    /// Update `(col, row)` and `cursor_wrap` for one key event.
    ///
    /// `used_rows` is the physical row count the last frame actually
    /// occupied; page-down derives its landing row from it.
    pub fn move_for(&mut self, key: &Key, content: &Content, used_rows: usize, columns: usize) {
        let prev_row = self.row;

        match key {
            Key::Down => {
                if self.row + 1 < content.line_count() {
                    self.row += 1;
                    self.shift_cursor_wrap(prev_row, content, columns);
                }
            }
            Key::Up => {
                if self.row > 0 {
                    self.row -= 1;
                    self.shift_cursor_wrap(prev_row, content, columns);
                }
            }
            Key::PageDown => {
                let bottom = (self.scroll_top + used_rows).saturating_sub(self.page_wrap);
                self.row = if bottom == content.line_count() {
                    bottom - 1
                } else {
                    bottom.saturating_sub(PAGE_SCROLL_OVERLAP)
                };
                self.row = self.row.min(content.line_count() - 1);
                self.shift_cursor_wrap(prev_row, content, columns);
            }
            Key::PageUp => {
                self.row = if self.scroll_top == 0 {
                    0
                } else if self.scroll_top == content.line_count() - 1 {
                    self.scroll_top - 1
                } else {
                    self.scroll_top + PAGE_SCROLL_OVERLAP - 1
                };
                self.row = self.row.min(content.line_count() - 1);
                self.shift_cursor_wrap(prev_row, content, columns);
            }
            Key::Left => {
                if self.col > 0 {
                    self.set_col(self.col - 1);
                } else if self.row > 0 {
                    // Wrap to the end of the previous line via the
                    // vertical machinery instead of duplicating it.
                    self.move_for(&Key::Up, content, used_rows, columns);
                    self.move_for(&Key::End, content, used_rows, columns);
                }
            }
            Key::Right => {
                if self.col < content.line_len(self.row) {
                    self.set_col(self.col + 1);
                } else if self.row + 1 < content.line_count() {
                    self.move_for(&Key::Down, content, used_rows, columns);
                    self.move_for(&Key::Home, content, used_rows, columns);
                }
            }
            Key::Home => self.set_col(0),
            Key::End => self.set_col(content.line_len(self.row)),
            Key::Delete => {
                // Forward delete never moves the cursor.
            }
            Key::Backspace => {
                if self.col == 0 {
                    if self.row > 0 {
                        // The edit pass already joined the lines and
                        // stashed the join column in the sticky cache.
                        self.row -= 1;
                        self.col = self.col_cache.min(content.line_len(self.row));
                        let prefix_end = content.byte_of(self.row, self.col);
                        let prefix = &content.line(self.row)[..prefix_end];
                        self.cursor_wrap = self
                            .cursor_wrap
                            .saturating_sub(wrap_of(prefix, columns));
                    }
                } else {
                    self.set_col(self.col - 1);
                }
            }
            Key::Enter => {
                self.row += 1;
                self.set_col(0);
                self.shift_cursor_wrap(prev_row, content, columns);
            }
            Key::Insert(text) => {
                self.set_col(self.col + text.chars().count());
                // The edited line's own wrap growth is accounted for in
                // the render pass; only the line above contributes here.
                if self.row > 0 {
                    self.cursor_wrap += wrap_of(content.line(self.row - 1), columns);
                }
            }
            _ => {}
        }

        // Sticky column: restore the cached column where the line allows
        self.row = self.row.min(content.line_count() - 1);
        self.col = self.col_cache.min(content.line_len(self.row));
    }

    /// Jump the cursor to an absolute position (search hits, not
    /// incremental moves): `cursor_wrap` is recomputed as a delta over
    /// every line crossed.
    pub fn jump_to(&mut self, target_row: usize, target_col: usize, content: &Content, columns: usize) {
        let prev_row = self.row;
        self.row = target_row.min(content.line_count() - 1);
        self.shift_cursor_wrap(prev_row, content, columns);
        self.set_col(target_col.min(content.line_len(self.row)));
    }

    /// Add/subtract the wrap of every line strictly between the previous
    /// and the current row; the sign follows the direction of travel.
    fn shift_cursor_wrap(&mut self, prev_row: usize, content: &Content, columns: usize) {
        if self.row < prev_row {
            for i in self.row..prev_row {
                self.cursor_wrap = self
                    .cursor_wrap
                    .saturating_sub(wrap_of(content.line(i), columns));
            }
        } else {
            for i in prev_row..self.row {
                self.cursor_wrap += wrap_of(content.line(i), columns);
            }
        }
    }

    // ---- scroll pass ----

    /// Update `scroll_top` and `hidden_wrap` so the new cursor position
    /// stays inside the window.
    pub fn scroll_for(&mut self, key: &Key, content: &Content, rows: usize, columns: usize) {
        match key {
            // Left/Right can leave the current line through the vertical
            // machinery, so they share the vertical scroll checks.
            Key::Down | Key::Right | Key::Delete | Key::Enter => {
                self.scroll_down(content, rows, columns)
            }
            Key::Up | Key::Left | Key::Backspace => self.scroll_up(content, columns),
            Key::PageDown => self.scroll_page_down(content, columns),
            Key::PageUp => self.scroll_page_up(content, rows, columns),
            Key::Find => self.scroll_find(content, columns),
            Key::Insert(_) => self.scroll_insert(content, rows, columns),
            _ => {}
        }
    }

    /// Whether the cursor's projected row (counting its line's full wrap)
    /// has fallen below the window.
    fn below_window(&self, content: &Content, rows: usize, columns: usize) -> bool {
        self.row + self.cursor_wrap + wrap_of(content.line(self.row), columns)
            > self.scroll_top + self.hidden_wrap + rows
    }

    /// Walk `scroll_top` forward until the cursor is back in view,
    /// absorbing the wrap of each line scrolled off into `hidden_wrap`.
    ///
    /// Absorbing a multi-row wrap arms the cooldown: the projection lags
    /// by the absorbed rows for a frame, and without the cooldown the next
    /// keystroke would scroll a second time for the same wrap. The
    /// cooldown decays on every call, so it only suppresses the frames
    /// immediately after the absorb and never a later genuine scroll.
    fn scroll_down(&mut self, content: &Content, rows: usize, columns: usize) {
        if self.hidden_wrap_cooldown > 0 {
            self.hidden_wrap_cooldown -= 1;
            if self.below_window(content, rows, columns) {
                return;
            }
        }

        let mut absorbed = 0;
        while self.below_window(content, rows, columns) {
            let next = (self.scroll_top + 1).min(content.line_count() - 1);
            if next == self.scroll_top {
                break;
            }
            let wrap = wrap_of(content.line(self.scroll_top), columns);
            self.hidden_wrap += wrap;
            absorbed += wrap;
            self.scroll_top = next;
        }
        if absorbed > 1 {
            self.hidden_wrap_cooldown = absorbed - 1;
        }
    }

    /// Single-step variant used after inserting a character: at most one
    /// line is scrolled off per keystroke.
    fn scroll_insert(&mut self, content: &Content, rows: usize, columns: usize) {
        if self.below_window(content, rows, columns) {
            let next = (self.scroll_top + 1).min(content.line_count() - 1);
            if next != self.scroll_top {
                self.hidden_wrap += wrap_of(content.line(self.scroll_top), columns);
                self.scroll_top = next;
            }
        }
    }

    fn scroll_up(&mut self, content: &Content, columns: usize) {
        if self.row < self.scroll_top {
            self.scroll_top = self.scroll_top.saturating_sub(1);
            self.hidden_wrap = self
                .hidden_wrap
                .saturating_sub(wrap_of(content.line(self.row), columns));
        }
    }

    /// Page-down jumps `scroll_top` straight to the cursor row, absorbing
    /// the wrap of every line in between.
    fn scroll_page_down(&mut self, content: &Content, columns: usize) {
        let mut added = 0;
        for i in self.scroll_top..self.row {
            added += wrap_of(content.line(i), columns);
        }
        self.hidden_wrap += added;
        self.scroll_top = self.row;
    }

    /// Page-up walks `scroll_top` backward, releasing hidden wrap, and
    /// stops one line early if the accumulated span would overflow the
    /// window.
    fn scroll_page_up(&mut self, content: &Content, rows: usize, columns: usize) {
        let mut released = 0i64;
        let start_wrap = wrap_of(content.line(self.scroll_top), columns) as i64;
        while self.scroll_top > 0 {
            self.scroll_top -= 1;
            released += wrap_of(content.line(self.scroll_top), columns) as i64;
            let span = self.row as i64 - self.scroll_top as i64 + 1 + start_wrap + released;
            if span > rows as i64 {
                released -= wrap_of(content.line(self.scroll_top), columns) as i64;
                self.scroll_top += 1;
                break;
            }
        }
        self.hidden_wrap = self.hidden_wrap.saturating_sub(released.max(0) as usize);
    }

    /// Search jumps reuse the page mechanics: forward hits scroll like
    /// page-down, backward hits release the hidden wrap between the
    /// cursor and the old window top.
    fn scroll_find(&mut self, content: &Content, columns: usize) {
        if self.scroll_top < self.row {
            self.scroll_page_down(content, columns);
        } else {
            let mut released = 0;
            for i in self.row..self.scroll_top {
                released += wrap_of(content.line(i), columns);
            }
            self.hidden_wrap = self.hidden_wrap.saturating_sub(released);
            self.scroll_top = self.row;
        }
    }

    // ---- frame bookkeeping (driven by the compositor) ----

    pub fn reset_page_wrap(&mut self) {
        self.page_wrap = 0;
    }

    pub fn add_page_wrap(&mut self, wrap: usize) {
        self.page_wrap += wrap;
    }
}

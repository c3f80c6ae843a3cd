//! Incremental, wraparound substring search
//!
//! Matches are reported as `(row, col)` with `col` a codepoint offset,
//! ready to hand to `Cursor::jump_to`. `find_next` scans from one past
//! (or before) the last match, wraps past either end of the document, and
//! terminates once the scan has come back around to the starting line
//! without a fresh hit.

use crate::content::Content;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Default)]
pub struct Search {
    query: String,
    match_found: bool,
    match_row: usize,
    match_col: usize,
}

/// Codepoint offset of a byte index within `s`
fn col_of_byte(s: &str, byte: usize) -> usize {
    s[..byte].chars().count()
}

impl Search {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn match_found(&self) -> bool {
        self.match_found
    }

    /// Scan from line 0 for the first line containing `query`.
    pub fn find_first(&mut self, query: &str, content: &Content) -> Option<(usize, usize)> {
        self.query = query.to_string();
        self.match_found = false;
        if query.is_empty() {
            return None;
        }
        for (row, line) in content.lines().iter().enumerate() {
            if let Some(byte) = line.find(query) {
                return Some(self.record(row, col_of_byte(line, byte)));
            }
        }
        None
    }

    /// Advance to the next match in `direction`, wrapping around the
    /// document. Returns the previous match again when it is the only
    /// occurrence, or `None` when the query no longer matches anywhere.
    pub fn find_next(&mut self, direction: Direction, content: &Content) -> Option<(usize, usize)> {
        if !self.match_found || self.query.is_empty() {
            return None;
        }
        match direction {
            Direction::Forward => self.next_forward(content),
            Direction::Backward => self.next_backward(content),
        }
    }

    fn next_forward(&mut self, content: &Content) -> Option<(usize, usize)> {
        let start_row = self.match_row.min(content.line_count() - 1);

        // Rest of the current line, one past the match
        let line = content.line(start_row);
        let from = content.byte_of(start_row, self.match_col + 1);
        if let Some(byte) = line[from..].find(&self.query) {
            return Some(self.record(start_row, col_of_byte(line, from + byte)));
        }

        // Following lines, wrapping past the end; the starting line is
        // revisited last, which is what terminates a single-match search
        // at its own position.
        let mut row = start_row;
        for _ in 0..content.line_count() {
            row = (row + 1) % content.line_count();
            let line = content.line(row);
            if let Some(byte) = line.find(&self.query) {
                return Some(self.record(row, col_of_byte(line, byte)));
            }
        }
        self.match_found = false;
        None
    }

    fn next_backward(&mut self, content: &Content) -> Option<(usize, usize)> {
        let start_row = self.match_row.min(content.line_count() - 1);

        // Prefix of the current line, strictly before the match
        let line = content.line(start_row);
        let until = content.byte_of(start_row, self.match_col);
        if let Some(byte) = line[..until].rfind(&self.query) {
            return Some(self.record(start_row, col_of_byte(line, byte)));
        }

        let mut row = start_row;
        for _ in 0..content.line_count() {
            row = if row == 0 {
                content.line_count() - 1
            } else {
                row - 1
            };
            let line = content.line(row);
            if let Some(byte) = line.rfind(&self.query) {
                return Some(self.record(row, col_of_byte(line, byte)));
            }
        }
        self.match_found = false;
        None
    }

    fn record(&mut self, row: usize, col: usize) -> (usize, usize) {
        self.match_found = true;
        self.match_row = row;
        self.match_col = col;
        (row, col)
    }
}

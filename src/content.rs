//! The content buffer: an ordered sequence of text lines
//!
//! Columns everywhere in the editor are codepoint offsets into a line,
//! never byte offsets and never rendered widths. `byte_of` is the single
//! translation point used when a line is actually spliced.

/// Ordered sequence of lines; at least one line always exists
/// (an empty document is one empty line).
#[derive(Debug, Clone)]
pub struct Content {
    lines: Vec<String>,
    modified: bool,
}

impl Content {
    /// Create an empty document (single empty line)
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            modified: false,
        }
    }

    /// Create a document from loaded lines
    pub fn from_lines(lines: Vec<String>) -> Self {
        let lines = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        };
        Self {
            lines,
            modified: false,
        }
    }

    /// Number of lines (always >= 1)
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line at `row`, clamped to the last line
    pub fn line(&self, row: usize) -> &str {
        let row = row.min(self.lines.len() - 1);
        &self.lines[row]
    }

    /// Codepoint count of the line at `row`
    pub fn line_len(&self, row: usize) -> usize {
        self.line(row).chars().count()
    }

    /// Byte offset of codepoint `col` within the line at `row`
    ///
    /// `col` past the end of the line maps to the line's byte length, so
    /// splicing at a clamped cursor column is always in bounds.
    pub fn byte_of(&self, row: usize, col: usize) -> usize {
        let line = self.line(row);
        line.char_indices()
            .nth(col)
            .map(|(idx, _)| idx)
            .unwrap_or(line.len())
    }

    /// All lines, for rendering and persistence
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replace the line at `row`
    pub fn replace_line(&mut self, row: usize, line: String) {
        let row = row.min(self.lines.len() - 1);
        self.lines[row] = line;
        self.modified = true;
    }

    /// Insert a new line at `row`, shifting subsequent lines down
    pub fn insert_line(&mut self, row: usize, line: String) {
        let row = row.min(self.lines.len());
        self.lines.insert(row, line);
        self.modified = true;
    }

    /// Remove and return the line at `row`; refuses to empty the document
    pub fn remove_line(&mut self, row: usize) -> String {
        if self.lines.len() == 1 {
            return std::mem::take(&mut self.lines[0]);
        }
        let row = row.min(self.lines.len() - 1);
        self.modified = true;
        self.lines.remove(row)
    }

    /// Has the content changed since load or the last save?
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Mark the content clean (after a successful save)
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::new()
    }
}

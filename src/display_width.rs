//! Codepoint display width measurement
//!
//! Wrap counts and cursor placement are computed from rendered column
//! widths, not codepoint counts: CJK and emoji occupy two columns,
//! combining marks occupy zero. `unicode-width` supplies the per-codepoint
//! measurement.

use unicode_width::UnicodeWidthChar;

/// Rendered column width of a single codepoint (0, 1 or 2)
#[inline]
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// Rendered column width of a whole string
#[inline]
pub fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Rendered column width of the first `count` codepoints of `s`
///
/// This is the display column of the cursor when it sits at codepoint
/// offset `count` - wide codepoints before the cursor push it further
/// right than its codepoint offset would suggest.
pub fn prefix_width(s: &str, count: usize) -> usize {
    s.chars().take(count).map(char_width).sum()
}

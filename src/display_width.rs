use unicode_width::UnicodeWidthChar;

/// Number of terminal columns `s` occupies when written cell by cell.
pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Columns taken by a single character. Zero-width and control characters
/// count as one so every character gets a cell of its own.
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1).max(1)
}

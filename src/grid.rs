use crate::display_width::char_width;

/// Marks the cell covered by the right half of a double-width character.
const CONTINUATION: char = '\0';

/// Fixed-size character buffer. Writes outside the buffer are dropped.
pub struct Grid {
    cells: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![vec![' '; width]; height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn set(&mut self, row: usize, col: usize, ch: char) {
        if row < self.height && col < self.width {
            // Overwriting half of a wide character blanks the other half.
            if self.cells[row][col] == CONTINUATION && col > 0 {
                self.cells[row][col - 1] = ' ';
            }
            if col + 1 < self.width && self.cells[row][col + 1] == CONTINUATION {
                self.cells[row][col + 1] = ' ';
            }
            self.cells[row][col] = ch;
        }
    }

    /// Signed variant of [`Grid::set`] for edge routing, where anchors may sit
    /// one cell past the top or left border.
    pub fn plot(&mut self, x: isize, y: isize, ch: char) {
        if let (Ok(col), Ok(row)) = (usize::try_from(x), usize::try_from(y)) {
            self.set(row, col, ch);
        }
    }

    pub fn write_str(&mut self, row: usize, col: usize, s: &str) {
        let mut offset = 0;
        for ch in s.chars() {
            let w = char_width(ch);
            self.set(row, col + offset, ch);
            for j in 1..w {
                self.set(row, col + offset + j, CONTINUATION);
            }
            offset += w;
        }
    }

    pub fn render(&self) -> String {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&ch| ch != CONTINUATION).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

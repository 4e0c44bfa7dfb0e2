//! Line/column positions derived from character offsets.
//!
//! Offsets count Unicode scalar values, not bytes. A line break is `\n`,
//! `\r\n`, or a lone `\r`. Lines are 1-based and columns 0-based.

use std::fmt;

/// A line/column location in a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// First character of a source.
    pub const START: Self = Self { line: 1, column: 0 };

    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Precomputed table of line starts, answering offset lookups in O(log lines).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        Self::from_chars(text.chars())
    }

    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        let mut line_starts = vec![0];
        let mut chars = chars.into_iter().peekable();
        let mut offset = 0;

        while let Some(c) = chars.next() {
            offset += 1;
            let is_break = match c {
                '\n' => true,
                '\r' => chars.peek() != Some(&'\n'),
                _ => false,
            };
            if is_break {
                line_starts.push(offset);
            }
        }

        Self {
            line_starts,
            len: offset,
        }
    }

    /// Length of the indexed text in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Offset of the first character of a 1-based line.
    pub fn line_start(&self, line: u32) -> Option<usize> {
        let idx = (line as usize).checked_sub(1)?;
        self.line_starts.get(idx).copied()
    }

    /// Position of `offset`, clamped to the end of the text.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert - 1,
        };
        Position {
            line: line as u32 + 1,
            column: (offset - self.line_starts[line]) as u32,
        }
    }

    /// [`LineIndex::position`] with each tab before `offset` on its line
    /// counting `tab_width` columns. `chars` is the indexed text.
    pub fn position_with_tabs(&self, chars: &[char], offset: usize, tab_width: u32) -> Position {
        let raw = self.position(offset);
        if tab_width <= 1 {
            return raw;
        }
        let end = offset.min(self.len);
        let start = end - raw.column as usize;
        let column = chars
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|&c| if c == '\t' { tab_width } else { 1 })
            .sum();
        Position::new(raw.line, column)
    }

    /// Inverse of [`LineIndex::position`]. Columns past the line end are rejected.
    pub fn offset(&self, position: Position) -> Option<usize> {
        let start = self.line_start(position.line)?;
        let end = self
            .line_start(position.line + 1)
            .unwrap_or(self.len);
        let offset = start + position.column as usize;
        (offset <= end).then_some(offset)
    }
}

//! Character buffer with look-ahead, recording and line/column tracking.

use regex_automata::meta::Regex;
use regex_automata::{Anchored, Input};
use tessera_core::{LineIndex, Position};

/// Rewrites the source text before it reaches the channels.
pub trait CodeFilter: Send {
    fn filter(&mut self, text: &str) -> String;
}

impl<F> CodeFilter for F
where
    F: FnMut(&str) -> String + Send,
{
    fn filter(&mut self, text: &str) -> String {
        self(text)
    }
}

/// Saved cursor state, restorable with [`CodeBuffer::restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    offset: usize,
    position: Position,
    recorded: Option<usize>,
}

impl Checkpoint {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

/// Input buffer consumed by lexer channels.
///
/// Offsets count characters. `\n`, `\r\n` and a lone `\r` each end a line;
/// a tab advances the column by the configured width.
pub struct CodeBuffer {
    chars: Vec<char>,
    text: String,
    /// Byte offset of every character, plus `text.len()` as a sentinel.
    byte_offsets: Vec<usize>,
    lines: LineIndex,
    offset: usize,
    position: Position,
    tab_width: u32,
    recording: Option<String>,
}

impl CodeBuffer {
    pub fn new(text: &str, tab_width: u32) -> Self {
        Self::from_string(text.to_owned(), tab_width)
    }

    /// Runs `filters` in order over `text`, then buffers the result.
    pub fn with_filters(text: &str, tab_width: u32, filters: &mut [Box<dyn CodeFilter>]) -> Self {
        let mut text = text.to_owned();
        for filter in filters.iter_mut() {
            text = filter.filter(&text);
        }
        Self::from_string(text, tab_width)
    }

    fn from_string(text: String, tab_width: u32) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut byte_offsets = Vec::with_capacity(text.len() + 1);
        for (byte, c) in text.char_indices() {
            chars.push(c);
            byte_offsets.push(byte);
        }
        byte_offsets.push(text.len());
        let lines = LineIndex::from_chars(chars.iter().copied());

        Self {
            chars,
            text,
            byte_offsets,
            lines,
            offset: 0,
            position: Position::START,
            tab_width: tab_width.max(1),
            recording: None,
        }
    }

    /// Consumes and returns the next character, `None` at end of input.
    pub fn pop(&mut self) -> Option<char> {
        let c = *self.chars.get(self.offset)?;
        self.offset += 1;
        self.advance_position(c);
        if let Some(recording) = &mut self.recording {
            recording.push(c);
        }
        Some(c)
    }

    /// Consumes up to `n` characters and returns how many were consumed.
    pub fn skip(&mut self, n: usize) -> usize {
        let mut count = 0;
        while count < n && self.pop().is_some() {
            count += 1;
        }
        count
    }

    /// Consumes `n` characters and returns them.
    pub fn take(&mut self, n: usize) -> String {
        let mut out = String::with_capacity(n);
        for _ in 0..n {
            match self.pop() {
                Some(c) => out.push(c),
                None => break,
            }
        }
        out
    }

    pub fn peek(&self) -> Option<char> {
        self.char_at(0)
    }

    /// Character `k` positions ahead of the cursor.
    pub fn char_at(&self, k: usize) -> Option<char> {
        self.chars.get(self.offset + k).copied()
    }

    /// Most recently consumed character.
    pub fn last_char(&self) -> Option<char> {
        let prev = self.offset.checked_sub(1)?;
        self.chars.get(prev).copied()
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        let mut k = 0;
        for expected in prefix.chars() {
            if self.char_at(k) != Some(expected) {
                return false;
            }
            k += 1;
        }
        true
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.chars.len()
    }

    /// Characters not yet consumed.
    pub fn rest(&self) -> &[char] {
        &self.chars[self.offset..]
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn column(&self) -> u32 {
        self.position.column
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Position of an arbitrary offset, with tabs expanded like the cursor
    /// does. Offsets past the end clamp to it.
    pub fn position_of(&self, offset: usize) -> Position {
        self.lines.position_with_tabs(&self.chars, offset, self.tab_width)
    }

    /// Starts collecting every popped character. Restarts if already active.
    pub fn start_recording(&mut self) {
        self.recording = Some(String::new());
    }

    /// Returns the characters popped since [`CodeBuffer::start_recording`].
    pub fn stop_recording(&mut self) -> String {
        self.recording.take().unwrap_or_default()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            offset: self.offset,
            position: self.position,
            recorded: self.recording.as_ref().map(String::len),
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.offset = checkpoint.offset;
        self.position = checkpoint.position;
        if let (Some(recording), Some(len)) = (&mut self.recording, checkpoint.recorded) {
            recording.truncate(len);
        }
    }

    /// Length in characters of an anchored match of `regex` at the cursor.
    pub fn match_regex(&self, regex: &Regex) -> Option<usize> {
        let start = self.byte_offsets[self.offset];
        let input = Input::new(&self.text)
            .range(start..)
            .anchored(Anchored::Yes);
        let found = regex.search(&input)?;
        let end = self.byte_offsets.binary_search(&found.end()).ok()?;
        Some(end - self.offset)
    }

    fn advance_position(&mut self, c: char) {
        let breaks = c == '\n' || (c == '\r' && self.peek() != Some('\n'));
        if breaks {
            self.position.line += 1;
            self.position.column = 0;
        } else if c == '\t' {
            self.position.column += self.tab_width;
        } else {
            self.position.column += 1;
        }
    }
}

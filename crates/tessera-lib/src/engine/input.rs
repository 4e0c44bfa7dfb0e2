use regex_automata::meta::Regex;
use regex_automata::{Anchored, Input as RegexInput};
use tessera_core::{LineIndex, Position};

use crate::syntax::{Token, TokenKind};

pub(crate) enum Input<'i> {
    Text(TextInput<'i>),
    Tokens(&'i [Token]),
}

impl Input<'_> {
    /// Whether a parse ending at `end` covers everything. A trailing `EOF`
    /// token may stay unconsumed.
    pub(crate) fn is_complete_at(&self, end: usize) -> bool {
        match self {
            Input::Text(text) => end == text.len(),
            Input::Tokens(tokens) => {
                end >= tokens.len() || (end + 1 == tokens.len() && tokens[end].is(TokenKind::EOF))
            }
        }
    }

    /// Character offset and position of an input index.
    pub(crate) fn locate(&self, index: usize) -> (usize, Position) {
        match self {
            Input::Text(text) => {
                let lines = LineIndex::from_chars(text.chars.iter().copied());
                (index, lines.position_with_tabs(&text.chars, index, text.tab_width))
            }
            Input::Tokens(tokens) => match (tokens.get(index), tokens.last()) {
                (Some(token), _) => (token.range().start().into(), token.position()),
                (None, Some(last)) => {
                    let width = last.original_text().chars().count() as u32;
                    let position = Position::new(last.line(), last.column() + width);
                    (last.range().end().into(), position)
                }
                (None, None) => (0, Position::START),
            },
        }
    }
}

/// Source text seen as characters, with byte offsets for regex matching.
pub(crate) struct TextInput<'i> {
    text: &'i str,
    chars: Vec<char>,
    /// Byte offset of every character, plus `text.len()` as a sentinel.
    byte_offsets: Vec<usize>,
    tab_width: u32,
}

impl<'i> TextInput<'i> {
    pub(crate) fn new(text: &'i str, tab_width: u32) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut byte_offsets = Vec::with_capacity(text.len() + 1);
        for (byte, c) in text.char_indices() {
            chars.push(c);
            byte_offsets.push(byte);
        }
        byte_offsets.push(text.len());
        Self {
            text,
            chars,
            byte_offsets,
            tab_width,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.chars.len()
    }

    pub(crate) fn starts_with(&self, pos: usize, expected: &[char]) -> bool {
        self.chars
            .get(pos..pos + expected.len())
            .is_some_and(|slice| slice == expected)
    }

    /// Length in characters of an anchored match at `pos`.
    pub(crate) fn match_regex(&self, pos: usize, regex: &Regex) -> Option<usize> {
        let start = *self.byte_offsets.get(pos)?;
        let input = RegexInput::new(self.text)
            .range(start..)
            .anchored(Anchored::Yes);
        let found = regex.search(&input)?;
        let end = self.byte_offsets.binary_search(&found.end()).ok()?;
        Some(end - pos)
    }
}

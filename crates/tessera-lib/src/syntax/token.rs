//! Tokens and the trivia attached to them.

use std::fmt;

use rowan::TextRange;
use serde::{Serialize, Serializer};
use tessera_core::{Position, SourceId};

use super::serialize_range;

/// Named token type.
///
/// The set is open: front ends declare their own kinds with
/// [`TokenKind::new`]. Two kinds are equal when their names are.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenKind(&'static str);

impl TokenKind {
    pub const IDENTIFIER: Self = Self("IDENTIFIER");
    pub const KEYWORD: Self = Self("KEYWORD");
    pub const NUMBER: Self = Self("NUMBER");
    pub const STRING: Self = Self("STRING");
    pub const CHARACTER: Self = Self("CHARACTER");
    pub const PUNCTUATOR: Self = Self("PUNCTUATOR");
    /// A `>` split off by right-angle-bracket disambiguation.
    pub const GT: Self = Self("GT");
    pub const COMMENT: Self = Self("COMMENT");
    pub const WHITESPACE: Self = Self("WHITESPACE");
    pub const SKIPPED_TEXT: Self = Self("SKIPPED_TEXT");
    pub const PREPROCESSOR: Self = Self("PREPROCESSOR");
    pub const UNKNOWN_CHAR: Self = Self("UNKNOWN_CHAR");
    pub const EOF: Self = Self("EOF");
    /// Lexerless terminal that was not wrapped in a typed token.
    pub const TOKEN: Self = Self("TOKEN");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriviaKind {
    Comment,
    SkippedText,
    /// A directive hidden from the grammar.
    Preprocessor,
}

impl TriviaKind {
    /// Kind given to tokens synthesized for trivia of this kind.
    pub fn token_kind(self) -> TokenKind {
        match self {
            TriviaKind::Comment => TokenKind::COMMENT,
            TriviaKind::SkippedText => TokenKind::SKIPPED_TEXT,
            TriviaKind::Preprocessor => TokenKind::PREPROCESSOR,
        }
    }
}

/// Non-semantic material carried by the token that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trivia {
    kind: TriviaKind,
    tokens: Vec<Token>,
}

impl Trivia {
    pub fn new(kind: TriviaKind, tokens: Vec<Token>) -> Self {
        Self { kind, tokens }
    }

    pub fn comment(token: Token) -> Self {
        Self::new(TriviaKind::Comment, vec![token])
    }

    pub fn skipped_text(token: Token) -> Self {
        Self::new(TriviaKind::SkippedText, vec![token])
    }

    pub fn preprocessor(token: Token) -> Self {
        Self::new(TriviaKind::Preprocessor, vec![token])
    }

    pub fn kind(&self) -> TriviaKind {
        self.kind
    }

    pub fn is_comment(&self) -> bool {
        self.kind == TriviaKind::Comment
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self) -> Option<&Token> {
        self.tokens.first()
    }

    /// Original source text covered by this trivia.
    pub fn text(&self) -> String {
        self.tokens.iter().map(Token::original_text).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    kind: TokenKind,
    text: String,
    #[serde(skip)]
    original_text: String,
    position: Position,
    #[serde(serialize_with = "serialize_range")]
    range: TextRange,
    #[serde(skip)]
    source: SourceId,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    synthetic: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    trivia: Vec<Trivia>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position, range: TextRange) -> Self {
        let text = text.into();
        Self {
            kind,
            original_text: text.clone(),
            text,
            position,
            range,
            source: SourceId::default(),
            synthetic: false,
            trivia: Vec::new(),
        }
    }

    /// Raw characters when `text` was normalized by a channel.
    pub fn with_original_text(mut self, original: impl Into<String>) -> Self {
        self.original_text = original.into();
        self
    }

    pub fn with_source(mut self, source: SourceId) -> Self {
        self.source = source;
        self
    }

    pub fn with_trivia(mut self, trivia: Vec<Trivia>) -> Self {
        self.trivia = trivia;
        self
    }

    /// Marks a token that does not come from the source text.
    pub fn into_synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
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

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    pub fn trivia(&self) -> &[Trivia] {
        &self.trivia
    }

    pub fn has_trivia(&self) -> bool {
        !self.trivia.is_empty()
    }

    /// Leading trivia followed by the token itself, as written in the source.
    pub fn full_text(&self) -> String {
        let mut out: String = self.trivia.iter().map(Trivia::text).collect();
        out.push_str(&self.original_text);
        out
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} at {}", self.kind, self.text, self.position)
    }
}

//! Destination for the tokens and trivia channels recognize.

use tessera_core::SourceId;

use crate::diagnostics::Diagnostics;
use crate::syntax::{Token, TokenKind, Trivia, text_range};

use super::buffer::Checkpoint;

/// Collects tokens in order, holding trivia until the next token arrives.
#[derive(Debug, Default)]
pub struct LexSink {
    tokens: Vec<Token>,
    pending_trivia: Vec<Trivia>,
    source: SourceId,
    diagnostics: Diagnostics,
}

impl LexSink {
    pub fn new(source: SourceId) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }

    /// Builds a token spanning from `start` to `end_offset`, stamped with this sink's source.
    pub fn token(
        &self,
        kind: TokenKind,
        text: impl Into<String>,
        start: Checkpoint,
        end_offset: usize,
    ) -> Token {
        Token::new(kind, text, start.position(), text_range(start.offset(), end_offset))
            .with_source(self.source)
    }

    /// Appends `token`, handing it every pending trivia.
    pub fn add_token(&mut self, token: Token) {
        let token = if self.pending_trivia.is_empty() {
            token
        } else {
            let mut trivia = std::mem::take(&mut self.pending_trivia);
            trivia.extend(token.trivia().iter().cloned());
            token.with_trivia(trivia)
        };
        self.tokens.push(token);
    }

    pub fn add_trivia(&mut self, trivia: Trivia) {
        self.pending_trivia.push(trivia);
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn last_token(&self) -> Option<&Token> {
        self.tokens.last()
    }

    pub fn pending_trivia(&self) -> &[Trivia] {
        &self.pending_trivia
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Tokens collected so far. Pending trivia is dropped.
    pub(crate) fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Adds the closing token, which takes any trailing trivia.
    pub(crate) fn finish(mut self, eof: Token) -> (Vec<Token>, Diagnostics) {
        self.add_token(eof);
        (self.tokens, self.diagnostics)
    }
}

//! Token-stream rewriting after channel lexing.
//!
//! Each [`Preprocessor`] sees the remaining tokens, `EOF` included, and
//! answers with a [`PreprocessorAction`]. The action is applied as:
//! 1. injected trivia goes to the pending trivia;
//! 2. consumed tokens are dropped, their trivia kept pending;
//! 3. injected tokens are appended, the first one taking the pending trivia;
//! 4. with nothing consumed, the current token is kept and the pass moves on.
//!
//! Neither consumed nor injected tokens are shown to the preprocessor again.

use crate::syntax::{Token, Trivia};

use super::sink::LexSink;

pub trait Preprocessor: Send {
    /// Clears per-file state. Called before each lexing run.
    fn init(&mut self) {}

    /// Decides what happens to `tokens[0]`. `tokens` is never empty.
    fn process(&mut self, tokens: &[Token]) -> PreprocessorAction;
}

/// Edit applied at the current token.
#[derive(Debug, Clone, Default)]
pub struct PreprocessorAction {
    consumed: usize,
    trivia: Vec<Trivia>,
    tokens: Vec<Token>,
}

impl PreprocessorAction {
    pub fn new(consumed: usize, trivia: Vec<Trivia>, tokens: Vec<Token>) -> Self {
        Self {
            consumed,
            trivia,
            tokens,
        }
    }

    /// Keeps the current token as is.
    pub fn keep() -> Self {
        Self::default()
    }

    /// Drops `count` tokens; their trivia moves to the next kept token.
    pub fn delete(count: usize) -> Self {
        Self::new(count, Vec::new(), Vec::new())
    }

    /// Drops `count` tokens and puts `tokens` in their place.
    pub fn replace(count: usize, tokens: Vec<Token>) -> Self {
        Self::new(count, Vec::new(), tokens)
    }

    /// Keeps the current token and prepends `trivia` to it.
    pub fn inject_trivia(trivia: Vec<Trivia>) -> Self {
        Self::new(0, trivia, Vec::new())
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn trivia(&self) -> &[Trivia] {
        &self.trivia
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// Runs one preprocessor over `tokens`.
///
/// Trivia still pending after the last token is dropped along with it.
pub(crate) fn preprocess(preprocessor: &mut dyn Preprocessor, tokens: Vec<Token>) -> Vec<Token> {
    let mut out = LexSink::default();
    let mut i = 0;

    while i < tokens.len() {
        let action = preprocessor.process(&tokens[i..]);
        for trivia in action.trivia {
            out.add_trivia(trivia);
        }

        let consumed = action.consumed.min(tokens.len() - i);
        for removed in &tokens[i..i + consumed] {
            for trivia in removed.trivia() {
                out.add_trivia(trivia.clone());
            }
        }
        i += consumed;

        for token in action.tokens {
            out.add_token(token);
        }

        if action.consumed == 0 {
            out.add_token(tokens[i].clone());
            i += 1;
        }
    }
    out.into_tokens()
}

//! Tokens, trivia and the typed syntax tree.
//!
//! Tokens come out of the [lexer](crate::lexer) or out of lexerless parse
//! trees. [`AstBuilder`] turns a successful parse into an [`AstNode`] tree and
//! [`AstWalker`] delivers it to subscribed visitors.

mod ast;
mod builder;
mod printer;
mod token;
mod walker;

use rowan::{TextRange, TextSize};
use serde::{Serialize, Serializer};

pub use ast::{AstNode, Descendants, NodeType};
pub use builder::AstBuilder;
pub use printer::{AstPrinter, dump_tokens};
pub use token::{Token, TokenKind, Trivia, TriviaKind};
pub use walker::{AstVisitor, AstWalker};

#[cfg(test)]
mod ast_tests;
#[cfg(test)]
mod walker_tests;

/// Character-offset range `[start, end)`.
pub(crate) fn text_range(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32))
}

#[derive(Serialize)]
struct Span {
    start: u32,
    end: u32,
}

pub(crate) fn serialize_range<S: Serializer>(range: &TextRange, s: S) -> Result<S::Ok, S::Error> {
    Span {
        start: range.start().into(),
        end: range.end().into(),
    }
    .serialize(s)
}

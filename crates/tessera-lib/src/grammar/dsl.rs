//! Combinator functions for writing grammars.
//!
//! ```
//! use tessera_lib::grammar::dsl::*;
//!
//! let list = seq([lit("("), optional(rule("items")), lit(")")]);
//! # let _ = list;
//! ```

use crate::syntax::{TokenKind, TriviaKind};

use super::expr::Expr;

pub fn lit(text: impl Into<String>) -> Expr {
    Expr::Literal(text.into())
}

pub fn rule(key: &'static str) -> Expr {
    Expr::RuleRef(key)
}

pub fn regexp(pattern: impl Into<String>) -> Expr {
    Expr::Pattern(pattern.into())
}

pub fn seq(items: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Sequence(items.into_iter().collect())
}

pub fn first_of(alternatives: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::OrderedChoice(alternatives.into_iter().collect())
}

pub fn optional(e: impl Into<Expr>) -> Expr {
    Expr::Optional(Box::new(e.into()))
}

pub fn zero_or_more(e: impl Into<Expr>) -> Expr {
    Expr::ZeroOrMore(Box::new(e.into()))
}

pub fn one_or_more(e: impl Into<Expr>) -> Expr {
    Expr::OneOrMore(Box::new(e.into()))
}

/// Succeeds if `e` matches here, consuming nothing.
pub fn next(e: impl Into<Expr>) -> Expr {
    Expr::Lookahead(Box::new(e.into()))
}

/// Succeeds if `e` does not match here, consuming nothing.
pub fn next_not(e: impl Into<Expr>) -> Expr {
    Expr::NegativeLookahead(Box::new(e.into()))
}

/// Always fails.
pub fn nothing() -> Expr {
    Expr::Fail
}

pub fn end_of_input() -> Expr {
    Expr::EndOfInput
}

pub fn token(kind: TokenKind, e: impl Into<Expr>) -> Expr {
    Expr::TokenWrap(kind, Box::new(e.into()))
}

pub fn comment_trivia(e: impl Into<Expr>) -> Expr {
    Expr::TriviaWrap(TriviaKind::Comment, Box::new(e.into()))
}

pub fn skipped_trivia(e: impl Into<Expr>) -> Expr {
    Expr::TriviaWrap(TriviaKind::SkippedText, Box::new(e.into()))
}

pub fn token_kind(kind: TokenKind) -> Expr {
    Expr::TokenOfKind(kind)
}

pub fn is_one_of_them(kinds: impl IntoIterator<Item = TokenKind>) -> Expr {
    Expr::TokenOfKinds(kinds.into_iter().collect())
}

pub fn any_token() -> Expr {
    Expr::AnyToken
}

pub fn any_token_but_not(e: impl Into<Expr>) -> Expr {
    seq([next_not(e), any_token()])
}

/// `e`, starting right where the previous token ended.
pub fn adjacent(e: impl Into<Expr>) -> Expr {
    seq([Expr::Adjacent, e.into()])
}

pub fn bridge(from: TokenKind, to: TokenKind) -> Expr {
    Expr::Bridge(from, to)
}

pub fn till_new_line() -> Expr {
    Expr::TillNewLine
}

/// Any tokens up to and including `e`.
pub fn till(e: impl Into<Expr>) -> Expr {
    let e = e.into();
    seq([zero_or_more(any_token_but_not(e.clone())), e])
}

/// Any tokens up to, not including, the first of `stops`.
pub fn exclusive_till(stops: impl IntoIterator<Item = Expr>) -> Expr {
    zero_or_more(any_token_but_not(first_of(stops)))
}

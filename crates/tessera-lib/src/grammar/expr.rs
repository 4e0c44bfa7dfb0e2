//! Parsing expressions as written by grammar authors.

use std::fmt;

use crate::syntax::{TokenKind, TriviaKind};

/// What a grammar matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarMode {
    /// Characters of the source text.
    Lexerless,
    /// Tokens produced by a [`Lexer`](crate::lexer::Lexer).
    Lexerful,
}

impl fmt::Display for GrammarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarMode::Lexerless => f.write_str("lexerless"),
            GrammarMode::Lexerful => f.write_str("lexerful"),
        }
    }
}

/// A parsing expression. Rule references stay symbolic until the grammar is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Exact characters; in token mode, exact token text.
    Literal(String),
    /// Regular expression anchored at the current position. Lexerless only.
    Pattern(String),
    RuleRef(&'static str),
    Sequence(Vec<Expr>),
    OrderedChoice(Vec<Expr>),
    Optional(Box<Expr>),
    ZeroOrMore(Box<Expr>),
    OneOrMore(Box<Expr>),
    Lookahead(Box<Expr>),
    NegativeLookahead(Box<Expr>),
    /// Groups the match into one token of the given kind. Lexerless only.
    TokenWrap(TokenKind, Box<Expr>),
    /// Turns the match into trivia. Lexerless only.
    TriviaWrap(TriviaKind, Box<Expr>),
    Fail,
    EndOfInput,
    /// The next token has this kind. Lexerful only.
    TokenOfKind(TokenKind),
    TokenOfKinds(Vec<TokenKind>),
    AnyToken,
    /// Remaining tokens on the line of the previous token.
    TillNewLine,
    /// The next token starts where the previous one ended.
    Adjacent,
    /// Balanced run from an opening to a closing kind.
    Bridge(TokenKind, TokenKind),
}

impl Expr {
    /// Short label used in errors.
    pub fn label(&self) -> &'static str {
        match self {
            Expr::Literal(_) => "a literal",
            Expr::Pattern(_) => "a pattern",
            Expr::RuleRef(_) => "a rule reference",
            Expr::Sequence(_) => "a sequence",
            Expr::OrderedChoice(_) => "an ordered choice",
            Expr::Optional(_) => "an optional",
            Expr::ZeroOrMore(_) => "zero-or-more",
            Expr::OneOrMore(_) => "one-or-more",
            Expr::Lookahead(_) => "a lookahead",
            Expr::NegativeLookahead(_) => "a negative lookahead",
            Expr::TokenWrap(..) => "a token wrapper",
            Expr::TriviaWrap(..) => "a trivia wrapper",
            Expr::Fail => "nothing",
            Expr::EndOfInput => "end of input",
            Expr::TokenOfKind(_) | Expr::TokenOfKinds(_) => "a token kind",
            Expr::AnyToken => "any token",
            Expr::TillNewLine => "till new line",
            Expr::Adjacent => "adjacent",
            Expr::Bridge(..) => "a bridge",
        }
    }

    /// Whether `mode` can evaluate this node (children not inspected).
    pub fn supported_in(&self, mode: GrammarMode) -> bool {
        match self {
            Expr::Pattern(_) | Expr::TokenWrap(..) | Expr::TriviaWrap(..) => {
                mode == GrammarMode::Lexerless
            }
            Expr::TokenOfKind(_)
            | Expr::TokenOfKinds(_)
            | Expr::AnyToken
            | Expr::TillNewLine
            | Expr::Adjacent
            | Expr::Bridge(..) => mode == GrammarMode::Lexerful,
            _ => true,
        }
    }

    /// Direct sub-expressions.
    pub fn children(&self) -> &[Expr] {
        match self {
            Expr::Sequence(items) | Expr::OrderedChoice(items) => items,
            Expr::Optional(inner)
            | Expr::ZeroOrMore(inner)
            | Expr::OneOrMore(inner)
            | Expr::Lookahead(inner)
            | Expr::NegativeLookahead(inner)
            | Expr::TokenWrap(_, inner)
            | Expr::TriviaWrap(_, inner) => std::slice::from_ref(inner.as_ref()),
            _ => &[],
        }
    }
}

impl From<&str> for Expr {
    fn from(text: &str) -> Self {
        Expr::Literal(text.to_owned())
    }
}

impl From<String> for Expr {
    fn from(text: String) -> Self {
        Expr::Literal(text)
    }
}

impl From<char> for Expr {
    fn from(c: char) -> Self {
        Expr::Literal(c.to_string())
    }
}

impl From<TokenKind> for Expr {
    fn from(kind: TokenKind) -> Self {
        Expr::TokenOfKind(kind)
    }
}

//! Tessera: channel lexers, PEG grammars and full-fidelity syntax trees.
//!
//! # Example
//!
//! ```
//! use tessera_lib::grammar::GrammarBuilder;
//! use tessera_lib::grammar::dsl::*;
//! use tessera_lib::syntax::{AstBuilder, TokenKind};
//!
//! let mut g = GrammarBuilder::lexerless();
//! g.rule("sum")
//!     .is(seq([rule("num"), zero_or_more(seq([lit("+"), rule("num")])), end_of_input()]))?;
//! g.rule("num").is(token(TokenKind::NUMBER, regexp("[0-9]+")))?;
//! g.set_root_rule("sum");
//! let grammar = g.build()?;
//!
//! let result = grammar.parser().parse_text("1+22")?;
//! let ast = AstBuilder::new(&grammar).build_text("1+22", &result).expect("input matched");
//! assert_eq!(ast.source_text(), "1+22");
//! # Ok::<(), tessera_lib::Error>(())
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod grammar;
pub mod lexer;
pub mod syntax;

use tessera_core::Position;

pub use config::{LexerConfig, ParserConfig, UnrecognizedCharPolicy};
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use grammar::GrammarError;

/// Result type for passes that produce both output and diagnostics.
///
/// Fatal errors use the outer `Result`; recoverable findings travel in
/// [`Diagnostics`] next to the output.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

/// Fatal errors raised while building grammars, lexing or parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    /// Strict lexing met a character no channel accepts.
    #[error("None of the channels could handle character {ch:?} at {position}")]
    UnrecognizedCharacter {
        ch: char,
        offset: usize,
        position: Position,
    },

    /// A rule re-entered itself without consuming input.
    #[error("Left recursion has been detected, involved rule: {rule}")]
    LeftRecursion { rule: &'static str, offset: usize },

    /// A lexer pattern failed to compile.
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Text handed to a token grammar, or tokens to a character grammar.
    #[error("a {mode} grammar cannot parse {input}")]
    InputMismatch {
        mode: grammar::GrammarMode,
        input: &'static str,
    },

    /// Execution fuel exhausted (too many matcher steps).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (rules nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("cannot read {path}: {message}")]
    Io { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

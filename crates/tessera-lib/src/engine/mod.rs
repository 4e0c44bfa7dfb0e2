//! Executes a compiled [`Grammar`] against text or tokens.
//!
//! Each parse runs in a fresh machine: the memo table, the left-recursion
//! guard and the furthest-failure record live only for that call. The result
//! is a [`ParsingResult`] holding the parse tree, or the failure with the
//! furthest index reached and what was expected there.

mod failure;
mod input;
mod invariants;
mod machine;
mod parse_tree;
mod trace;

#[cfg(test)]
mod trace_tests;

use std::rc::Rc;

use crate::config::ParserConfig;
use crate::grammar::{Grammar, GrammarMode};
use crate::syntax::Token;
use crate::{Error, Result};

pub use failure::{Expectation, ParseFailure};
pub use parse_tree::{NodeKind, ParseNode};
pub use trace::{NoopTracer, PrintTracer, Tracer};

use input::{Input, TextInput};
use machine::Machine;

/// Runs one grammar; cheap to create, holds no per-parse state.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'g> {
    grammar: &'g Grammar,
    config: ParserConfig,
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            config: ParserConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.config = self.config.with_exec_fuel(limit);
        self
    }

    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.config = self.config.with_recursion_fuel(limit);
        self
    }

    pub fn with_tab_width(mut self, width: u32) -> Self {
        self.config = self.config.with_tab_width(width);
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Parses characters with a lexerless grammar.
    pub fn parse_text(&self, text: &str) -> Result<ParsingResult> {
        self.parse_text_traced(text, &mut NoopTracer)
    }

    pub fn parse_text_traced<T: Tracer>(&self, text: &str, tracer: &mut T) -> Result<ParsingResult> {
        self.ensure_mode(GrammarMode::Lexerless, "text")?;
        let input = Input::Text(TextInput::new(text, self.config.tab_width()));
        Machine::new(self.grammar, input, self.config, tracer).run()
    }

    /// Parses lexer output with a lexerful grammar.
    pub fn parse_tokens(&self, tokens: &[Token]) -> Result<ParsingResult> {
        self.parse_tokens_traced(tokens, &mut NoopTracer)
    }

    pub fn parse_tokens_traced<T: Tracer>(
        &self,
        tokens: &[Token],
        tracer: &mut T,
    ) -> Result<ParsingResult> {
        self.ensure_mode(GrammarMode::Lexerful, "tokens")?;
        Machine::new(self.grammar, Input::Tokens(tokens), self.config, tracer).run()
    }

    fn ensure_mode(&self, expected: GrammarMode, input: &'static str) -> Result<()> {
        let mode = self.grammar.mode();
        if mode != expected {
            return Err(Error::InputMismatch { mode, input });
        }
        Ok(())
    }
}

/// Outcome of one parse.
///
/// A match that stops short of the end of input keeps its tree as
/// [`ParsingResult::root`] and still reports a failure.
#[derive(Debug, Clone)]
pub struct ParsingResult {
    root: Option<Rc<ParseNode>>,
    failure: Option<ParseFailure>,
}

impl ParsingResult {
    pub(crate) fn new(root: Option<Rc<ParseNode>>, failure: Option<ParseFailure>) -> Self {
        Self { root, failure }
    }

    /// Whether the root rule matched the whole input.
    pub fn is_match(&self) -> bool {
        self.failure.is_none() && self.root.is_some()
    }

    pub fn root(&self) -> Option<&ParseNode> {
        self.root.as_deref()
    }

    pub fn failure(&self) -> Option<&ParseFailure> {
        self.failure.as_ref()
    }
}

//! Grammar construction: named parsing-expression rules, validated and
//! compiled into an immutable [`Grammar`].
//!
//! Rules refer to each other by key. [`GrammarBuilder::build`] allocates one
//! [`RuleId`] per declared key, resolves references, checks that every
//! expression is supported by the grammar's mode, compiles patterns and
//! rejects repetitions that could loop without consuming input.

mod builder;
mod compiled;
pub mod dsl;
mod expr;
mod validate;

#[cfg(test)]
mod validate_tests;

pub use builder::{GrammarBuilder, RuleBuilder, SkipPolicy};
pub use compiled::{CompiledRule, Grammar, RuleId};
pub use expr::{Expr, GrammarMode};

pub(crate) use compiled::Matcher;

/// Errors raised while building a grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("The rule '{0}' hasn't been defined.")]
    UndefinedRule(&'static str),

    #[error("The rule '{0}' has already been defined somewhere in the grammar.")]
    DuplicateDefinition(&'static str),

    #[error("No root rule has been set.")]
    MissingRootRule,

    #[error("The rule '{rule}' uses an invalid pattern {pattern:?}: {message}")]
    InvalidPattern {
        rule: &'static str,
        pattern: String,
        message: String,
    },

    #[error("The rule '{rule}' uses {expr}, which a {mode} grammar does not support.")]
    UnsupportedExpression {
        rule: &'static str,
        expr: &'static str,
        mode: GrammarMode,
    },

    /// A repetition wraps an expression that can succeed without consuming.
    #[error("The rule '{rule}' repeats an expression that can match empty input.")]
    NullableRepetition { rule: &'static str },
}

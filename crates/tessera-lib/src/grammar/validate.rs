//! Reference resolution, mode checks and the nullability analysis.

use indexmap::IndexMap;
use regex_automata::meta::Regex;

use super::GrammarError;
use super::compiled::{Matcher, RuleId};
use super::expr::{Expr, GrammarMode};

/// Lowers the expression of one rule into a [`Matcher`].
pub(crate) struct Lowering<'a> {
    mode: GrammarMode,
    ids: &'a IndexMap<&'static str, RuleId>,
    rule: &'static str,
}

impl<'a> Lowering<'a> {
    pub(crate) fn new(
        mode: GrammarMode,
        ids: &'a IndexMap<&'static str, RuleId>,
        rule: &'static str,
    ) -> Self {
        Self { mode, ids, rule }
    }

    pub(crate) fn lower(&self, expr: &Expr) -> Result<Matcher, GrammarError> {
        if !expr.supported_in(self.mode) {
            return Err(GrammarError::UnsupportedExpression {
                rule: self.rule,
                expr: expr.label(),
                mode: self.mode,
            });
        }

        let matcher = match expr {
            Expr::Literal(text) => Matcher::Literal {
                chars: text.chars().collect(),
                text: text.as_str().into(),
            },
            Expr::Pattern(pattern) => Matcher::Pattern {
                regex: Regex::new(pattern).map_err(|err| GrammarError::InvalidPattern {
                    rule: self.rule,
                    pattern: pattern.clone(),
                    message: err.to_string(),
                })?,
                source: pattern.as_str().into(),
            },
            Expr::RuleRef(key) => {
                let id = self.ids.get(key).ok_or(GrammarError::UndefinedRule(*key))?;
                Matcher::Rule(*id)
            }
            Expr::Sequence(items) => Matcher::Sequence(self.lower_all(items)?),
            Expr::OrderedChoice(items) => Matcher::FirstOf(self.lower_all(items)?),
            Expr::Optional(inner) => Matcher::Optional(self.lower_boxed(inner)?),
            Expr::ZeroOrMore(inner) => Matcher::ZeroOrMore(self.lower_boxed(inner)?),
            Expr::OneOrMore(inner) => Matcher::OneOrMore(self.lower_boxed(inner)?),
            Expr::Lookahead(inner) => Matcher::Next(self.lower_boxed(inner)?),
            Expr::NegativeLookahead(inner) => Matcher::NextNot(self.lower_boxed(inner)?),
            Expr::TokenWrap(kind, inner) => Matcher::Token(*kind, self.lower_boxed(inner)?),
            Expr::TriviaWrap(kind, inner) => Matcher::Trivia(*kind, self.lower_boxed(inner)?),
            Expr::Fail => Matcher::Fail,
            Expr::EndOfInput => Matcher::EndOfInput,
            Expr::TokenOfKind(kind) => Matcher::TokenOfKind(*kind),
            Expr::TokenOfKinds(kinds) => Matcher::TokenOfKinds(kinds.clone()),
            Expr::AnyToken => Matcher::AnyToken,
            Expr::TillNewLine => Matcher::TillNewLine,
            Expr::Adjacent => Matcher::Adjacent,
            Expr::Bridge(from, to) => Matcher::Bridge(*from, *to),
        };
        Ok(matcher)
    }

    fn lower_all(&self, items: &[Expr]) -> Result<Vec<Matcher>, GrammarError> {
        items.iter().map(|item| self.lower(item)).collect()
    }

    fn lower_boxed(&self, inner: &Expr) -> Result<Box<Matcher>, GrammarError> {
        self.lower(inner).map(Box::new)
    }
}

/// Rejects `ZeroOrMore`/`OneOrMore` over expressions that can match empty.
///
/// Rule nullability is computed as a fixed point: rules start non-nullable
/// and are re-evaluated until nothing changes.
pub(crate) fn check_repetitions(rules: &IndexMap<&'static str, &Expr>) -> Result<(), GrammarError> {
    let mut nullable: IndexMap<&'static str, bool> =
        rules.keys().map(|&key| (key, false)).collect();

    loop {
        let mut changed = false;
        for (&key, expr) in rules {
            if !nullable[key] && is_nullable(expr, &nullable) {
                nullable[key] = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    for (&key, expr) in rules {
        if has_nullable_repetition(expr, &nullable) {
            return Err(GrammarError::NullableRepetition { rule: key });
        }
    }
    Ok(())
}

fn is_nullable(expr: &Expr, rules: &IndexMap<&'static str, bool>) -> bool {
    match expr {
        Expr::Literal(text) => text.is_empty(),
        Expr::Pattern(pattern) => pattern_is_nullable(pattern),
        Expr::RuleRef(key) => rules.get(key).copied().unwrap_or(false),
        Expr::Sequence(items) => items.iter().all(|e| is_nullable(e, rules)),
        Expr::OrderedChoice(items) => items.iter().any(|e| is_nullable(e, rules)),
        Expr::OneOrMore(inner) | Expr::TokenWrap(_, inner) | Expr::TriviaWrap(_, inner) => {
            is_nullable(inner, rules)
        }
        Expr::Optional(_)
        | Expr::ZeroOrMore(_)
        | Expr::Lookahead(_)
        | Expr::NegativeLookahead(_)
        | Expr::EndOfInput
        | Expr::TillNewLine
        | Expr::Adjacent => true,
        Expr::Fail
        | Expr::TokenOfKind(_)
        | Expr::TokenOfKinds(_)
        | Expr::AnyToken
        | Expr::Bridge(..) => false,
    }
}

fn pattern_is_nullable(pattern: &str) -> bool {
    regex_syntax::parse(pattern)
        .map(|hir| hir.properties().minimum_len() == Some(0))
        .unwrap_or(false)
}

fn has_nullable_repetition(expr: &Expr, rules: &IndexMap<&'static str, bool>) -> bool {
    if let Expr::ZeroOrMore(inner) | Expr::OneOrMore(inner) = expr
        && is_nullable(inner, rules)
    {
        return true;
    }
    expr.children()
        .iter()
        .any(|child| has_nullable_repetition(child, rules))
}

//! Recursive evaluation of matchers with packrat memoization.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::config::ParserConfig;
use crate::grammar::{Grammar, Matcher, RuleId};
use crate::syntax::{Token, TokenKind};
use crate::{Error, Result};

use super::ParsingResult;
use super::failure::{Expectation, FailureRecord, ParseFailure};
use super::input::Input;
use super::invariants::assert_children_within;
use super::parse_tree::{NodeKind, ParseNode};
use super::trace::Tracer;

type Nodes = Vec<Rc<ParseNode>>;

/// Per-parse state. Dropped when the parse returns.
pub(super) struct Machine<'a, T: Tracer> {
    grammar: &'a Grammar,
    input: Input<'a>,
    tracer: &'a mut T,
    memo: HashMap<(RuleId, usize), Option<Rc<ParseNode>>>,
    /// Rule calls in progress, for left-recursion detection.
    active: HashSet<(RuleId, usize)>,
    failure: FailureRecord,
    /// Depth of negative lookaheads; failures inside them are not recorded.
    silenced: u32,
    exec_fuel: Option<u32>,
    recursion_fuel: Option<u32>,
}

impl<'a, T: Tracer> Machine<'a, T> {
    pub(super) fn new(
        grammar: &'a Grammar,
        input: Input<'a>,
        config: ParserConfig,
        tracer: &'a mut T,
    ) -> Self {
        Self {
            grammar,
            input,
            tracer,
            memo: HashMap::new(),
            active: HashSet::new(),
            failure: FailureRecord::default(),
            silenced: 0,
            exec_fuel: config.exec_fuel(),
            recursion_fuel: config.recursion_fuel(),
        }
    }

    pub(super) fn run(mut self) -> Result<ParsingResult> {
        let mut out = Vec::new();
        let end = self.call(self.grammar.root(), 0, &mut out)?;
        let root = out.pop();

        match end {
            Some(end) if self.input.is_complete_at(end) => Ok(ParsingResult::new(root, None)),
            Some(end) => {
                self.failure.record(end, Expectation::EndOfInput);
                let failure = self.into_failure();
                Ok(ParsingResult::new(root, Some(failure)))
            }
            None => {
                let failure = self.into_failure();
                Ok(ParsingResult::new(None, Some(failure)))
            }
        }
    }

    fn into_failure(self) -> ParseFailure {
        let index = self.failure.index();
        let (offset, position) = self.input.locate(index);
        ParseFailure::new(index, offset, position, self.failure.into_expected())
    }

    fn call(&mut self, id: RuleId, pos: usize, out: &mut Nodes) -> Result<Option<usize>> {
        let grammar = self.grammar;
        let rule = grammar.rule(id);

        if rule.is_memoized()
            && let Some(entry) = self.memo.get(&(id, pos)).cloned()
        {
            let end = entry.as_ref().map(|node| node.end());
            self.tracer.trace_memo_hit(rule.key(), pos, end);
            out.extend(entry);
            return Ok(end);
        }

        if !self.active.insert((id, pos)) {
            return Err(Error::LeftRecursion {
                rule: rule.key(),
                offset: pos,
            });
        }
        self.enter_rule()?;
        self.tracer.trace_enter(rule.key(), pos);

        let mut children = Vec::new();
        let result = self.eval(&rule.matcher, pos, &mut children);

        self.active.remove(&(id, pos));
        self.leave_rule();
        let end = result?;
        self.tracer.trace_exit(rule.key(), pos, end);

        let node = end.map(|end| {
            assert_children_within(pos, end, &children);
            Rc::new(ParseNode::new(pos, end, NodeKind::Rule(id), children))
        });
        if rule.is_memoized() && self.silenced == 0 {
            self.memo.insert((id, pos), node.clone());
        }
        out.extend(node);
        Ok(end)
    }

    fn eval(&mut self, m: &'a Matcher, pos: usize, out: &mut Nodes) -> Result<Option<usize>> {
        self.tick()?;

        let end = match m {
            Matcher::Literal { chars, text } => self.literal(chars, text, pos, out),
            Matcher::Pattern { regex, source } => {
                let Input::Text(input) = &self.input else {
                    return Ok(None);
                };
                match input.match_regex(pos, regex) {
                    Some(len) => Some(push_terminal(out, pos, pos + len)),
                    None => self.expect(pos, Expectation::Pattern(source.to_string())),
                }
            }
            Matcher::Rule(id) => return self.call(*id, pos, out),
            Matcher::Sequence(items) => {
                let mark = out.len();
                let mut cur = pos;
                for item in items {
                    match self.eval(item, cur, out)? {
                        Some(next) => cur = next,
                        None => {
                            out.truncate(mark);
                            return Ok(None);
                        }
                    }
                }
                Some(cur)
            }
            Matcher::FirstOf(alternatives) => {
                let mark = out.len();
                for alternative in alternatives {
                    if let Some(end) = self.eval(alternative, pos, out)? {
                        return Ok(Some(end));
                    }
                    out.truncate(mark);
                }
                None
            }
            Matcher::Optional(inner) => {
                let mark = out.len();
                match self.eval(inner, pos, out)? {
                    Some(end) => Some(end),
                    None => {
                        out.truncate(mark);
                        Some(pos)
                    }
                }
            }
            Matcher::ZeroOrMore(inner) => Some(self.repeat(inner, pos, out)?),
            Matcher::OneOrMore(inner) => match self.eval(inner, pos, out)? {
                Some(first) if first == pos => Some(first),
                Some(first) => Some(self.repeat(inner, first, out)?),
                None => None,
            },
            Matcher::Next(inner) => {
                let mut scratch = Vec::new();
                self.eval(inner, pos, &mut scratch)?.map(|_| pos)
            }
            Matcher::NextNot(inner) => {
                let mut scratch = Vec::new();
                self.silenced += 1;
                let result = self.eval(inner, pos, &mut scratch);
                self.silenced -= 1;
                match result? {
                    Some(_) => None,
                    None => Some(pos),
                }
            }
            Matcher::Token(kind, inner) => self.wrap(inner, pos, NodeKind::Token(*kind), out)?,
            Matcher::Trivia(kind, inner) => self.wrap(inner, pos, NodeKind::Trivia(*kind), out)?,
            Matcher::Fail => {
                self.reach(pos);
                None
            }
            Matcher::EndOfInput => {
                let at_end = match &self.input {
                    Input::Text(text) => pos == text.len(),
                    Input::Tokens(tokens) => tokens.get(pos).is_none_or(|t| t.is(TokenKind::EOF)),
                };
                if at_end {
                    Some(pos)
                } else {
                    self.expect(pos, Expectation::EndOfInput)
                }
            }
            Matcher::TokenOfKind(kind) => match self.token_at(pos) {
                Some(token) if token.is(*kind) => Some(push_terminal(out, pos, pos + 1)),
                _ => self.expect(pos, Expectation::Kind(*kind)),
            },
            Matcher::TokenOfKinds(kinds) => match self.token_at(pos) {
                Some(token) if kinds.contains(&token.kind()) => {
                    Some(push_terminal(out, pos, pos + 1))
                }
                _ => {
                    for kind in kinds {
                        self.expect(pos, Expectation::Kind(*kind));
                    }
                    None
                }
            },
            Matcher::AnyToken => match self.token_at(pos) {
                Some(token) if !token.is(TokenKind::EOF) => Some(push_terminal(out, pos, pos + 1)),
                _ => self.expect(pos, Expectation::AnyToken),
            },
            Matcher::TillNewLine => Some(self.till_new_line(pos, out)),
            Matcher::Adjacent => {
                let prev = pos.checked_sub(1).and_then(|p| self.token_at(p));
                let adjacent = match (prev, self.token_at(pos)) {
                    (Some(prev), Some(next)) => prev.range().end() == next.range().start(),
                    _ => false,
                };
                if adjacent {
                    Some(pos)
                } else {
                    self.expect(pos, Expectation::Adjacent)
                }
            }
            Matcher::Bridge(from, to) => self.bridge(*from, *to, pos, out),
        };
        Ok(end)
    }

    fn literal(&mut self, chars: &[char], text: &str, pos: usize, out: &mut Nodes) -> Option<usize> {
        let len = match &self.input {
            Input::Text(input) => input.starts_with(pos, chars).then_some(chars.len()),
            Input::Tokens(tokens) => tokens
                .get(pos)
                .filter(|t| !t.is(TokenKind::EOF) && t.text() == text)
                .map(|_| 1),
        };
        match len {
            Some(0) => Some(pos),
            Some(len) => Some(push_terminal(out, pos, pos + len)),
            None => self.expect(pos, Expectation::Literal(text.to_owned())),
        }
    }

    /// Repeats `inner` from `pos` until it fails or stops making progress.
    fn repeat(&mut self, inner: &'a Matcher, pos: usize, out: &mut Nodes) -> Result<usize> {
        let mut cur = pos;
        loop {
            let mark = out.len();
            match self.eval(inner, cur, out)? {
                Some(next) if next > cur => cur = next,
                Some(_) => return Ok(cur),
                None => {
                    out.truncate(mark);
                    return Ok(cur);
                }
            }
        }
    }

    fn wrap(
        &mut self,
        inner: &'a Matcher,
        pos: usize,
        kind: NodeKind,
        out: &mut Nodes,
    ) -> Result<Option<usize>> {
        let mut scratch = Vec::new();
        let end = self.eval(inner, pos, &mut scratch)?;
        if let Some(end) = end {
            out.push(Rc::new(ParseNode::new(pos, end, kind, Vec::new())));
        }
        Ok(end)
    }

    /// Tokens up to the end of the line of the previous token. At the start
    /// of input the reference is line 1.
    fn till_new_line(&mut self, pos: usize, out: &mut Nodes) -> usize {
        let Some(tokens) = self.tokens() else {
            return pos;
        };
        let line = match pos.checked_sub(1) {
            Some(prev) => tokens.get(prev).map_or(1, Token::line),
            None => 1,
        };

        let mut end = pos;
        while let Some(token) = tokens.get(end) {
            if token.is(TokenKind::EOF) || token.line() != line {
                break;
            }
            end += 1;
        }
        if end > pos {
            push_terminal(out, pos, end);
        }
        end
    }

    /// A balanced run starting with `from` and closed by the matching `to`.
    fn bridge(&mut self, from: TokenKind, to: TokenKind, pos: usize, out: &mut Nodes) -> Option<usize> {
        let tokens = self.tokens()?;
        if !tokens.get(pos).is_some_and(|t| t.is(from)) {
            return self.expect(pos, Expectation::Kind(from));
        }

        let mut depth = 0usize;
        for (idx, token) in tokens.iter().enumerate().skip(pos) {
            if token.is(from) {
                depth += 1;
            } else if token.is(to) {
                depth -= 1;
                if depth == 0 {
                    return Some(push_terminal(out, pos, idx + 1));
                }
            }
        }
        self.expect(tokens.len(), Expectation::Kind(to))
    }

    fn tokens(&self) -> Option<&'a [Token]> {
        match self.input {
            Input::Tokens(tokens) => Some(tokens),
            Input::Text(_) => None,
        }
    }

    fn token_at(&self, idx: usize) -> Option<&'a Token> {
        self.tokens()?.get(idx)
    }

    /// Records a failed expectation and returns `None`.
    fn expect(&mut self, index: usize, expectation: Expectation) -> Option<usize> {
        if self.silenced == 0 {
            self.failure.record(index, expectation);
        }
        None
    }

    fn reach(&mut self, index: usize) {
        if self.silenced == 0 {
            self.failure.reach(index);
        }
    }

    fn tick(&mut self) -> Result<()> {
        if let Some(fuel) = &mut self.exec_fuel {
            if *fuel == 0 {
                return Err(Error::ExecFuelExhausted);
            }
            *fuel -= 1;
        }
        Ok(())
    }

    fn enter_rule(&mut self) -> Result<()> {
        if let Some(fuel) = &mut self.recursion_fuel {
            if *fuel == 0 {
                return Err(Error::RecursionLimitExceeded);
            }
            *fuel -= 1;
        }
        Ok(())
    }

    fn leave_rule(&mut self) {
        if let Some(fuel) = &mut self.recursion_fuel {
            *fuel += 1;
        }
    }
}

fn push_terminal(out: &mut Nodes, start: usize, end: usize) -> usize {
    out.push(Rc::new(ParseNode::terminal(start, end)));
    end
}


use indexmap::IndexMap;
use regex_automata::meta::Regex;

use crate::engine::Parser;
use crate::syntax::{TokenKind, TriviaKind};

use super::builder::SkipPolicy;
use super::expr::GrammarMode;

/// Index of a rule in its [`Grammar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(u32);

impl RuleId {
    pub(crate) fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Executable form of an expression; rule references are resolved.
#[derive(Debug, Clone)]
pub(crate) enum Matcher {
    Literal { chars: Box<[char]>, text: Box<str> },
    Pattern { regex: Regex, source: Box<str> },
    Rule(RuleId),
    Sequence(Vec<Matcher>),
    FirstOf(Vec<Matcher>),
    Optional(Box<Matcher>),
    ZeroOrMore(Box<Matcher>),
    OneOrMore(Box<Matcher>),
    Next(Box<Matcher>),
    NextNot(Box<Matcher>),
    Token(TokenKind, Box<Matcher>),
    Trivia(TriviaKind, Box<Matcher>),
    Fail,
    EndOfInput,
    TokenOfKind(TokenKind),
    TokenOfKinds(Vec<TokenKind>),
    AnyToken,
    TillNewLine,
    Adjacent,
    Bridge(TokenKind, TokenKind),
}

#[derive(Debug, Clone)]
pub struct CompiledRule {
    key: &'static str,
    pub(crate) matcher: Matcher,
    skip: SkipPolicy,
    memoize: bool,
}

impl CompiledRule {
    pub(crate) fn new(key: &'static str, matcher: Matcher, skip: SkipPolicy, memoize: bool) -> Self {
        Self {
            key,
            matcher,
            skip,
            memoize,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn skip(&self) -> SkipPolicy {
        self.skip
    }

    pub fn is_memoized(&self) -> bool {
        self.memoize
    }
}

/// Immutable compiled grammar, shareable across threads.
#[derive(Debug, Clone)]
pub struct Grammar {
    mode: GrammarMode,
    rules: Vec<CompiledRule>,
    ids: IndexMap<&'static str, RuleId>,
    root: RuleId,
}

impl Grammar {
    pub(crate) fn new(
        mode: GrammarMode,
        rules: Vec<CompiledRule>,
        ids: IndexMap<&'static str, RuleId>,
        root: RuleId,
    ) -> Self {
        Self {
            mode,
            rules,
            ids,
            root,
        }
    }

    pub fn mode(&self) -> GrammarMode {
        self.mode
    }

    pub fn root(&self) -> RuleId {
        self.root
    }

    pub fn rule(&self, id: RuleId) -> &CompiledRule {
        &self.rules[id.index()]
    }

    pub fn rule_id(&self, key: &str) -> Option<RuleId> {
        self.ids.get(key).copied()
    }

    pub fn rules(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// A parser over this grammar with the default configuration.
    pub fn parser(&self) -> Parser<'_> {
        Parser::new(self)
    }
}

use indexmap::IndexMap;

use super::GrammarError;
use super::compiled::{CompiledRule, Grammar, RuleId};
use super::expr::{Expr, GrammarMode};
use super::validate::{Lowering, check_repetitions};

/// How the syntax-tree builder treats nodes of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkipPolicy {
    /// The node is kept.
    #[default]
    Never,
    /// The node's children are spliced into its parent.
    Always,
    /// Spliced only when the node has exactly one child.
    IfOneChild,
}

#[derive(Debug, Clone, Default)]
struct RuleSlot {
    expr: Option<Expr>,
    skip: SkipPolicy,
    memoize: bool,
}

/// Collects rules by key, then compiles them into a [`Grammar`].
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    mode: GrammarMode,
    rules: IndexMap<&'static str, RuleSlot>,
    root: Option<&'static str>,
}

impl GrammarBuilder {
    /// A grammar over the characters of the source text.
    pub fn lexerless() -> Self {
        Self::new(GrammarMode::Lexerless)
    }

    /// A grammar over lexer tokens.
    pub fn lexerful() -> Self {
        Self::new(GrammarMode::Lexerful)
    }

    fn new(mode: GrammarMode) -> Self {
        Self {
            mode,
            rules: IndexMap::new(),
            root: None,
        }
    }

    pub fn mode(&self) -> GrammarMode {
        self.mode
    }

    /// Declares `key` if needed and returns a builder for it.
    pub fn rule(&mut self, key: &'static str) -> RuleBuilder<'_> {
        let slot = self.rules.entry(key).or_default();
        RuleBuilder { key, slot }
    }

    pub fn set_root_rule(&mut self, key: &'static str) -> &mut Self {
        self.root = Some(key);
        self
    }

    pub fn root_rule(&self) -> Option<&'static str> {
        self.root
    }

    pub fn build(&self) -> Result<Grammar, GrammarError> {
        self.compile(false)
    }

    /// Like [`GrammarBuilder::build`], with every rule memoized per position.
    pub fn build_with_memoization(&self) -> Result<Grammar, GrammarError> {
        self.compile(true)
    }

    fn compile(&self, memoize_all: bool) -> Result<Grammar, GrammarError> {
        let root = self.root.ok_or(GrammarError::MissingRootRule)?;

        let ids: IndexMap<&'static str, RuleId> = self
            .rules
            .keys()
            .enumerate()
            .map(|(idx, &key)| (key, RuleId::new(idx)))
            .collect();
        let root = *ids.get(root).ok_or(GrammarError::UndefinedRule(root))?;

        let mut exprs = IndexMap::with_capacity(self.rules.len());
        for (&key, slot) in &self.rules {
            let expr = slot.expr.as_ref().ok_or(GrammarError::UndefinedRule(key))?;
            exprs.insert(key, expr);
        }

        let mut rules = Vec::with_capacity(exprs.len());
        for (&key, slot) in &self.rules {
            let lowering = Lowering::new(self.mode, &ids, key);
            let matcher = lowering.lower(exprs[key])?;
            rules.push(CompiledRule::new(
                key,
                matcher,
                slot.skip,
                slot.memoize || memoize_all,
            ));
        }

        check_repetitions(&exprs)?;

        Ok(Grammar::new(self.mode, rules, ids, root))
    }
}

/// Builder scoped to one rule key.
pub struct RuleBuilder<'g> {
    key: &'static str,
    slot: &'g mut RuleSlot,
}

impl RuleBuilder<'_> {
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Sets the rule's expression. A rule can be defined once.
    pub fn is(self, expr: impl Into<Expr>) -> Result<Self, GrammarError> {
        if self.slot.expr.is_some() {
            return Err(GrammarError::DuplicateDefinition(self.key));
        }
        self.slot.expr = Some(expr.into());
        Ok(self)
    }

    /// Replaces the rule's expression, defined or not.
    pub fn override_with(self, expr: impl Into<Expr>) -> Self {
        self.slot.expr = Some(expr.into());
        self
    }

    /// Splices this rule's nodes into their parents in the syntax tree.
    pub fn skip(self) -> Self {
        self.slot.skip = SkipPolicy::Always;
        self
    }

    pub fn skip_if_one_child(self) -> Self {
        self.slot.skip = SkipPolicy::IfOneChild;
        self
    }

    pub fn memoize(self) -> Self {
        self.slot.memoize = true;
        self
    }
}

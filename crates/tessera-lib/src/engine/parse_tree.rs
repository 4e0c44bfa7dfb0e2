use std::fmt::Write;
use std::rc::Rc;

use crate::grammar::{Grammar, RuleId};
use crate::syntax::{TokenKind, TriviaKind};

/// What produced a parse node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Rule(RuleId),
    /// A literal, pattern or token atom match.
    Terminal,
    /// A `token(kind, e)` wrapper: one token over the whole span.
    Token(TokenKind),
    Trivia(TriviaKind),
}

/// Node of the raw parse tree. Spans are input indices: characters in
/// lexerless mode, tokens in lexerful mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNode {
    start: usize,
    end: usize,
    kind: NodeKind,
    children: Vec<Rc<ParseNode>>,
}

impl ParseNode {
    pub(crate) fn new(start: usize, end: usize, kind: NodeKind, children: Vec<Rc<ParseNode>>) -> Self {
        Self {
            start,
            end,
            kind,
            children,
        }
    }

    pub(crate) fn terminal(start: usize, end: usize) -> Self {
        Self::new(start, end, NodeKind::Terminal, Vec::new())
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn children(&self) -> impl ExactSizeIterator<Item = &ParseNode> {
        self.children.iter().map(Rc::as_ref)
    }

    pub fn rule(&self) -> Option<RuleId> {
        match self.kind {
            NodeKind::Rule(id) => Some(id),
            _ => None,
        }
    }

    /// Indented outline, one node per line.
    pub fn dump(&self, grammar: &Grammar) -> String {
        let mut out = String::new();
        self.format(grammar, 0, &mut out)
            .expect("String write never fails");
        out
    }

    fn format(&self, grammar: &Grammar, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        match self.kind {
            NodeKind::Rule(id) => write!(w, "{prefix}{}", grammar.rule(id).key())?,
            NodeKind::Terminal => write!(w, "{prefix}terminal")?,
            NodeKind::Token(kind) => write!(w, "{prefix}token {kind}")?,
            NodeKind::Trivia(kind) => write!(w, "{prefix}trivia {}", kind.token_kind())?,
        }
        writeln!(w, " [{}..{}]", self.start, self.end)?;
        for child in &self.children {
            child.format(grammar, indent + 1, w)?;
        }
        Ok(())
    }
}

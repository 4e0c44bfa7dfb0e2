//! Turns a successful parse into a typed, full-fidelity syntax tree.
//!
//! One recursive pass over the parse tree:
//! - terminals become leaf tokens;
//! - trivia is held back and attached to the next token;
//! - rules become nodes, unless their skip policy splices their children
//!   into the parent. The root is never spliced.
//!
//! Trivia left over after the last token ends up on a synthetic `EOF` leaf.

use std::sync::Arc;

use rowan::TextRange;
use tessera_core::{LineIndex, Position, SourceId};

use crate::engine::{NodeKind, ParseNode, ParsingResult};
use crate::grammar::{Grammar, SkipPolicy};

use super::ast::AstNode;
use super::text_range;
use super::token::{Token, TokenKind, Trivia};

pub struct AstBuilder<'g> {
    grammar: &'g Grammar,
    source: SourceId,
    tab_width: u32,
}

impl<'g> AstBuilder<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            source: SourceId::default(),
            tab_width: 1,
        }
    }

    /// Source id stamped on tokens built from text.
    pub fn with_source(mut self, source: SourceId) -> Self {
        self.source = source;
        self
    }

    /// Columns a tab counts for in positions of tokens built from text.
    /// Zero is treated as one.
    pub fn with_tab_width(mut self, width: u32) -> Self {
        self.tab_width = width.max(1);
        self
    }

    /// Builds the tree of a lexerless parse of `text`.
    ///
    /// Returns `None` when the parse produced no tree at all.
    pub fn build_text(&self, text: &str, result: &ParsingResult) -> Option<AstNode> {
        let root = result.root()?;
        let chars: Vec<char> = text.chars().collect();
        let mut pass = TextPass {
            grammar: self.grammar,
            source: self.source,
            lines: LineIndex::from_chars(chars.iter().copied()),
            chars,
            tab_width: self.tab_width,
            pending: Vec::new(),
        };

        let mut children = pass.children(root);
        if !pass.pending.is_empty() {
            let end = root.end();
            let eof = Token::new(TokenKind::EOF, "", pass.position(end), text_range(end, end))
                .with_source(self.source)
                .with_trivia(std::mem::take(&mut pass.pending))
                .into_synthetic();
            children.push(AstNode::leaf(Arc::new(eof)));
        }
        Some(self.root_node(root, children, text_range(root.start(), root.end())))
    }

    /// Builds the tree of a lexerful parse of `tokens`.
    ///
    /// Leaves share the lexer's tokens, trivia included. An unconsumed
    /// trailing `EOF` carrying trivia is appended as the last leaf.
    pub fn build_tokens(&self, tokens: &[Token], result: &ParsingResult) -> Option<AstNode> {
        let root = result.root()?;
        let pass = TokenPass {
            grammar: self.grammar,
            tokens,
        };

        let mut children = pass.children(root);
        if let Some(eof) = tokens.get(root.end())
            && eof.is(TokenKind::EOF)
            && eof.has_trivia()
        {
            children.push(AstNode::leaf(Arc::new(eof.clone())));
        }
        let range = match (children.first(), children.last()) {
            (Some(first), Some(last)) => TextRange::new(first.range().start(), last.range().end()),
            _ => pass.range(root.start(), root.end()),
        };
        Some(self.root_node(root, children, range))
    }

    fn root_node(&self, root: &ParseNode, children: Vec<AstNode>, range: TextRange) -> AstNode {
        let key = root.rule().map_or("", |id| self.grammar.rule(id).key());
        AstNode::rule(key, children, range)
    }
}

/// Splices `node` into `out`, or pushes it, following the rule's skip policy.
fn place(skip: SkipPolicy, node: AstNode, out: &mut Vec<AstNode>) {
    let inline = match skip {
        SkipPolicy::Never => false,
        SkipPolicy::Always => true,
        SkipPolicy::IfOneChild => node.number_of_children() == 1,
    };
    if inline {
        out.extend(node.into_children());
    } else {
        out.push(node);
    }
}

struct TextPass<'g> {
    grammar: &'g Grammar,
    source: SourceId,
    chars: Vec<char>,
    lines: LineIndex,
    tab_width: u32,
    pending: Vec<Trivia>,
}

impl TextPass<'_> {
    fn position(&self, offset: usize) -> Position {
        self.lines.position_with_tabs(&self.chars, offset, self.tab_width)
    }

    fn children(&mut self, node: &ParseNode) -> Vec<AstNode> {
        let mut out = Vec::new();
        for child in node.children() {
            self.visit(child, &mut out);
        }
        out
    }

    fn visit(&mut self, node: &ParseNode, out: &mut Vec<AstNode>) {
        match node.kind() {
            NodeKind::Rule(id) => {
                let rule = self.grammar.rule(id);
                let children = self.children(node);
                let range = text_range(node.start(), node.end());
                place(rule.skip(), AstNode::rule(rule.key(), children, range), out);
            }
            NodeKind::Terminal => self.leaf(TokenKind::TOKEN, node, out),
            NodeKind::Token(kind) => self.leaf(kind, node, out),
            NodeKind::Trivia(kind) => {
                if node.start() < node.end() {
                    let token = self.token(kind.token_kind(), node);
                    self.pending.push(Trivia::new(kind, vec![token]));
                }
            }
        }
    }

    fn leaf(&mut self, kind: TokenKind, node: &ParseNode, out: &mut Vec<AstNode>) {
        if node.start() == node.end() {
            return;
        }
        let token = self
            .token(kind, node)
            .with_trivia(std::mem::take(&mut self.pending));
        out.push(AstNode::leaf(Arc::new(token)));
    }

    fn token(&self, kind: TokenKind, node: &ParseNode) -> Token {
        let text: String = self.chars[node.start()..node.end()].iter().collect();
        Token::new(
            kind,
            text,
            self.position(node.start()),
            text_range(node.start(), node.end()),
        )
        .with_source(self.source)
    }
}

struct TokenPass<'g, 't> {
    grammar: &'g Grammar,
    tokens: &'t [Token],
}

impl TokenPass<'_, '_> {
    fn children(&self, node: &ParseNode) -> Vec<AstNode> {
        let mut out = Vec::new();
        for child in node.children() {
            self.visit(child, &mut out);
        }
        out
    }

    fn visit(&self, node: &ParseNode, out: &mut Vec<AstNode>) {
        match node.kind() {
            NodeKind::Rule(id) => {
                let rule = self.grammar.rule(id);
                let children = self.children(node);
                let range = self.range(node.start(), node.end());
                place(rule.skip(), AstNode::rule(rule.key(), children, range), out);
            }
            NodeKind::Terminal | NodeKind::Token(_) => {
                for token in &self.tokens[node.start()..node.end()] {
                    out.push(AstNode::leaf(Arc::new(token.clone())));
                }
            }
            NodeKind::Trivia(_) => {}
        }
    }

    /// Character range covered by tokens `[start, end)`, trivia excluded.
    fn range(&self, start: usize, end: usize) -> TextRange {
        let offset = match (self.tokens.get(start), self.tokens.last()) {
            (Some(token), _) => token.range().start(),
            (None, Some(last)) => last.range().end(),
            (None, None) => 0.into(),
        };
        if end <= start {
            return TextRange::empty(offset);
        }
        TextRange::new(offset, self.tokens[end - 1].range().end())
    }
}

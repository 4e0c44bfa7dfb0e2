//! Typed, positioned syntax tree.
//!
//! Nodes are immutable once built. Tokens are shared between a leaf and the
//! ancestors that use it as their primary token, so trees are cheap to build
//! and safe to move across threads.

use std::fmt;
use std::sync::Arc;

use rowan::TextRange;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::token::{Token, TokenKind};
use super::Span;

/// Type of a node: the rule that produced it, or the kind of its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Rule(&'static str),
    Token(TokenKind),
}

impl NodeType {
    pub fn name(&self) -> &'static str {
        match self {
            NodeType::Rule(key) => key,
            NodeType::Token(kind) => kind.name(),
        }
    }
}

impl From<TokenKind> for NodeType {
    fn from(kind: TokenKind) -> Self {
        NodeType::Token(kind)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    node_type: NodeType,
    token: Option<Arc<Token>>,
    children: Vec<AstNode>,
    range: TextRange,
}

impl AstNode {
    /// Structural node. Its token is the first token found among `children`.
    pub(crate) fn rule(key: &'static str, children: Vec<AstNode>, range: TextRange) -> Self {
        let token = children.iter().find_map(|c| c.token.clone());
        Self {
            node_type: NodeType::Rule(key),
            token,
            children,
            range,
        }
    }

    pub(crate) fn leaf(token: Arc<Token>) -> Self {
        Self {
            node_type: NodeType::Token(token.kind()),
            range: token.range(),
            token: Some(token),
            children: Vec::new(),
        }
    }

    pub(crate) fn into_children(self) -> Vec<AstNode> {
        self.children
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Rule key or token kind name.
    pub fn name(&self) -> &'static str {
        self.node_type.name()
    }

    pub fn is(&self, types: &[NodeType]) -> bool {
        types.contains(&self.node_type)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_type, NodeType::Token(_))
    }

    /// First token covered by this node, if any.
    pub fn token(&self) -> Option<&Token> {
        self.token.as_deref()
    }

    pub(crate) fn shared_token(&self) -> Option<&Arc<Token>> {
        self.token.as_ref()
    }

    pub fn token_value(&self) -> Option<&str> {
        self.token().map(Token::text)
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn from_offset(&self) -> usize {
        self.range.start().into()
    }

    pub fn to_offset(&self) -> usize {
        self.range.end().into()
    }

    pub fn children(&self) -> &[AstNode] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn number_of_children(&self) -> usize {
        self.children.len()
    }

    pub fn first_child(&self) -> Option<&AstNode> {
        self.children.first()
    }

    pub fn last_child(&self) -> Option<&AstNode> {
        self.children.last()
    }

    pub fn children_of<'a>(&'a self, types: &'a [NodeType]) -> impl Iterator<Item = &'a AstNode> {
        self.children.iter().filter(move |c| c.is(types))
    }

    pub fn first_child_of(&self, types: &[NodeType]) -> Option<&AstNode> {
        self.children.iter().find(|c| c.is(types))
    }

    /// All nodes below this one, depth-first in source order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    pub fn descendants_of<'a>(
        &'a self,
        types: &'a [NodeType],
    ) -> impl Iterator<Item = &'a AstNode> {
        self.descendants().filter(move |d| d.is(types))
    }

    pub fn first_descendant_of(&self, types: &[NodeType]) -> Option<&AstNode> {
        self.descendants().find(|d| d.is(types))
    }

    pub fn has_descendant(&self, types: &[NodeType]) -> bool {
        self.first_descendant_of(types).is_some()
    }

    /// Tokens of all leaves, in order.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        if self.is_leaf() {
            out.extend(self.token());
            return;
        }
        for child in &self.children {
            child.collect_tokens(out);
        }
    }

    pub fn last_token(&self) -> Option<&Token> {
        if self.is_leaf() {
            return self.token();
        }
        self.children.iter().rev().find_map(AstNode::last_token)
    }

    /// Source text of this node, trivia included.
    pub fn source_text(&self) -> String {
        self.tokens().into_iter().map(Token::full_text).collect()
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct Descendants<'a> {
    stack: Vec<&'a AstNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a AstNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl Serialize for AstNode {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut st = s.serialize_struct("AstNode", 3)?;
        st.serialize_field("type", self.name())?;
        st.serialize_field(
            "range",
            &Span {
                start: self.range.start().into(),
                end: self.range.end().into(),
            },
        )?;
        if self.is_leaf() {
            st.serialize_field("token", &self.token())?;
        } else {
            st.serialize_field("children", &self.children)?;
        }
        st.end()
    }
}

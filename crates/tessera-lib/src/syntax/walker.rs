//! Subscribe-by-type traversal of a syntax tree.

use std::collections::HashMap;
use std::sync::Arc;

use super::ast::{AstNode, NodeType};
use super::token::Token;

/// Consumer of a syntax tree. All callbacks default to doing nothing.
pub trait AstVisitor {
    /// Node types this visitor wants `visit_node`/`leave_node` calls for.
    fn node_types(&self) -> Vec<NodeType> {
        Vec::new()
    }

    /// Whether this visitor wants `visit_token` calls.
    fn wants_tokens(&self) -> bool {
        false
    }

    fn visit_file(&mut self, _root: &AstNode) {}

    fn leave_file(&mut self, _root: &AstNode) {}

    fn visit_node(&mut self, _node: &AstNode) {}

    fn leave_node(&mut self, _node: &AstNode) {}

    fn visit_token(&mut self, _token: &Token) {}
}

/// Depth-first walk delivering nodes to the visitors subscribed to their type.
///
/// `visit_*` calls follow visitor order, `leave_*` calls run in reverse.
/// Each token is delivered once, at the outermost node it starts.
pub struct AstWalker<'v> {
    visitors: Vec<&'v mut dyn AstVisitor>,
    subscriptions: HashMap<NodeType, Vec<usize>>,
    token_visitors: Vec<usize>,
    last_token: Option<Arc<Token>>,
}

impl<'v> AstWalker<'v> {
    pub fn new(visitors: Vec<&'v mut dyn AstVisitor>) -> Self {
        let mut subscriptions: HashMap<NodeType, Vec<usize>> = HashMap::new();
        let mut token_visitors = Vec::new();
        for (idx, visitor) in visitors.iter().enumerate() {
            for node_type in visitor.node_types() {
                let subscribers = subscriptions.entry(node_type).or_default();
                if !subscribers.contains(&idx) {
                    subscribers.push(idx);
                }
            }
            if visitor.wants_tokens() {
                token_visitors.push(idx);
            }
        }
        Self {
            visitors,
            subscriptions,
            token_visitors,
            last_token: None,
        }
    }

    pub fn walk(&mut self, root: &AstNode) {
        self.last_token = None;
        for visitor in self.visitors.iter_mut() {
            visitor.visit_file(root);
        }
        self.visit(root);
        for visitor in self.visitors.iter_mut().rev() {
            visitor.leave_file(root);
        }
    }

    fn visit(&mut self, node: &AstNode) {
        let subscribers = self
            .subscriptions
            .get(&node.node_type())
            .cloned()
            .unwrap_or_default();

        for &idx in &subscribers {
            self.visitors[idx].visit_node(node);
        }
        if let Some(token) = node.shared_token() {
            self.visit_token(token);
        }
        for child in node.children() {
            self.visit(child);
        }
        for &idx in subscribers.iter().rev() {
            self.visitors[idx].leave_node(node);
        }
    }

    fn visit_token(&mut self, token: &Arc<Token>) {
        if self
            .last_token
            .as_ref()
            .is_some_and(|last| Arc::ptr_eq(last, token))
        {
            return;
        }
        self.last_token = Some(Arc::clone(token));
        for &idx in &self.token_visitors {
            self.visitors[idx].visit_token(token);
        }
    }
}

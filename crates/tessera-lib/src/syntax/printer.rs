//! Builder-pattern printer for syntax trees and token streams.

use std::fmt::Write;

use tessera_core::Colors;

use super::ast::AstNode;
use super::token::Token;

pub struct AstPrinter<'a> {
    root: &'a AstNode,
    spans: bool,
    trivia: bool,
    colors: Colors,
}

impl<'a> AstPrinter<'a> {
    pub fn new(root: &'a AstNode) -> Self {
        Self {
            root,
            spans: false,
            trivia: false,
            colors: Colors::OFF,
        }
    }

    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    /// Prints the trivia of each leaf, prefixed with `~`, above it.
    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colors = Colors::new(value);
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        self.format_node(self.root, 0, w)
    }

    fn format_node(&self, node: &AstNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let c = &self.colors;

        if node.is_leaf() {
            if let Some(token) = node.token() {
                if self.trivia {
                    for trivia in token.trivia() {
                        for t in trivia.tokens() {
                            writeln!(w, "{prefix}{}~{} {:?}{}", c.dim, t.kind(), t.text(), c.reset)?;
                        }
                    }
                }
                write!(w, "{prefix}{} {}{:?}{}", token.kind(), c.green, token.text(), c.reset)?;
            }
        } else {
            write!(w, "{prefix}{}{}{}", c.blue, node.name(), c.reset)?;
        }

        if self.spans {
            let range = node.range();
            write!(
                w,
                " {}[{}..{}]{}",
                c.dim,
                u32::from(range.start()),
                u32::from(range.end()),
                c.reset
            )?;
        }
        writeln!(w)?;

        for child in node.children() {
            self.format_node(child, indent + 1, w)?;
        }
        Ok(())
    }
}

impl AstNode {
    pub fn printer(&self) -> AstPrinter<'_> {
        AstPrinter::new(self)
    }

    /// Indented outline of the tree.
    pub fn dump(&self) -> String {
        self.printer().dump()
    }
}

/// One line per token, trivia lines prefixed with `~` above their token.
pub fn dump_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        for trivia in token.trivia() {
            for t in trivia.tokens() {
                out.push_str(&format!("~{} {:?}\n", t.kind(), t.text()));
            }
        }
        out.push_str(&format!("{} {:?}\n", token.kind(), token.text()));
    }
    out
}

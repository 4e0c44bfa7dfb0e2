use std::cell::RefCell;
use std::rc::Rc;

use crate::grammar::GrammarBuilder;
use crate::grammar::dsl::*;
use crate::syntax::{AstBuilder, AstNode, AstVisitor, AstWalker, NodeType, Token, TokenKind};

type Log = Rc<RefCell<Vec<String>>>;

struct Recorder {
    label: &'static str,
    types: Vec<NodeType>,
    tokens: bool,
    log: Log,
}

impl Recorder {
    fn new(label: &'static str, types: &[NodeType], log: &Log) -> Self {
        Self {
            label,
            types: types.to_vec(),
            tokens: false,
            log: Rc::clone(log),
        }
    }

    fn with_tokens(mut self) -> Self {
        self.tokens = true;
        self
    }

    fn push(&self, event: String) {
        self.log.borrow_mut().push(format!("{} {event}", self.label));
    }
}

impl AstVisitor for Recorder {
    fn node_types(&self) -> Vec<NodeType> {
        self.types.clone()
    }

    fn wants_tokens(&self) -> bool {
        self.tokens
    }

    fn visit_file(&mut self, root: &AstNode) {
        self.push(format!("visit file {}", root.name()));
    }

    fn leave_file(&mut self, _root: &AstNode) {
        self.push("leave file".to_owned());
    }

    fn visit_node(&mut self, node: &AstNode) {
        self.push(format!("visit {} {:?}", node.name(), node.token_value().unwrap_or("")));
    }

    fn leave_node(&mut self, node: &AstNode) {
        self.push(format!("leave {}", node.name()));
    }

    fn visit_token(&mut self, token: &Token) {
        self.push(format!("token {:?}", token.text()));
    }
}

fn parse_call(text: &str) -> AstNode {
    let mut g = GrammarBuilder::lexerless();
    g.rule("call")
        .is(seq([rule("name"), lit("("), optional(rule("args")), lit(")")]))
        .unwrap();
    g.rule("args")
        .is(seq([
            rule("name"),
            zero_or_more(seq([lit(","), optional(skipped_trivia(lit(" "))), rule("name")])),
        ]))
        .unwrap();
    g.rule("name").is(token(TokenKind::IDENTIFIER, regexp("[a-z]+"))).unwrap();
    g.set_root_rule("call");
    let grammar = g.build().unwrap();

    let result = grammar.parser().parse_text(text).unwrap();
    AstBuilder::new(&grammar).build_text(text, &result).unwrap()
}

fn dump(log: &Log) -> String {
    let mut out = log.borrow().join("\n");
    out.push('\n');
    out
}

#[test]
fn visit_in_visitor_order_leave_in_reverse() {
    let ast = parse_call("f(a)");
    let log = Log::default();
    let mut first = Recorder::new("A", &[NodeType::Rule("name")], &log);
    let mut second = Recorder::new("B", &[NodeType::Rule("name"), NodeType::Rule("args")], &log);

    AstWalker::new(vec![&mut first, &mut second]).walk(&ast);

    insta::assert_snapshot!(dump(&log), @r#"
    A visit file call
    B visit file call
    A visit name "f"
    B visit name "f"
    B leave name
    A leave name
    B visit args "a"
    A visit name "a"
    B visit name "a"
    B leave name
    A leave name
    B leave args
    B leave file
    A leave file
    "#);
}

#[test]
fn each_token_is_delivered_once() {
    let ast = parse_call("f(a, b)");
    let log = Log::default();
    let mut tokens = Recorder::new("T", &[], &log).with_tokens();

    AstWalker::new(vec![&mut tokens]).walk(&ast);

    insta::assert_snapshot!(dump(&log), @r#"
    T visit file call
    T token "f"
    T token "("
    T token "a"
    T token ","
    T token "b"
    T token ")"
    T leave file
    "#);
}

#[test]
fn tokens_arrive_after_the_outermost_node_starting_there() {
    let ast = parse_call("f(a)");
    let log = Log::default();
    let mut visitor = Recorder::new("V", &[NodeType::Rule("args"), NodeType::Rule("name")], &log)
        .with_tokens();

    AstWalker::new(vec![&mut visitor]).walk(&ast);

    insta::assert_snapshot!(dump(&log), @r#"
    V visit file call
    V token "f"
    V visit name "f"
    V leave name
    V token "("
    V visit args "a"
    V token "a"
    V visit name "a"
    V leave name
    V leave args
    V token ")"
    V leave file
    "#);
}

#[test]
fn token_types_subscribe_to_leaves() {
    let ast = parse_call("f(a, b)");
    let log = Log::default();
    let mut leaves = Recorder::new("L", &[NodeType::Token(TokenKind::IDENTIFIER)], &log);

    AstWalker::new(vec![&mut leaves]).walk(&ast);

    let visits = log.borrow().iter().filter(|e| e.starts_with("L visit IDENTIFIER")).count();
    assert_eq!(visits, 3);
}

#[test]
fn walking_twice_replays_every_token() {
    let ast = parse_call("f()");
    let log = Log::default();
    let mut tokens = Recorder::new("T", &[], &log).with_tokens();

    let mut walker = AstWalker::new(vec![&mut tokens]);
    walker.walk(&ast);
    walker.walk(&ast);

    let count = log.borrow().iter().filter(|e| e.contains("token")).count();
    assert_eq!(count, 6);
}

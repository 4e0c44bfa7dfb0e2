use crate::grammar::GrammarBuilder;
use crate::grammar::dsl::*;
use crate::syntax::{AstBuilder, AstNode, NodeType, TokenKind};

const NAME: NodeType = NodeType::Rule("name");
const ARGS: NodeType = NodeType::Rule("args");
const IDENT: NodeType = NodeType::Token(TokenKind::IDENTIFIER);

fn parse_call(text: &str) -> AstNode {
    let mut g = GrammarBuilder::lexerless();
    g.rule("call")
        .is(seq([rule("name"), lit("("), optional(rule("args")), lit(")")]))
        .unwrap();
    g.rule("args")
        .is(seq([
            rule("name"),
            zero_or_more(seq([lit(","), rule("sp"), rule("name")])),
        ]))
        .unwrap();
    g.rule("name").is(token(TokenKind::IDENTIFIER, regexp("[a-z]+"))).unwrap();
    g.rule("sp").is(zero_or_more(skipped_trivia(regexp(" +")))).unwrap().skip();
    g.set_root_rule("call");
    let grammar = g.build().unwrap();

    let result = grammar.parser().parse_text(text).unwrap();
    assert!(result.is_match());
    AstBuilder::new(&grammar).build_text(text, &result).unwrap()
}

#[test]
fn dump_outlines_the_tree() {
    let ast = parse_call("f(a, b)");

    insta::assert_snapshot!(ast.dump(), @r#"
    call
      name
        IDENTIFIER "f"
      TOKEN "("
      args
        name
          IDENTIFIER "a"
        TOKEN ","
        name
          IDENTIFIER "b"
      TOKEN ")"
    "#);
}

#[test]
fn children_queries_stay_one_level_deep() {
    let ast = parse_call("f(a, b)");

    assert_eq!(ast.children_of(&[NAME]).count(), 1);
    assert_eq!(ast.number_of_children(), 4);
    assert_eq!(ast.first_child().map(AstNode::name), Some("name"));
    assert_eq!(ast.last_child().and_then(AstNode::token_value), Some(")"));
    assert!(ast.first_child_of(&[ARGS]).is_some());
    assert!(ast.first_child_of(&[IDENT]).is_none());
}

#[test]
fn descendant_queries_search_in_source_order() {
    let ast = parse_call("f(a, b)");

    let names: Vec<_> = ast
        .descendants_of(&[NAME])
        .filter_map(AstNode::token_value)
        .collect();
    assert_eq!(names, ["f", "a", "b"]);
    assert_eq!(ast.descendants().count(), 10);
    assert!(ast.has_descendant(&[IDENT]));
    assert!(!ast.has_descendant(&[NodeType::Token(TokenKind::NUMBER)]));

    let args = ast.first_descendant_of(&[ARGS]).unwrap();
    assert_eq!(args.descendants_of(&[IDENT]).count(), 2);
}

#[test]
fn rule_nodes_expose_first_and_last_token() {
    let ast = parse_call("f(a, b)");
    let args = ast.first_child_of(&[ARGS]).unwrap();

    assert!(!args.is_leaf());
    assert_eq!(args.token_value(), Some("a"));
    assert_eq!(args.last_token().map(|t| t.text()), Some("b"));
    assert_eq!((args.from_offset(), args.to_offset()), (2, 6));
}

#[test]
fn source_text_includes_inner_trivia() {
    let ast = parse_call("f(a,   b)");
    let args = ast.first_child_of(&[ARGS]).unwrap();

    assert_eq!(args.source_text(), "a,   b");
    assert_eq!(ast.source_text(), "f(a,   b)");
    assert_eq!(ast.tokens().len(), 6);
}

#[test]
fn node_types_print_their_name() {
    assert_eq!(NAME.to_string(), "name");
    assert_eq!(NodeType::from(TokenKind::EOF).to_string(), "EOF");
    assert!(parse_call("f()").is(&[NodeType::Rule("call")]));
}

#[test]
fn serializes_rules_with_children_and_leaves_with_tokens() {
    let ast = parse_call("f()");

    let json = serde_json::to_value(&ast).unwrap();

    assert_eq!(json["type"], "call");
    assert_eq!(json["range"]["end"], 3);
    assert_eq!(json["children"][0]["type"], "name");
    let leaf = &json["children"][0]["children"][0];
    assert_eq!(leaf["type"], "IDENTIFIER");
    assert_eq!(leaf["token"]["text"], "f");
    assert!(leaf.get("children").is_none());
}

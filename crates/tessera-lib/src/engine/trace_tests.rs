use crate::engine::PrintTracer;
use crate::grammar::GrammarBuilder;
use crate::grammar::dsl::*;

#[test]
fn trace_rule_calls() {
    let mut g = GrammarBuilder::lexerless();
    g.rule("list")
        .is(seq([rule("item"), zero_or_more(seq([lit(","), rule("item")]))]))
        .unwrap();
    g.rule("item").is(regexp("[a-z]+")).unwrap();
    g.set_root_rule("list");
    let grammar = g.build().unwrap();

    let mut tracer = PrintTracer::new();
    let result = grammar.parser().parse_text_traced("a,b", &mut tracer).unwrap();
    assert!(result.is_match());
    insta::assert_snapshot!(tracer.dump(), @r"
    list @0
      item @0
      item = 0..1
      item @2
      item = 2..3
    list = 0..3
    ");
}

#[test]
fn trace_memo_hits() {
    let mut g = GrammarBuilder::lexerless();
    g.rule("root")
        .is(first_of([seq([rule("n"), lit("+")]), seq([rule("n"), lit("-")])]))
        .unwrap();
    g.rule("n").is(regexp("[0-9]+")).unwrap();
    g.set_root_rule("root");
    let grammar = g.build_with_memoization().unwrap();

    let mut tracer = PrintTracer::new();
    grammar.parser().parse_text_traced("1-", &mut tracer).unwrap();
    insta::assert_snapshot!(tracer.dump(), @r"
    root @0
      n @0
      n = 0..1
      n @0 memo = 0..1
    root = 0..2
    ");

    let mut tracer = PrintTracer::new();
    grammar.parser().parse_text_traced("x", &mut tracer).unwrap();
    insta::assert_snapshot!(tracer.dump(), @r"
    root @0
      n @0
      n = fail
      n @0 memo = fail
    root = fail
    ");
}

#[test]
fn colored_trace_uses_escapes() {
    let mut g = GrammarBuilder::lexerless();
    g.rule("a").is("a").unwrap();
    g.set_root_rule("a");
    let grammar = g.build().unwrap();

    let mut tracer = PrintTracer::new().colored(true);
    grammar.parser().parse_text_traced("a", &mut tracer).unwrap();
    assert_eq!(tracer.lines().len(), 2);
    assert!(tracer.dump().contains('\x1b'));
}

use crate::grammar::dsl::*;
use crate::grammar::{GrammarBuilder, GrammarError, GrammarMode};
use crate::syntax::TokenKind;

fn build_lexerless(expr: crate::grammar::Expr) -> Result<crate::grammar::Grammar, GrammarError> {
    let mut g = GrammarBuilder::lexerless();
    g.rule("root").is(expr)?;
    g.set_root_rule("root");
    g.build()
}

#[test]
fn repetition_of_optional_is_rejected() {
    let err = build_lexerless(zero_or_more(optional("a"))).unwrap_err();
    assert_eq!(err, GrammarError::NullableRepetition { rule: "root" });
    insta::assert_snapshot!(
        err.to_string(),
        @"The rule 'root' repeats an expression that can match empty input."
    );
}

#[test]
fn repetition_of_nullable_pattern_is_rejected() {
    let err = build_lexerless(one_or_more(regexp("[a-z]*"))).unwrap_err();
    assert_eq!(err, GrammarError::NullableRepetition { rule: "root" });
}

#[test]
fn repetition_of_non_empty_pattern_is_accepted() {
    assert!(build_lexerless(one_or_more(regexp("[a-z]+"))).is_ok());
}

#[test]
fn nullability_flows_through_rules() {
    let mut g = GrammarBuilder::lexerless();
    g.rule("list").is(zero_or_more(rule("item"))).unwrap();
    g.rule("item").is(seq([optional("-"), rule("maybe")])).unwrap();
    g.rule("maybe").is(first_of([lit("x"), lit("")])).unwrap();
    g.set_root_rule("list");

    assert_eq!(
        g.build().unwrap_err(),
        GrammarError::NullableRepetition { rule: "list" }
    );
}

#[test]
fn recursive_rules_without_empty_match_are_accepted() {
    let mut g = GrammarBuilder::lexerless();
    g.rule("expr").is(first_of([seq([lit("("), rule("expr"), lit(")")]), lit("x")])).unwrap();
    g.rule("exprs").is(one_or_more(rule("expr"))).unwrap();
    g.set_root_rule("exprs");

    assert!(g.build().is_ok());
}

#[test]
fn token_atoms_need_a_lexerful_grammar() {
    let err = build_lexerless(seq([lit("a"), any_token()])).unwrap_err();
    assert_eq!(
        err,
        GrammarError::UnsupportedExpression {
            rule: "root",
            expr: "any token",
            mode: GrammarMode::Lexerless,
        }
    );
    insta::assert_snapshot!(
        err.to_string(),
        @"The rule 'root' uses any token, which a lexerless grammar does not support."
    );
}

#[test]
fn patterns_need_a_lexerless_grammar() {
    let mut g = GrammarBuilder::lexerful();
    g.rule("root").is(token(TokenKind::NUMBER, regexp("[0-9]+"))).unwrap();
    g.set_root_rule("root");

    let err = g.build().unwrap_err();
    assert!(matches!(
        err,
        GrammarError::UnsupportedExpression {
            expr: "a token wrapper",
            mode: GrammarMode::Lexerful,
            ..
        }
    ));
}

#[test]
fn invalid_pattern() {
    let err = build_lexerless(regexp("[a-")).unwrap_err();
    let GrammarError::InvalidPattern { rule, pattern, .. } = err else {
        panic!("expected an invalid pattern error, got {err:?}");
    };
    assert_eq!(rule, "root");
    assert_eq!(pattern, "[a-");
}

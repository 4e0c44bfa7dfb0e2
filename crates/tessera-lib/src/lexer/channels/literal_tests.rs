use crate::lexer::{Channel, CodeBuffer, LexSink};
use crate::syntax::TokenKind;

use super::LiteralChannel;

/// Text of the recognized literal, `None` when the channel declined.
fn scan(mut channel: LiteralChannel, text: &str) -> Option<String> {
    let mut code = CodeBuffer::new(text, 1);
    let mut sink = LexSink::default();
    if !channel.consume(&mut code, &mut sink) {
        assert_eq!(code.offset(), 0);
        return None;
    }
    let token = &sink.tokens()[0];
    assert_eq!(code.offset(), token.text().chars().count());
    Some(token.text().to_owned())
}

#[test]
fn escaped_quotes_stay_inside() {
    assert_eq!(scan(LiteralChannel::string(), r#""a\"b" rest"#).as_deref(), Some(r#""a\"b""#));
    assert_eq!(scan(LiteralChannel::character(), r"'\'';").as_deref(), Some(r"'\''"));
}

#[test]
fn encoding_prefixes_and_suffixes() {
    assert_eq!(scan(LiteralChannel::string(), r#"u8"x";"#).as_deref(), Some(r#"u8"x""#));
    assert_eq!(scan(LiteralChannel::character(), "L'a'").as_deref(), Some("L'a'"));
    assert_eq!(scan(LiteralChannel::string(), r#"U"x"_sv;"#).as_deref(), Some(r#"U"x"_sv"#));
    assert_eq!(scan(LiteralChannel::string(), r#""a"1"#).as_deref(), Some(r#""a""#));
}

#[test]
fn raw_strings_end_at_their_delimiter() {
    let text = r#"R"xy(a)"b)xy" tail"#;

    assert_eq!(scan(LiteralChannel::string(), text).as_deref(), Some(r#"R"xy(a)"b)xy""#));
    assert_eq!(
        scan(LiteralChannel::string(), "R\"(line\nbreak)\"").as_deref(),
        Some("R\"(line\nbreak)\"")
    );
}

#[test]
fn raw_marker_is_only_for_strings() {
    assert_eq!(scan(LiteralChannel::character(), "R'a'"), None);
}

#[test]
fn unterminated_literals_are_rejected() {
    assert_eq!(scan(LiteralChannel::string(), "\"abc\nx"), None);
    assert_eq!(scan(LiteralChannel::string(), "\"abc"), None);
    assert_eq!(scan(LiteralChannel::character(), "'a\r\n"), None);
    assert_eq!(scan(LiteralChannel::string(), r#"R"x(abc"#), None);
}

#[test]
fn bodies_run_across_line_breaks_to_the_closing_quote() {
    assert_eq!(scan(LiteralChannel::string(), "\"abc\nx\";").as_deref(), Some("\"abc\nx\""));
    assert_eq!(scan(LiteralChannel::character(), "'a\r\nb' ").as_deref(), Some("'a\r\nb'"));
}

#[test]
fn prefixed_identifiers_are_not_literals() {
    assert_eq!(scan(LiteralChannel::string(), "u8x"), None);
    assert_eq!(scan(LiteralChannel::string(), "Lx"), None);
}

#[test]
fn kinds_follow_the_quote() {
    let mut code = CodeBuffer::new("'a' \"b\"", 1);
    let mut sink = LexSink::default();

    LiteralChannel::character().consume(&mut code, &mut sink);
    code.pop();
    LiteralChannel::string()
        .with_kind(TokenKind::new("TEXT"))
        .consume(&mut code, &mut sink);

    let kinds: Vec<_> = sink.tokens().iter().map(|t| t.kind()).collect();
    assert_eq!(kinds, [TokenKind::CHARACTER, TokenKind::new("TEXT")]);
}

use rowan::TextRange;

use super::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_uses_kind_defaults() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnrecognizedCharacter, range(0, 1))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_warnings());
    assert!(!diagnostics.has_errors());
    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.message(), "unrecognized character");
    assert_eq!(diag.kind(), DiagnosticKind::UnrecognizedCharacter);
}

#[test]
fn report_with_detail_and_severity() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnrecognizedCharacter, range(2, 3))
        .message("'@'")
        .severity(Severity::Error)
        .emit();

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.warning_count(), 0);
    insta::assert_snapshot!(diagnostics.printer().render(), @"error at 2..3: unrecognized character: '@'");
}

#[test]
fn extend_keeps_order() {
    let mut first = Diagnostics::new();
    first.report(DiagnosticKind::ParseFailure, range(0, 1)).emit();
    let mut second = Diagnostics::new();
    second
        .report(DiagnosticKind::UnrecognizedCharacter, range(1, 2))
        .emit();

    first.extend(second);
    let kinds: Vec<_> = first.iter().map(DiagnosticMessage::kind).collect();
    assert_eq!(
        kinds,
        [DiagnosticKind::ParseFailure, DiagnosticKind::UnrecognizedCharacter]
    );
}

#[test]
fn printer_with_path() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ParseFailure, range(4, 5))
        .message("expected \";\"")
        .emit();

    let result = diagnostics.printer().source("int x").path("main.c").render();
    insta::assert_snapshot!(result, @r#"
    error: parse error: expected ";"
     --> main.c:1:5
      |
    1 | int x
      |     ^
    "#);
}

#[test]
fn printer_zero_width_span() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ParseFailure, TextRange::empty(0.into()))
        .emit();

    insta::assert_snapshot!(diagnostics.render("hello"), @r"
    error: parse error
      |
    1 | hello
      | ^
    ");
}

#[test]
fn printer_counts_characters_not_bytes() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnrecognizedCharacter, range(2, 3))
        .message("'@'")
        .emit();

    insta::assert_snapshot!(diagnostics.render("éé@"), @r"
    warning: unrecognized character: '@'
      |
    1 | éé@
      |   ^
    ");
}

#[test]
fn printer_colored() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ParseFailure, range(0, 5))
        .emit();

    let result = diagnostics.render_colored("hello", true);
    assert!(result.contains("parse error"));
    assert!(result.contains('\x1b'));
}

#[test]
fn printer_empty_diagnostics() {
    let diagnostics = Diagnostics::new();
    assert!(diagnostics.render("source").is_empty());
}

#[test]
fn printer_from_registered_source() {
    let mut sources = tessera_core::SourceMap::new();
    let file = sources.add_file("lib.c", "int x");
    let inline = sources.add_inline("int x");
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ParseFailure, range(4, 5))
        .emit();

    let from_file = diagnostics
        .printer()
        .from_source(sources.get(file).unwrap())
        .render();
    let from_inline = diagnostics
        .printer()
        .from_source(sources.get(inline).unwrap())
        .render();

    assert!(from_file.contains("--> lib.c:1:5"));
    assert!(!from_inline.contains("-->"));
    assert!(from_inline.contains("1 | int x"));
}

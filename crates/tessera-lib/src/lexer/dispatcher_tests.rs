use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tessera_core::Position;

use crate::config::UnrecognizedCharPolicy;
use crate::diagnostics::{DiagnosticKind, Severity};
use crate::syntax::{TokenKind, dump_tokens};
use crate::Error;

use super::channels::{IdentifierChannel, PunctuatorChannel, WhitespaceChannel};
use super::{Channel, ChannelDispatcher, CodeBuffer, LexSink};

const EQ: TokenKind = TokenKind::new("EQ");
const EQ_EQ: TokenKind = TokenKind::new("EQ_EQ");

fn run(channels: Vec<Box<dyn Channel>>, policy: UnrecognizedCharPolicy, text: &str) -> crate::Result<LexSink> {
    let mut dispatcher = ChannelDispatcher::new(channels, policy);
    let mut code = CodeBuffer::new(text, 1);
    let mut sink = LexSink::default();
    dispatcher.consume(&mut code, &mut sink)?;
    Ok(sink)
}

fn words() -> Vec<Box<dyn Channel>> {
    vec![Box::new(WhitespaceChannel::discard()), Box::new(IdentifierChannel::new())]
}

/// Reports a match without consuming anything.
struct Observer(Arc<AtomicUsize>);

impl Channel for Observer {
    fn consume(&mut self, _code: &mut CodeBuffer, _sink: &mut LexSink) -> bool {
        self.0.fetch_add(1, Ordering::Relaxed);
        true
    }

    fn reset(&mut self) {
        self.0.store(0, Ordering::Relaxed);
    }
}

/// Consumes a character but claims it did not match.
struct Liar;

impl Channel for Liar {
    fn consume(&mut self, code: &mut CodeBuffer, _sink: &mut LexSink) -> bool {
        code.pop();
        false
    }
}

#[test]
fn earlier_channels_win_over_longer_matches() {
    let channels: Vec<Box<dyn Channel>> = vec![
        Box::new(PunctuatorChannel::new([("=", EQ)])),
        Box::new(PunctuatorChannel::new([("==", EQ_EQ)])),
    ];

    let sink = run(channels, UnrecognizedCharPolicy::Fail, "==").unwrap();

    insta::assert_snapshot!(dump_tokens(sink.tokens()), @r#"
    EQ "="
    EQ "="
    "#);
}

#[test]
fn success_without_progress_passes_the_turn() {
    let calls = Arc::new(AtomicUsize::new(0));
    let channels: Vec<Box<dyn Channel>> = vec![
        Box::new(Observer(Arc::clone(&calls))),
        Box::new(IdentifierChannel::new()),
    ];

    let sink = run(channels, UnrecognizedCharPolicy::Fail, "ab").unwrap();

    assert_eq!(sink.tokens().len(), 1);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn reset_reaches_every_channel() {
    let calls = Arc::new(AtomicUsize::new(5));
    let mut dispatcher = ChannelDispatcher::new(
        vec![Box::new(Observer(Arc::clone(&calls)))],
        UnrecognizedCharPolicy::Skip,
    );

    dispatcher.reset();

    assert_eq!(calls.load(Ordering::Relaxed), 0);
    assert_eq!(dispatcher.len(), 1);
    assert_eq!(dispatcher.policy(), UnrecognizedCharPolicy::Skip);
}

#[test]
#[should_panic(expected = "broken channel contract")]
fn consuming_without_a_match_panics() {
    let channels: Vec<Box<dyn Channel>> = vec![Box::new(Liar), Box::new(IdentifierChannel::new())];

    let _ = run(channels, UnrecognizedCharPolicy::Skip, "a");
}

#[test]
fn fail_policy_stops_at_the_first_unknown_character() {
    let err = run(words(), UnrecognizedCharPolicy::Fail, "ab\n @cd").err().unwrap();

    assert_eq!(
        err,
        Error::UnrecognizedCharacter {
            ch: '@',
            offset: 4,
            position: Position::new(2, 1),
        }
    );
    insta::assert_snapshot!(err, @"None of the channels could handle character '@' at 2:1");
}

#[test]
fn skip_policy_drops_unknown_characters_silently() {
    let sink = run(words(), UnrecognizedCharPolicy::Skip, "a@b$").unwrap();

    insta::assert_snapshot!(dump_tokens(sink.tokens()), @r#"
    IDENTIFIER "a"
    IDENTIFIER "b"
    "#);
    assert!(sink.diagnostics().is_empty());
}

#[test]
fn report_policy_records_a_warning_per_character() {
    let sink = run(words(), UnrecognizedCharPolicy::Report, "a @b").unwrap();

    assert_eq!(sink.tokens().len(), 2);
    let diagnostics = sink.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(!diagnostics.has_errors());

    let warning = diagnostics.iter().next().unwrap();
    assert_eq!(warning.kind(), DiagnosticKind::UnrecognizedCharacter);
    assert_eq!(warning.severity(), Severity::Warning);
    assert_eq!(warning.message(), "unrecognized character: '@'");
    assert_eq!(u32::from(warning.range().start()), 2);
}

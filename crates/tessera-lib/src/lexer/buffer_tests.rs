use regex_automata::meta::Regex;
use tessera_core::Position;

use super::{CodeBuffer, CodeFilter};

#[test]
fn peek_and_char_at_do_not_consume() {
    let code = CodeBuffer::new("abc", 1);

    assert_eq!(code.peek(), Some('a'));
    assert_eq!(code.char_at(2), Some('c'));
    assert_eq!(code.char_at(3), None);
    assert_eq!(code.offset(), 0);
    assert_eq!(code.last_char(), None);
}

#[test]
fn pop_tracks_lines_for_every_break_style() {
    let mut code = CodeBuffer::new("ab\r\nc\rd\ne", 1);
    let mut seen = Vec::new();
    while code.pop().is_some() {
        seen.push((code.line(), code.column()));
    }

    assert_eq!(
        seen,
        vec![
            (1, 1),
            (1, 2),
            (1, 3),
            (2, 0),
            (2, 1),
            (3, 0),
            (3, 1),
            (4, 0),
            (4, 1),
        ]
    );
    assert!(code.is_eof());
    assert_eq!(code.pop(), None);
    assert_eq!(code.last_char(), Some('e'));
}

#[test]
fn tabs_advance_by_width() {
    let mut code = CodeBuffer::new("\tx\ty", 4);

    code.skip(2);
    assert_eq!(code.column(), 5);
    assert_eq!(code.position_of(2), Position::new(1, 5));
    assert_eq!(code.position_of(3), Position::new(1, 9));
}

#[test]
fn position_past_the_end_clamps_with_wide_tabs() {
    let code = CodeBuffer::new("ab", 4);

    assert_eq!(code.position_of(10), Position::new(1, 2));
}

#[test]
fn recording_returns_exactly_the_popped_characters() {
    let mut code = CodeBuffer::new("hello world", 1);

    code.pop();
    code.start_recording();
    assert_eq!(code.skip(4), 4);
    assert_eq!(code.stop_recording(), "ello");

    code.pop();
    assert_eq!(code.stop_recording(), "");
}

#[test]
fn restore_rewinds_cursor_and_recording() {
    let mut code = CodeBuffer::new("ab\ncd", 1);
    code.start_recording();
    code.pop();
    let checkpoint = code.checkpoint();

    code.skip(3);
    assert_eq!(code.position(), Position::new(2, 1));

    code.restore(checkpoint);
    assert_eq!(code.offset(), 1);
    assert_eq!(code.position(), Position::new(1, 1));
    assert_eq!(code.peek(), Some('b'));
    assert_eq!(code.stop_recording(), "a");
}

#[test]
fn skip_stops_at_end_of_input() {
    let mut code = CodeBuffer::new("ab", 1);

    assert_eq!(code.skip(5), 2);
    assert!(code.is_eof());
}

#[test]
fn starts_with_looks_ahead_from_cursor() {
    let mut code = CodeBuffer::new("//x", 1);

    assert!(code.starts_with("//"));
    code.pop();
    assert!(!code.starts_with("//"));
    assert!(code.starts_with("/x"));
    assert!(!code.starts_with("/xy"));
}

#[test]
fn filters_run_in_order() {
    let mut filters: Vec<Box<dyn CodeFilter>> = vec![
        Box::new(|text: &str| text.replace('-', "+")),
        Box::new(|text: &str| text.to_uppercase()),
    ];

    let code = CodeBuffer::with_filters("a-b", 1, &mut filters);

    assert_eq!(code.rest().iter().collect::<String>(), "A+B");
}

#[test]
fn regex_matches_are_anchored_and_counted_in_characters() {
    let regex = Regex::new("[a-zé]+").unwrap();
    let mut code = CodeBuffer::new("1éa2", 1);

    assert_eq!(code.match_regex(&regex), None);
    code.pop();
    assert_eq!(code.match_regex(&regex), Some(2));
}

use crate::lexer::buffer::CodeBuffer;
use crate::lexer::channel::Channel;
use crate::lexer::sink::LexSink;
use crate::syntax::{TokenKind, Trivia};

use super::{is_line_break, splice_len};

/// Token kinds of classified directives.
pub mod directives {
    use crate::syntax::TokenKind;

    pub const INCLUDE: TokenKind = TokenKind::new("PP_INCLUDE");
    pub const DEFINE: TokenKind = TokenKind::new("PP_DEFINE");
    pub const UNDEF: TokenKind = TokenKind::new("PP_UNDEF");
    pub const IF: TokenKind = TokenKind::new("PP_IF");
    pub const IFDEF: TokenKind = TokenKind::new("PP_IFDEF");
    pub const IFNDEF: TokenKind = TokenKind::new("PP_IFNDEF");
    pub const ELIF: TokenKind = TokenKind::new("PP_ELIF");
    pub const ELSE: TokenKind = TokenKind::new("PP_ELSE");
    pub const ENDIF: TokenKind = TokenKind::new("PP_ENDIF");
    pub const LINE: TokenKind = TokenKind::new("PP_LINE");
    pub const ERROR: TokenKind = TokenKind::new("PP_ERROR");
    pub const WARNING: TokenKind = TokenKind::new("PP_WARNING");
    pub const PRAGMA: TokenKind = TokenKind::new("PP_PRAGMA");
    pub const IMPORT: TokenKind = TokenKind::new("PP_IMPORT");

    pub(super) const TABLE: &[(&str, TokenKind)] = &[
        ("include", INCLUDE),
        ("define", DEFINE),
        ("undef", UNDEF),
        ("ifdef", IFDEF),
        ("ifndef", IFNDEF),
        ("if", IF),
        ("elif", ELIF),
        ("else", ELSE),
        ("endif", ENDIF),
        ("line", LINE),
        ("error", ERROR),
        ("warning", WARNING),
        ("pragma", PRAGMA),
        ("import", IMPORT),
    ];
}

/// Reads a directive from `#` to the end of its logical line.
///
/// Line splices collapse to one space, comments are dropped, quoted text is
/// copied verbatim. The token's original text keeps the raw characters.
#[derive(Debug, Clone)]
pub struct PreprocessorChannel {
    directives: Vec<(&'static str, TokenKind)>,
    as_trivia: bool,
}

impl Default for PreprocessorChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl PreprocessorChannel {
    pub fn new() -> Self {
        Self {
            directives: directives::TABLE.to_vec(),
            as_trivia: false,
        }
    }

    /// Adds or replaces a directive name.
    pub fn with_directive(mut self, name: &'static str, kind: TokenKind) -> Self {
        match self.directives.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = kind,
            None => self.directives.push((name, kind)),
        }
        self
    }

    /// Delivers directives as preprocessor trivia instead of tokens.
    pub fn as_trivia(mut self) -> Self {
        self.as_trivia = true;
        self
    }

    /// Directive type named right after `#`, or the generic type.
    pub fn classify(&self, text: &str) -> TokenKind {
        let name: String = text
            .trim_start_matches('#')
            .trim_start_matches([' ', '\t'])
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        self.directives
            .iter()
            .find(|(n, _)| *n == name)
            .map_or(TokenKind::PREPROCESSOR, |(_, kind)| *kind)
    }
}

impl Channel for PreprocessorChannel {
    fn consume(&mut self, code: &mut CodeBuffer, sink: &mut LexSink) -> bool {
        if code.peek() != Some('#') {
            return false;
        }

        let start = code.checkpoint();
        code.start_recording();
        let mut text = String::new();

        while let Some(c) = code.peek() {
            if is_line_break(c) {
                break;
            }
            if let Some(len) = splice_len(code, 0) {
                code.skip(len);
                text.push(' ');
                continue;
            }
            match (c, code.char_at(1)) {
                ('"' | '\'', _) => copy_quoted(code, &mut text, c),
                ('/', Some('/')) => skip_line_comment(code),
                ('/', Some('*')) => {
                    skip_block_comment(code);
                    text.push(' ');
                }
                _ => {
                    text.push(c);
                    code.pop();
                }
            }
        }

        let original = code.stop_recording();
        let text = text.trim_end().to_owned();
        let kind = self.classify(&text);
        let token = sink
            .token(kind, text, start, code.offset())
            .with_original_text(original);

        if self.as_trivia {
            sink.add_trivia(Trivia::preprocessor(token));
        } else {
            sink.add_token(token);
        }
        true
    }
}

/// Copies a quoted run; an unterminated one stops at the line break.
fn copy_quoted(code: &mut CodeBuffer, text: &mut String, quote: char) {
    if let Some(open) = code.pop() {
        text.push(open);
    }
    while let Some(c) = code.peek() {
        if is_line_break(c) {
            return;
        }
        code.pop();
        text.push(c);
        if c == '\\' {
            if let Some(escaped) = code.peek().filter(|e| !is_line_break(*e)) {
                code.pop();
                text.push(escaped);
            }
        } else if c == quote {
            return;
        }
    }
}

fn skip_line_comment(code: &mut CodeBuffer) {
    while let Some(c) = code.peek() {
        if let Some(len) = splice_len(code, 0) {
            code.skip(len);
            continue;
        }
        if is_line_break(c) {
            return;
        }
        code.pop();
    }
}

fn skip_block_comment(code: &mut CodeBuffer) {
    code.skip(2);
    let mut prev = None;
    while let Some(c) = code.pop() {
        if prev == Some('*') && c == '/' {
            return;
        }
        prev = Some(c);
    }
}

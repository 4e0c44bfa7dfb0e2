use crate::lexer::buffer::CodeBuffer;
use crate::lexer::channel::Channel;
use crate::lexer::sink::LexSink;
use crate::syntax::TokenKind;

/// Longest delimiter a raw string may declare.
const MAX_RAW_DELIMITER: usize = 16;

/// String or character literals with C++ prefixes and suffixes.
///
/// Recognized shape: optional encoding prefix (`u8`, `u`, `U`, `L`), optional
/// raw marker `R` (strings only), the quoted body, optional user-defined
/// suffix. A body may span lines; one without a closing quote before the end
/// of input is not a literal.
#[derive(Debug, Clone, Copy)]
pub struct LiteralChannel {
    quote: char,
    kind: TokenKind,
    raw_allowed: bool,
}

impl LiteralChannel {
    pub fn string() -> Self {
        Self {
            quote: '"',
            kind: TokenKind::STRING,
            raw_allowed: true,
        }
    }

    pub fn character() -> Self {
        Self {
            quote: '\'',
            kind: TokenKind::CHARACTER,
            raw_allowed: false,
        }
    }

    pub fn with_kind(mut self, kind: TokenKind) -> Self {
        self.kind = kind;
        self
    }

    /// Total length of the literal at the cursor.
    fn scan(&self, code: &CodeBuffer) -> Option<usize> {
        let mut k = encoding_prefix_len(code);
        let raw = self.raw_allowed && code.char_at(k) == Some('R');
        if raw {
            k += 1;
        }
        if code.char_at(k)? != self.quote {
            return None;
        }
        k += 1;

        let end = if raw {
            scan_raw_body(code, k)?
        } else {
            scan_body(code, k, self.quote)?
        };
        Some(end + suffix_len(code, end))
    }
}

impl Channel for LiteralChannel {
    fn consume(&mut self, code: &mut CodeBuffer, sink: &mut LexSink) -> bool {
        let Some(len) = self.scan(code) else {
            return false;
        };
        let start = code.checkpoint();
        let text = code.take(len);
        let token = sink.token(self.kind, text, start, code.offset());
        sink.add_token(token);
        true
    }
}

fn encoding_prefix_len(code: &CodeBuffer) -> usize {
    match (code.char_at(0), code.char_at(1)) {
        (Some('u'), Some('8')) => 2,
        (Some('u' | 'U' | 'L'), _) => 1,
        _ => 0,
    }
}

/// Scans an escaped body starting after the opening quote. Returns the
/// offset just past the closing quote.
fn scan_body(code: &CodeBuffer, mut k: usize, quote: char) -> Option<usize> {
    loop {
        let c = code.char_at(k)?;
        if c == quote {
            return Some(k + 1);
        }
        if c == '\\' {
            k += 1;
            if code.char_at(k)? == '\r' && code.char_at(k + 1) == Some('\n') {
                k += 1;
            }
        }
        k += 1;
    }
}

/// Scans `delim( ... )delim"` starting after the opening quote.
fn scan_raw_body(code: &CodeBuffer, mut k: usize) -> Option<usize> {
    let mut delimiter = Vec::new();
    loop {
        match code.char_at(k)? {
            '(' => break,
            ')' | '\\' | '"' => return None,
            c if c.is_whitespace() => return None,
            c => delimiter.push(c),
        }
        if delimiter.len() > MAX_RAW_DELIMITER {
            return None;
        }
        k += 1;
    }
    k += 1;

    loop {
        if code.char_at(k)? == ')' && closes_raw(code, k + 1, &delimiter) {
            return Some(k + 1 + delimiter.len() + 1);
        }
        k += 1;
    }
}

fn closes_raw(code: &CodeBuffer, at: usize, delimiter: &[char]) -> bool {
    delimiter
        .iter()
        .enumerate()
        .all(|(i, &d)| code.char_at(at + i) == Some(d))
        && code.char_at(at + delimiter.len()) == Some('"')
}

/// User-defined literal suffix; must not start with a digit.
fn suffix_len(code: &CodeBuffer, at: usize) -> usize {
    match code.char_at(at) {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return 0,
    }
    let mut len = 1;
    while code
        .char_at(at + len)
        .is_some_and(|c| c == '_' || c.is_ascii_alphanumeric())
    {
        len += 1;
    }
    len
}

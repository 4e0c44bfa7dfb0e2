use crate::lexer::buffer::CodeBuffer;
use crate::lexer::channel::Channel;
use crate::lexer::sink::LexSink;
use crate::syntax::TokenKind;

const C_FAMILY: &[&str] = &[
    "...", "<<=", ">>=", "->*", "<=>", "::", "->", "++", "--", "<<", ">>", "<=", ">=", "==", "!=",
    "&&", "||", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", ".*", "##", "{", "}", "[", "]",
    "(", ")", ";", ":", ",", ".", "?", "~", "!", "+", "-", "*", "/", "%", "^", "&", "|", "=",
    "<", ">", "#",
];

/// Longest-match recognizer over a fixed punctuator table.
#[derive(Debug, Clone)]
pub struct PunctuatorChannel {
    /// Sorted longest first.
    table: Vec<(Vec<char>, TokenKind)>,
}

impl PunctuatorChannel {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, TokenKind)>) -> Self {
        let mut table: Vec<_> = entries
            .into_iter()
            .filter(|(text, _)| !text.is_empty())
            .map(|(text, kind)| (text.chars().collect::<Vec<_>>(), kind))
            .collect();
        table.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { table }
    }

    /// C and C++ operators, all of kind `PUNCTUATOR`.
    pub fn c_family() -> Self {
        Self::new(C_FAMILY.iter().map(|p| (*p, TokenKind::PUNCTUATOR)))
    }
}

impl Channel for PunctuatorChannel {
    fn consume(&mut self, code: &mut CodeBuffer, sink: &mut LexSink) -> bool {
        let Some((chars, kind)) = self
            .table
            .iter()
            .find(|(chars, _)| code.rest().starts_with(chars))
        else {
            return false;
        };

        let start = code.checkpoint();
        let text = code.take(chars.len());
        let token = sink.token(*kind, text, start, code.offset());
        sink.add_token(token);
        true
    }
}

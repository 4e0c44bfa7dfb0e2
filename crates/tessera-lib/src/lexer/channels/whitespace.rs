use crate::lexer::buffer::CodeBuffer;
use crate::lexer::channel::Channel;
use crate::lexer::sink::LexSink;
use crate::syntax::{TokenKind, Trivia};

/// Consumes a maximal whitespace run.
///
/// By default the run becomes one `WHITESPACE` token delivered as skipped-text
/// trivia, so the token stream stays lossless.
#[derive(Debug, Clone, Copy)]
pub struct WhitespaceChannel {
    keep: bool,
}

impl Default for WhitespaceChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl WhitespaceChannel {
    pub fn new() -> Self {
        Self { keep: true }
    }

    /// Drops whitespace without producing trivia.
    pub fn discard() -> Self {
        Self { keep: false }
    }
}

impl Channel for WhitespaceChannel {
    fn consume(&mut self, code: &mut CodeBuffer, sink: &mut LexSink) -> bool {
        if !code.peek().is_some_and(char::is_whitespace) {
            return false;
        }

        let start = code.checkpoint();
        let mut text = String::new();
        while let Some(c) = code.peek().filter(|c| c.is_whitespace()) {
            text.push(c);
            code.pop();
        }

        if self.keep {
            let token = sink.token(TokenKind::WHITESPACE, text, start, code.offset());
            sink.add_trivia(Trivia::skipped_text(token));
        }
        true
    }
}

use crate::lexer::buffer::CodeBuffer;
use crate::lexer::channel::Channel;
use crate::lexer::sink::LexSink;
use crate::syntax::TokenKind;

const BOM: char = '\u{FEFF}';

/// Drops a byte-order mark.
#[derive(Debug, Default, Clone, Copy)]
pub struct BomChannel;

impl Channel for BomChannel {
    fn consume(&mut self, code: &mut CodeBuffer, _sink: &mut LexSink) -> bool {
        if code.peek() != Some(BOM) {
            return false;
        }
        code.pop();
        true
    }
}

/// Turns any single character into an `UNKNOWN_CHAR` token.
///
/// Meant as the last channel, so the dispatcher never has to fall back.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnknownCharacterChannel;

impl Channel for UnknownCharacterChannel {
    fn consume(&mut self, code: &mut CodeBuffer, sink: &mut LexSink) -> bool {
        let start = code.checkpoint();
        let Some(c) = code.pop() else {
            return false;
        };
        let token = sink.token(TokenKind::UNKNOWN_CHAR, c.to_string(), start, code.offset());
        sink.add_token(token);
        true
    }
}
